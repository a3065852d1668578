//! Admin research portal: password gate and usage log inspection.
//!
//! The password is a literal constant compared in plaintext. There is no
//! hashing, lockout or attempt counting. A hardened deployment should move the
//! secret out of the binary and store only a hash of it.

use crate::storage::{Storage, StorageError};
use crate::usage_log::{LogSummary, UsageLogEntry};
use log::{debug, info, warn};

/// The admin password.
pub const ADMIN_SECRET: &str = "admin123";

/// Result of checking a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Nothing entered yet, show nothing
    Neutral,
    Granted,
    Denied,
}

#[must_use]
pub fn check_password(input: &str) -> Access {
    if input == ADMIN_SECRET {
        Access::Granted
    } else if input.is_empty() {
        Access::Neutral
    } else {
        warn!("Rejected admin password attempt");
        Access::Denied
    }
}

/// What the granted admin screen shows.
#[derive(Debug, Clone, PartialEq)]
pub enum LogView {
    /// No log file yet
    Empty,
    /// Log file exists but is empty or malformed
    Unreadable,
    Loaded {
        entries: Vec<UsageLogEntry>,
        summary: LogSummary,
    },
}

/// Read the log fresh from `storage`.
///
/// # Errors
///
/// Only I/O failures other than "not found" and "unreadable" are returned.
pub fn load_log_view<S: Storage + ?Sized>(storage: &S) -> Result<LogView, StorageError> {
    match storage.read_log() {
        Ok(None) => Ok(LogView::Empty),
        Ok(Some(entries)) => match LogSummary::from_entries(&entries) {
            Some(summary) => Ok(LogView::Loaded { entries, summary }),
            None => Ok(LogView::Unreadable),
        },
        Err(StorageError::LogUnreadable(detail)) => {
            debug!("Usage log unreadable: {detail}");
            Ok(LogView::Unreadable)
        }
        Err(e) => Err(e),
    }
}

/// Delete every recorded session. No confirmation and no backup.
///
/// Callers are expected to have checked the password first.
///
/// # Errors
///
/// Returns the storage error if the log exists but cannot be removed.
pub fn clear<S: Storage + ?Sized>(storage: &S) -> Result<(), StorageError> {
    info!("Clearing usage log");
    storage.clear_log()
}
