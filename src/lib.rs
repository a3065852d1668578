//! Mood-based music therapy sessions with guided breathing and research logs.
//!
//! Core modules:
//! - [`recommend`] - Picks a song for a mood from the catalog
//! - [`usage_log`] - Append-only session records and their summary
//! - [`breathing`] - 4-7-8 breathing timer state machine
//! - [`admin`] - Password gate and log inspection
//! - [`handlers`] - One handler per user action, each returning a [`view::View`]
//!
//! ### Supporting Modules
//!
//! - [`catalog`] - Mood enum and catalog parsing
//! - [`storage`] - File and in-memory persistence behind one trait
//! - [`playback`] - External media player integration
//! - [`view`] - Screen model and terminal rendering
//! - [`config`] - Configuration file and path resolution
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use harmony::catalog::Mood;
//! use harmony::handlers::{self, RecommendRequest};
//! use harmony::playback::SilentPlayer;
//! use harmony::storage::FileStorage;
//!
//! let storage = FileStorage::new("songs.csv", "user_usage_logs.csv");
//! let request = RecommendRequest {
//!     user_name: "Ann".to_string(),
//!     mood: Mood::Anxiety,
//!     stress_level: 7,
//! };
//!
//! let view = handlers::submit_recommendation(
//!     &storage,
//!     &SilentPlayer,
//!     &mut rand::thread_rng(),
//!     &request,
//! );
//! view.render(&mut std::io::stdout())?;
//!
//! let admin = handlers::submit_password(&storage, "admin123");
//! println!("{:?}", admin.metric_value("Total Sessions"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Execution Model
//!
//! Nothing survives between commands except the two files on disk. Every
//! action reloads what it needs, so a catalog edit is visible on the next
//! request and a cleared log never shows a stale table.
//!
//! ## Error Handling
//!
//! Handlers never return errors: missing catalog, empty matches, missing
//! media, unreadable logs and wrong passwords all become messages in the
//! returned view. Lower layers use [`storage::StorageError`] at the storage
//! seam and `anyhow::Result` for configuration and playback.
//!
//! ## Known Limitations
//!
//! - The admin password is a constant compared in plaintext
//! - Log fields are not escaped, so commas in names misalign rows
//! - Concurrent writers to the log are not coordinated

pub mod admin;
pub mod breathing;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod handlers;
pub mod playback;
pub mod recommend;
pub mod storage;
pub mod usage_log;
pub mod view;
