//! # Request Handlers
//!
//! One function per user action. Every handler takes the persisted state
//! (through [`Storage`]) plus the action's input and returns the [`View`] to
//! show. Failures are turned into on-screen messages here and never escape
//! as errors, so no action can abort the program.
//!
//! | Action                | Handler                   |
//! |-----------------------|---------------------------|
//! | submit recommendation | [`submit_recommendation`] |
//! | start breathing timer | [`start_breathing`]       |
//! | reset breathing timer | [`reset_breathing`]       |
//! | submit admin password | [`submit_password`]       |
//! | clear usage log       | [`clear_log`]             |

use crate::admin::{self, Access, LogView};
use crate::breathing::{self, BreathingTimer, Phase, Ticker, TimerState};
use crate::catalog::Mood;
use crate::playback::Player;
use crate::recommend::{self, Recommendation};
use crate::storage::{Storage, StorageError};
use crate::usage_log::{self, UsageLogEntry};
use crate::view::{Block, View};
use log::{debug, warn};
use rand::Rng;
use std::path::Path;
use std::sync::atomic::AtomicBool;

/// Input of the therapy screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendRequest {
    pub user_name: String,
    pub mood: Mood,
    /// Self-reported, 1 to 10
    pub stress_level: u8,
}

fn therapy_header(view: &mut View) {
    view.title("Harmony Healer")
        .subtitle("Personalized Music Therapy & Wellness")
        .text("Welcome. This system uses personalized data to suggest music for your emotional state.");
}

/// Resolve, display, play and log a song for the user's mood.
///
/// A log row is written only when a song was found and displayed, even if
/// its media file turns out to be missing.
pub fn submit_recommendation<S, P, R>(
    storage: &S,
    player: &P,
    rng: &mut R,
    request: &RecommendRequest,
) -> View
where
    S: Storage + ?Sized,
    P: Player + ?Sized,
    R: Rng + ?Sized,
{
    let mut view = View::new();
    therapy_header(&mut view);

    if request.user_name.is_empty() {
        view.warning("Please enter your name to begin the session.");
        return view;
    }
    if !(1..=10).contains(&request.stress_level) {
        view.warning("Stress level must be between 1 and 10.");
        return view;
    }

    view.success(format!(
        "Hello {}, analyzing your mood: {}...",
        request.user_name, request.mood
    ));

    let song = match recommend::resolve(storage, request.mood, rng) {
        Ok(Recommendation::Found(song)) => song,
        Ok(Recommendation::NoMatch) => {
            view.warning(format!("No songs found for '{}' in the database.", request.mood))
                .info("Check your songs.csv file to ensure this mood category exists.");
            return view;
        }
        Err(StorageError::CatalogMissing(path)) => {
            view.error(format!("System Error: '{}' file is missing!", path.display()));
            return view;
        }
        Err(e) => {
            view.error(format!("Error reading database: {e}"));
            return view;
        }
    };

    view.divider()
        .subtitle(format!("Prescribed Track: {}", song.title))
        .text(format!("Artist: {}", song.artist));

    if player.media_exists(&song.media_locator) {
        match player.play(Path::new(&song.media_locator)) {
            Ok(()) => {
                view.push(Block::Audio(song.media_locator.clone()));
            }
            Err(e) => {
                warn!("Playback failed: {e:#}");
                view.error(format!("Playback failed: {e:#}"));
            }
        }
    } else {
        view.error(format!("Could not find the file at '{}'", song.media_locator))
            .info("Please check your 'music' folder. The filename in songs.csv must match exactly.");
    }

    let entry = UsageLogEntry::new(
        request.user_name.as_str(),
        request.mood.as_str(),
        request.stress_level,
        song.title.as_str(),
    );
    if let Err(e) = storage.append_log_entry(&entry) {
        warn!("Could not append usage log row: {e}");
        view.error(format!("Could not record this session: {e}"));
    }

    view
}

fn breathing_header(view: &mut View) {
    view.divider()
        .subtitle("Guided Breathing Mode (Anxiety Relief)")
        .text("This feature helps reduce stress using the 4-7-8 technique.");
}

/// Run one 4-7-8 cycle, emitting a frame for every countdown second.
///
/// Blocks for the whole cycle. Each frame carries the phase cue when the
/// phase changes and the remaining seconds. The returned view is the final
/// screen: the completion message, or the idle screen after a reset.
pub fn start_breathing<T, F>(ticker: &mut T, reset: &AtomicBool, mut emit: F) -> View
where
    T: Ticker + ?Sized,
    F: FnMut(View),
{
    let mut intro = View::new();
    breathing_header(&mut intro);
    emit(intro);

    let mut timer = BreathingTimer::new();
    let mut shown_phase: Option<Phase> = None;

    let end = breathing::run_cycle(&mut timer, ticker, reset, |state| {
        if let TimerState::Counting { phase, remaining } = state {
            let mut frame = View::new();
            if shown_phase != Some(phase) {
                match phase {
                    Phase::Inhale => frame.info(phase.cue()),
                    Phase::Hold => frame.warning(phase.cue()),
                    Phase::Exhale => frame.success(phase.cue()),
                };
                shown_phase = Some(phase);
            }
            frame.metric("Seconds", remaining);
            emit(frame);
        }
    });

    match end {
        TimerState::Complete => {
            let mut view = View::new();
            view.push(Block::Celebration("Well done!".to_string()))
                .success("Cycle Complete.");
            view
        }
        _ => reset_breathing(),
    }
}

/// Screen shown after a reset: the timer is idle and nothing is counting.
pub fn reset_breathing() -> View {
    debug!("Rendering idle breathing screen");
    let mut view = View::new();
    breathing_header(&mut view);
    view.info("Breathing exercise reset. Start again whenever you are ready.");
    view
}

fn admin_page<S: Storage + ?Sized>(storage: &S, password: &str, notice: Option<&str>) -> View {
    let mut view = View::new();
    view.title("Admin Research Portal");

    match admin::check_password(password) {
        Access::Neutral => return view,
        Access::Denied => {
            view.error("Incorrect Password.");
            return view;
        }
        Access::Granted => {
            view.success("Access Granted: Research Data View");
        }
    }

    if let Some(notice) = notice {
        view.success(notice);
    }

    match admin::load_log_view(storage) {
        Ok(LogView::Empty) => {
            view.info("No data recorded yet. Run a therapy session with `harmony recommend` first.");
        }
        Ok(LogView::Unreadable) => {
            view.subtitle("Participant Usage Logs")
                .error("Log file exists but is empty or unreadable.");
        }
        Ok(LogView::Loaded { entries, summary }) => {
            view.subtitle("Participant Usage Logs")
                .metric("Total Sessions", summary.total_sessions)
                .metric("Avg Stress Level", summary.format_average());
            view.push(Block::Table {
                headers: usage_log::COLUMNS.iter().map(|c| c.to_string()).collect(),
                rows: entries.iter().map(UsageLogEntry::cells).collect(),
            });
        }
        Err(e) => {
            warn!("Failed to read usage log: {e}");
            view.error("Log file exists but is empty or unreadable.");
        }
    }

    view
}

/// Check the admin password and, when granted, show the usage log.
pub fn submit_password<S: Storage + ?Sized>(storage: &S, password: &str) -> View {
    admin_page(storage, password, None)
}

/// Delete the whole usage log, then show the (now empty) admin screen.
///
/// Only acts behind a granted password. No confirmation and no backup.
pub fn clear_log<S: Storage + ?Sized>(storage: &S, password: &str) -> View {
    if admin::check_password(password) != Access::Granted {
        return admin_page(storage, password, None);
    }

    match admin::clear(storage) {
        Ok(()) => admin_page(storage, password, Some("History deleted successfully.")),
        Err(e) => {
            warn!("Failed to delete usage log: {e}");
            let mut view = admin_page(storage, password, None);
            view.error(format!("Could not delete history: {e}"));
            view
        }
    }
}
