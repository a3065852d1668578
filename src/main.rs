//! # Harmony - Music Therapy Sessions
//!
//! Command-line front end. Each invocation runs exactly one handler and
//! renders its view to stdout; nothing is kept in memory between runs.
//!
//! ## Usage
//!
//! ```bash
//! # Therapy session
//! harmony recommend --name Ann --mood stress --stress 8
//!
//! # Guided breathing (Ctrl-C to reset)
//! harmony breathe
//!
//! # Research portal
//! harmony admin --password admin123
//! harmony admin --password admin123 clear
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use harmony::breathing::SleepTicker;
use harmony::cli::{self, AdminAction};
use harmony::config::{self, Overrides};
use harmony::handlers::{self, RecommendRequest};
use harmony::playback::{CommandPlayer, Player, SilentPlayer};
use harmony::storage::FileStorage;
use harmony::{completion, view::View};
use log::{debug, info};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn render(view: &View) -> Result<()> {
    view.render(&mut io::stdout().lock())
        .context("Failed to write to stdout")
}

/// Main entry point for the Harmony application.
///
/// Initializes logging, parses command-line arguments, resolves the
/// configuration and routes the subcommand to its handler.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug harmony recommend -n Ann` - Enable debug logging
/// - `RUST_LOG=harmony::storage=trace harmony admin` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    let app_config = config::load(
        args.config.as_deref(),
        Overrides {
            catalog_path: args.catalog,
            log_path: args.log_file,
        },
    )?;
    let storage = FileStorage::new(&app_config.catalog_path, &app_config.log_path);

    match args.command {
        cli::Command::Recommend { name, mood, stress, no_play } => {
            info!("Recommendation requested for mood {mood}");
            let player: Box<dyn Player> = if no_play {
                Box::new(SilentPlayer)
            } else {
                Box::new(CommandPlayer::new(app_config.player.clone()))
            };
            let request = RecommendRequest {
                user_name: name,
                mood,
                stress_level: stress,
            };
            let view = handlers::submit_recommendation(
                &storage,
                player.as_ref(),
                &mut rand::thread_rng(),
                &request,
            );
            render(&view)?;
        }
        cli::Command::Breathe => {
            // Ctrl-C raises the reset flag instead of killing the process.
            let reset = Arc::new(AtomicBool::new(false));
            let handler_flag = Arc::clone(&reset);
            ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))
                .context("Failed to install Ctrl-C handler")?;

            let mut ticker = SleepTicker::default();
            let mut frame_error = None;
            let end = handlers::start_breathing(&mut ticker, &reset, |frame| {
                if let Err(e) = render(&frame) {
                    frame_error.get_or_insert(e);
                }
            });
            if let Some(e) = frame_error {
                return Err(e);
            }
            render(&end)?;
        }
        cli::Command::Admin { password, action } => {
            let view = match action.unwrap_or(AdminAction::View) {
                AdminAction::View => handlers::submit_password(&storage, &password),
                AdminAction::Clear => handlers::clear_log(&storage, &password),
            };
            render(&view)?;
        }
        cli::Command::Moods => {
            completion::write_moods(&mut io::stdout().lock())
                .context("Failed to write to stdout")?;
        }
        cli::Command::Completion { shell } => {
            debug!("Generating {shell:?} completions");
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
    }

    Ok(())
}
