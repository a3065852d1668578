//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for Harmony using Clap
//! derive macros. Every subcommand maps to exactly one request handler.
//!
//! ## Commands
//!
//! - `recommend`: Therapy session, suggest and play a song for a mood
//! - `breathe`: Guided 4-7-8 breathing cycle (Ctrl-C resets)
//! - `admin`: Research portal, view or clear the usage log
//! - `moods`: List the moods that can be selected
//! - `completion`: Generate shell completion scripts
//!
//! ## Examples
//!
//! ```bash
//! harmony recommend --name Ann --mood anxiety --stress 7
//! harmony breathe
//! harmony admin --password admin123
//! harmony admin --password admin123 clear
//! ```

use crate::catalog::Mood;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
///
/// Global options select the files the handlers operate on; everything else
/// is carried by the subcommand.
#[derive(Parser, Debug)]
#[command(name = "harmony")]
#[command(about = "Harmony Healer: personalized music therapy & wellness")]
#[command(version)]
pub struct Args {
    /// Song catalog (CSV with MoodCategory, SongTitle, Artist, YoutubeLink)
    #[arg(long, global = true, env = "HARMONY_CATALOG", value_hint = clap::ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Usage log file written after every recommendation
    #[arg(long, global = true, env = "HARMONY_LOG_FILE", value_hint = clap::ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// JSON config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "HARMONY_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a music recommendation for how you feel
    ///
    /// Picks a random song for the selected mood from the catalog, shows it,
    /// starts playback, and records the session in the usage log.
    Recommend {
        /// Your name (required)
        #[arg(short, long, default_value = "")]
        name: String,

        /// How are you feeling?
        #[arg(short, long, value_enum, ignore_case = true, default_value = "calm")]
        mood: Mood,

        /// Rate your stress level (1-10)
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
        stress: u8,

        /// Show the recommendation without starting the player
        #[arg(long)]
        no_play: bool,
    },

    /// Guided breathing mode (anxiety relief)
    ///
    /// Runs one 4-7-8 cycle: inhale for 4 seconds, hold for 7, exhale for 8.
    /// Press Ctrl-C to stop and reset.
    Breathe,

    /// Admin research portal
    ///
    /// Shows the recorded sessions with the number of sessions and the
    /// average stress level, or deletes all recorded data.
    Admin {
        /// Admin password
        #[arg(short, long, env = "HARMONY_ADMIN_PASSWORD", default_value = "", hide_env_values = true)]
        password: String,

        #[command(subcommand)]
        action: Option<AdminAction>,
    },

    /// List the moods you can choose from
    Moods,

    /// Generate shell completions
    ///
    /// Usage: harmony completion bash > ~/.local/share/bash-completion/completions/harmony
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// What to do once inside the admin portal
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    /// Show the usage log (default)
    View,

    /// Delete all recorded research data. No confirmation, no undo.
    Clear,
}
