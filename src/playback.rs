//! # Playback Module
//!
//! Harmony does not decode audio itself. Like handing a queue to MPD through
//! `mpc`, it hands the resolved media file to an external player process and
//! returns immediately.
//!
//! The media locator comes straight from the catalog. Before playback the
//! locator is checked as a local path; a locator that does not exist on disk
//! (including remote URLs) is reported as "media not found" and nothing is
//! spawned.

use crate::config::PlayerConfig;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use std::process::{Command, Stdio};

/// Something that can play a local media file.
pub trait Player {
    /// Whether `locator` names an existing local file.
    fn media_exists(&self, locator: &str) -> bool {
        Path::new(locator).exists()
    }

    /// Start playing `path`. Must not block until playback ends.
    fn play(&self, path: &Path) -> Result<()>;
}

/// Spawns the configured external player, detached from our stdio.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    config: PlayerConfig,
}

impl CommandPlayer {
    pub fn new(config: PlayerConfig) -> Self {
        Self { config }
    }
}

impl Player for CommandPlayer {
    fn play(&self, path: &Path) -> Result<()> {
        debug!(
            "Spawning player: {} {:?} {}",
            self.config.command,
            self.config.args,
            path.display()
        );
        Command::new(&self.config.command)
            .args(&self.config.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to start '{}'. Install it or set a different player in the config file",
                    self.config.command
                )
            })?;
        info!("Playing {}", path.display());
        Ok(())
    }
}

/// Checks for the file but never plays anything (`--no-play`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl Player for SilentPlayer {
    fn play(&self, path: &Path) -> Result<()> {
        debug!("Playback disabled, not playing {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_exists_checks_local_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("track.mp3");
        std::fs::write(&file, b"ID3")?;

        let player = SilentPlayer;
        assert!(player.media_exists(&file.to_string_lossy()));
        assert!(!player.media_exists(&dir.path().join("nope.mp3").to_string_lossy()));
        assert!(!player.media_exists("https://www.youtube.com/watch?v=abc"));
        Ok(())
    }

    #[test]
    fn test_missing_player_binary_is_an_error() {
        let player = CommandPlayer::new(PlayerConfig {
            command: "harmony-test-player-that-does-not-exist".to_string(),
            args: Vec::new(),
        });
        let err = player.play(Path::new("track.mp3")).unwrap_err();
        assert!(err.to_string().contains("Failed to start"));
    }
}
