//! # Shell Completion Module
//!
//! Generates completion scripts for the supported shells through
//! clap_complete, and prints the selectable moods for scripts that want to
//! complete `--mood` values on their own.
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! harmony completion bash > ~/.local/share/bash-completion/completions/harmony
//!
//! # Generate zsh completions
//! harmony completion zsh > ~/.config/zsh/completions/_harmony
//! ```

use crate::catalog::Mood;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::{self, Write};

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Map our CLI shell enum onto clap_complete's.
pub fn shell_to_completion_shell(shell: &crate::cli::Shell) -> CompletionShell {
    match shell {
        crate::cli::Shell::Bash => CompletionShell::Bash,
        crate::cli::Shell::Zsh => CompletionShell::Zsh,
        crate::cli::Shell::Fish => CompletionShell::Fish,
        crate::cli::Shell::PowerShell => CompletionShell::PowerShell,
        crate::cli::Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Write one mood per line, in display order.
pub fn write_moods<W: Write>(out: &mut W) -> io::Result<()> {
    for mood in Mood::ALL {
        writeln!(out, "{mood}")?;
    }
    Ok(())
}
