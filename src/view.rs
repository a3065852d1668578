//! # View Module
//!
//! Handlers never print. They return a [`View`]: an ordered list of blocks
//! describing what the screen shows. `main` renders it to the terminal, and
//! tests inspect it directly.

use std::io::{self, Write};

/// A single piece of screen output.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Subtitle(String),
    Text(String),
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
    Metric { label: String, value: String },
    Table { headers: Vec<String>, rows: Vec<Vec<String>> },
    /// Media handed to the player
    Audio(String),
    Celebration(String),
    Divider,
}

/// Rendered output of one handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub blocks: Vec<Block>,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn title(&mut self, s: impl Into<String>) -> &mut Self {
        self.push(Block::Title(s.into()))
    }

    pub fn subtitle(&mut self, s: impl Into<String>) -> &mut Self {
        self.push(Block::Subtitle(s.into()))
    }

    pub fn text(&mut self, s: impl Into<String>) -> &mut Self {
        self.push(Block::Text(s.into()))
    }

    pub fn success(&mut self, s: impl Into<String>) -> &mut Self {
        self.push(Block::Success(s.into()))
    }

    pub fn info(&mut self, s: impl Into<String>) -> &mut Self {
        self.push(Block::Info(s.into()))
    }

    pub fn warning(&mut self, s: impl Into<String>) -> &mut Self {
        self.push(Block::Warning(s.into()))
    }

    pub fn error(&mut self, s: impl Into<String>) -> &mut Self {
        self.push(Block::Error(s.into()))
    }

    pub fn metric(&mut self, label: impl Into<String>, value: impl ToString) -> &mut Self {
        self.push(Block::Metric {
            label: label.into(),
            value: value.to_string(),
        })
    }

    pub fn divider(&mut self) -> &mut Self {
        self.push(Block::Divider)
    }

    /// All error messages, in order.
    pub fn errors(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Error(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All warning messages, in order.
    pub fn warnings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Warning(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Value of the metric called `label`, if shown.
    pub fn metric_value(&self, label: &str) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Metric { label: l, value } if l == label => Some(value.as_str()),
            _ => None,
        })
    }

    /// Whether any block of the view mentions `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.blocks.iter().any(|b| match b {
            Block::Title(s)
            | Block::Subtitle(s)
            | Block::Text(s)
            | Block::Success(s)
            | Block::Info(s)
            | Block::Warning(s)
            | Block::Error(s)
            | Block::Audio(s)
            | Block::Celebration(s) => s.contains(needle),
            Block::Metric { label, value } => label.contains(needle) || value.contains(needle),
            Block::Table { headers, rows } => headers
                .iter()
                .chain(rows.iter().flatten())
                .any(|cell| cell.contains(needle)),
            Block::Divider => false,
        })
    }

    /// Write the view as plain terminal text.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for block in &self.blocks {
            render_block(block, out)?;
        }
        out.flush()
    }
}

fn render_block<W: Write>(block: &Block, out: &mut W) -> io::Result<()> {
    match block {
        Block::Title(s) => {
            writeln!(out, "{s}")?;
            writeln!(out, "{}", "=".repeat(s.chars().count()))
        }
        Block::Subtitle(s) => writeln!(out, "{s}"),
        Block::Text(s) => writeln!(out, "{s}"),
        Block::Success(s) => writeln!(out, "[ok] {s}"),
        Block::Info(s) => writeln!(out, "[info] {s}"),
        Block::Warning(s) => writeln!(out, "[warning] {s}"),
        Block::Error(s) => writeln!(out, "[error] {s}"),
        Block::Metric { label, value } => writeln!(out, "{label}: {value}"),
        Block::Table { headers, rows } => render_table(headers, rows, out),
        Block::Audio(s) => writeln!(out, "Now playing: {s}"),
        Block::Celebration(s) => writeln!(out, "*** {s} ***"),
        Block::Divider => writeln!(out, "{}", "-".repeat(40)),
    }
}

fn render_table<W: Write>(headers: &[String], rows: &[Vec<String>], out: &mut W) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    writeln!(out, "{}", line(headers))?;
    writeln!(
        out,
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    )?;
    for row in rows {
        writeln!(out, "{}", line(row.as_slice()))?;
    }
    Ok(())
}
