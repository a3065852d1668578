//! # Song Catalog Module
//!
//! The catalog is the static table that maps a mood category to candidate
//! songs. It is maintained outside of Harmony as a headered, comma-delimited
//! file and is read fresh on every recommendation request.
//!
//! ## Expected Columns
//!
//! | Column          | Meaning                                   |
//! |-----------------|-------------------------------------------|
//! | `MoodCategory`  | One of the fixed [`Mood`] values          |
//! | `SongTitle`     | Title shown to the user and logged        |
//! | `Artist`        | Artist shown to the user                  |
//! | `YoutubeLink`   | Media locator (local path or URI)         |
//!
//! Header names are trimmed before use and any extra columns are ignored.
//! The mood and locator values are trimmed; title and artist are kept as-is.

use clap::ValueEnum;
use log::{debug, trace};
use serde::Deserialize;
use std::fmt;
use std::io::Read;

/// The fixed set of emotional states a user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Mood {
    Calm,
    Anxiety,
    Stress,
    Depression,
    Sadness,
}

impl Mood {
    /// All moods, in the order they are offered to the user.
    pub const ALL: [Mood; 5] = [
        Mood::Calm,
        Mood::Anxiety,
        Mood::Stress,
        Mood::Depression,
        Mood::Sadness,
    ];

    /// Display name, also the canonical catalog spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Calm => "Calm",
            Mood::Anxiety => "Anxiety",
            Mood::Stress => "Stress",
            Mood::Depression => "Depression",
            Mood::Sadness => "Sadness",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the catalog.
///
/// Rows have no identity beyond their values; they are read, filtered and
/// discarded within a single request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SongRecord {
    #[serde(rename = "MoodCategory")]
    pub mood_category: String,
    #[serde(rename = "SongTitle")]
    pub title: String,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "YoutubeLink")]
    pub media_locator: String,
}

impl SongRecord {
    /// Case-insensitive, whitespace-trimmed comparison against `mood`.
    #[must_use]
    pub fn matches_mood(&self, mood: Mood) -> bool {
        self.mood_category.trim().to_lowercase() == mood.as_str().to_lowercase()
    }
}

/// Columns a catalog must carry after header trimming.
const REQUIRED_COLUMNS: [&str; 4] = ["MoodCategory", "SongTitle", "Artist", "YoutubeLink"];

/// Parse a catalog from any reader.
///
/// # Errors
///
/// Returns a human-readable description when:
/// - the input has no header row at all
/// - a required column is missing
/// - a row has a different number of fields than the header
/// - a row cannot be decoded
pub fn parse_catalog<R: Read>(reader: R) -> Result<Vec<SongRecord>, String> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| e.to_string())?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err("No columns to parse from file".to_string());
    }
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(format!("missing column '{missing}'"));
    }
    trace!("Catalog headers: {headers:?}");

    let mut records = Vec::new();
    for row in rdr.deserialize::<SongRecord>() {
        let mut record = row.map_err(|e| e.to_string())?;
        record.mood_category = record.mood_category.trim().to_string();
        record.media_locator = record.media_locator.trim().to_string();
        records.push(record);
    }

    debug!("Parsed {} catalog rows", records.len());
    Ok(records)
}
