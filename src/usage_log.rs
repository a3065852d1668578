//! # Usage Log Module
//!
//! Every successful recommendation leaves one row in the usage log. The log is
//! append-only, headerless, and carries four positional fields:
//!
//! ```text
//! userName,mood,stressLevel,songTitle
//! ```
//!
//! Fields are joined with a plain comma and are not escaped. A user name or
//! song title containing a comma therefore produces a row with more than four
//! fields, and the reader rejects the whole log as unreadable. Rows are kept
//! in chronological append order and are never edited; the only way to remove
//! them is to delete the whole file.

use log::debug;
use std::io::Read;

/// One completed recommendation as written to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageLogEntry {
    pub user_name: String,
    pub mood: String,
    pub stress_level: u8,
    pub song_title: String,
}

/// Column titles used when the log is displayed as a table.
pub const COLUMNS: [&str; 4] = ["User Name", "Mood", "Stress Level", "Song Prescribed"];

impl UsageLogEntry {
    pub fn new(
        user_name: impl Into<String>,
        mood: impl Into<String>,
        stress_level: u8,
        song_title: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            mood: mood.into(),
            stress_level,
            song_title: song_title.into(),
        }
    }

    /// Render the entry as a single log line, newline included.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{}\n",
            self.user_name, self.mood, self.stress_level, self.song_title
        )
    }

    /// Cell values in [`COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.user_name.clone(),
            self.mood.clone(),
            self.stress_level.to_string(),
            self.song_title.clone(),
        ]
    }
}

/// Parse the full log.
///
/// # Errors
///
/// Returns a description of the first problem found:
/// - the log has no rows at all
/// - a row does not have exactly four fields
/// - a stress level is not a whole number
pub fn parse_log<R: Read>(reader: R) -> Result<Vec<UsageLogEntry>, String> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (index, row) in rdr.records().enumerate() {
        let row = row.map_err(|e| e.to_string())?;
        let line = index + 1;
        if row.len() != COLUMNS.len() {
            return Err(format!(
                "Expected {} fields in line {line}, saw {}",
                COLUMNS.len(),
                row.len()
            ));
        }
        let stress_level = row[2]
            .trim()
            .parse::<u8>()
            .map_err(|_| format!("Invalid stress level '{}' in line {line}", &row[2]))?;

        entries.push(UsageLogEntry::new(&row[0], &row[1], stress_level, &row[3]));
    }

    if entries.is_empty() {
        return Err("No columns to parse from file".to_string());
    }

    debug!("Parsed {} usage log rows", entries.len());
    Ok(entries)
}

/// Aggregate figures shown above the log table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogSummary {
    pub total_sessions: usize,
    pub average_stress: f64,
}

impl LogSummary {
    /// Returns `None` for an empty slice, there is no mean of nothing.
    #[must_use]
    pub fn from_entries(entries: &[UsageLogEntry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let total: u64 = entries.iter().map(|e| u64::from(e.stress_level)).sum();
        Some(Self {
            total_sessions: entries.len(),
            average_stress: total as f64 / entries.len() as f64,
        })
    }

    /// Mean stress rounded to one decimal place, e.g. `"5.0"`.
    #[must_use]
    pub fn format_average(&self) -> String {
        format!("{:.1}", self.average_stress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let entry = UsageLogEntry::new("Ann", "Calm", 4, "SongA");
        assert_eq!(entry.to_line(), "Ann,Calm,4,SongA\n");
    }

    #[test]
    fn test_commas_are_not_escaped() {
        // Known limitation: the row gains a fifth field.
        let entry = UsageLogEntry::new("Doe, Jane", "Stress", 7, "SongB");
        let line = entry.to_line();
        assert_eq!(line, "Doe, Jane,Stress,7,SongB\n");
        assert!(parse_log(line.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_keeps_append_order() {
        let data = "Ann,Calm,4,SongA\nBo,Stress,8,SongB\nCy,Sadness,2,SongC\n";
        let entries = parse_log(data.as_bytes()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.user_name.as_str()).collect();
        assert_eq!(names, ["Ann", "Bo", "Cy"]);
        assert_eq!(entries[1].stress_level, 8);
    }

    #[test]
    fn test_empty_log_is_unreadable() {
        assert!(parse_log("".as_bytes()).is_err());
    }

    #[test]
    fn test_non_numeric_stress_is_unreadable() {
        let err = parse_log("Ann,Calm,high,SongA\n".as_bytes()).unwrap_err();
        assert!(err.contains("stress"));
    }

    #[test]
    fn test_average_of_three_five_seven() {
        let entries = vec![
            UsageLogEntry::new("a", "Calm", 3, "x"),
            UsageLogEntry::new("b", "Calm", 5, "y"),
            UsageLogEntry::new("c", "Calm", 7, "z"),
        ];
        let summary = LogSummary::from_entries(&entries).unwrap();
        assert_eq!(summary.total_sessions, 3);
        assert_eq!(summary.format_average(), "5.0");
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let entries = vec![
            UsageLogEntry::new("a", "Calm", 1, "x"),
            UsageLogEntry::new("b", "Calm", 2, "y"),
            UsageLogEntry::new("c", "Calm", 2, "z"),
        ];
        let summary = LogSummary::from_entries(&entries).unwrap();
        assert_eq!(summary.format_average(), "1.7");
    }

    #[test]
    fn test_summary_of_nothing() {
        assert!(LogSummary::from_entries(&[]).is_none());
    }
}
