//! Pitch Formatter: one table row in, one pitch string out.
//!
//! Failures stay inside the row. A row with a missing or malformed field
//! gets `Error generating pitch: <reason>` as its pitch, and the rest of the
//! batch carries on.

use serde::Serialize;
use tracing::{debug, info};

use crate::models::startup::{StartupRecord, COL_NAME};
use crate::pitch::template::render_pitch;
use crate::table::{Row, Table};

/// Fixed prefix of every per-row failure string.
pub const PITCH_ERROR_PREFIX: &str = "Error generating pitch: ";

/// Formats one row. Never panics and never returns an error; failures are
/// rendered into the returned string.
pub fn format_pitch(row: &Row<'_>) -> String {
    match StartupRecord::from_row(row) {
        Ok(record) => render_pitch(&record),
        Err(e) => {
            debug!("Row skipped: {e}");
            format!("{PITCH_ERROR_PREFIX}{e}")
        }
    }
}

pub fn is_error_pitch(pitch: &str) -> bool {
    pitch.starts_with(PITCH_ERROR_PREFIX)
}

/// A preview line: the startup name as written (possibly blank) and its pitch.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PitchRow {
    pub startup_name: String,
    pub pitch: String,
}

/// Pitches for every row of a table, in row order.
#[derive(Debug, Clone, Default)]
pub struct PitchBatch {
    pub pitches: Vec<String>,
    pub error_count: usize,
}

impl PitchBatch {
    pub fn preview(&self, table: &Table) -> Vec<PitchRow> {
        table
            .iter_rows()
            .zip(&self.pitches)
            .map(|(row, pitch)| PitchRow {
                startup_name: row.get(COL_NAME).unwrap_or_default().to_string(),
                pitch: pitch.clone(),
            })
            .collect()
    }
}

/// Maps every row through [`format_pitch`]. A failing row never aborts the batch.
pub fn generate_pitches(table: &Table) -> PitchBatch {
    let pitches: Vec<String> = table.iter_rows().map(|row| format_pitch(&row)).collect();
    let error_count = pitches.iter().filter(|p| is_error_pitch(p)).count();

    info!(
        "Generated {} pitches ({} rows failed)",
        pitches.len() - error_count,
        error_count
    );

    PitchBatch {
        pitches,
        error_count,
    }
}

/// Shortest round-trip decimal with at least one fractional digit:
/// `10.0 -> "10.0"`, `2.5 -> "2.5"`, `0.1 -> "0.1"`.
pub fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Integer with comma thousands separators: `5000 -> "5,000"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
