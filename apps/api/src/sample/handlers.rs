//! Axum route handlers for browsing the bundled sample startups.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::encoding::repair_text;
use crate::errors::AppError;
use crate::models::startup::COL_NAME;
use crate::pitch::formatter::format_pitch;
use crate::table::export::PITCH_COLUMN;
use crate::table::loader::LoadedTable;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SampleListResponse {
    pub startups: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PitchSource {
    /// Taken from the sample's own pitch column, after encoding repair.
    PreRendered,
    /// The sample had no pitch for this row; formatted on the fly.
    Generated,
}

#[derive(Debug, Serialize)]
pub struct SamplePitchResponse {
    pub startup_name: String,
    pub pitch: String,
    pub source: PitchSource,
}

fn load(state: &AppState) -> LoadedTable {
    state.sample_cache.load_sample(&state.config.sample_csv_path)
}

/// GET /api/v1/sample
///
/// Names of the first `SAMPLE_LIMIT` sample startups, for the selector.
/// A missing or empty sample file yields an empty list plus a notice.
pub async fn handle_list_samples(State(state): State<AppState>) -> Json<SampleListResponse> {
    let loaded = load(&state);

    let startups: Vec<String> = loaded
        .table
        .iter_rows()
        .filter_map(|row| row.get(COL_NAME))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .take(state.config.sample_limit)
        .map(str::to_string)
        .collect();

    Json(SampleListResponse {
        startups,
        notice: loaded.notice,
    })
}

/// GET /api/v1/sample/:name
///
/// The pitch for one sample startup. Pre-rendered text is passed through
/// encoding repair; rows without one are formatted from their fields.
pub async fn handle_get_sample_pitch(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SamplePitchResponse>, AppError> {
    let loaded = load(&state);
    let table = &loaded.table;

    let row = table
        .iter_rows()
        .find(|row| row.get(COL_NAME).map(str::trim) == Some(name.trim()))
        .ok_or_else(|| match &loaded.notice {
            Some(notice) => AppError::NotFound(notice.clone()),
            None => AppError::NotFound(format!("Startup '{name}' not found in sample data")),
        })?;

    let pre_rendered = row
        .get(PITCH_COLUMN)
        .map(str::trim)
        .filter(|pitch| !pitch.is_empty());

    let (pitch, source) = match pre_rendered {
        // Lossy on text that is already correct: "Curaçao" becomes "Curaao".
        Some(pitch) => (repair_text(pitch), PitchSource::PreRendered),
        None => (format_pitch(&row), PitchSource::Generated),
    };

    info!("Serving sample pitch for '{name}' ({source:?})");

    Ok(Json(SamplePitchResponse {
        startup_name: name,
        pitch,
        source,
    }))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::sample::cache::TableCache;

    fn bundled_sample() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/AutoPitchGPT_with_Pitches.csv")
    }

    #[test]
    fn test_bundled_pitches_match_the_template_after_repair() {
        let loaded = TableCache::new().load_sample(&bundled_sample());
        assert!(loaded.notice.is_none(), "notice: {:?}", loaded.notice);
        assert!(loaded.table.len() >= 5);

        for row in loaded.table.iter_rows() {
            let stored = row.get(PITCH_COLUMN).expect("sample rows carry a pitch");
            assert_eq!(repair_text(stored), format_pitch(&row));
        }
    }

    #[test]
    fn test_bundled_mojibake_row_is_repaired() {
        let loaded = TableCache::new().load_sample(&bundled_sample());
        let row = loaded
            .table
            .iter_rows()
            .find(|row| row.get(COL_NAME) == Some("Startup_4"))
            .unwrap();
        let stored = row.get(PITCH_COLUMN).unwrap();
        assert!(stored.contains("CuraÃ§ao"));
        assert!(repair_text(stored).contains("Curaçao"));
    }
}
