//! Axum route handlers for the upload path.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::startup::REQUIRED_COLUMNS;
use crate::pitch::formatter::{generate_pitches, PitchRow};
use crate::state::AppState;
use crate::table::export::{to_csv_bytes, with_pitch_column, DOWNLOAD_FILE_NAME};
use crate::table::loader::{read_upload, LoadedTable};
use crate::table::Table;

/// Multipart field carrying the CSV.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct PitchPreviewResponse {
    pub rows: Vec<PitchRow>,
    pub row_count: usize,
    pub error_count: usize,
    /// Required columns absent from the header row. Informational only:
    /// the affected rows still surface the failure through their pitch.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

fn missing_columns(table: &Table) -> Vec<String> {
    if table.headers.is_empty() {
        return Vec::new();
    }
    REQUIRED_COLUMNS
        .iter()
        .filter(|column| table.column_index(column).is_none())
        .map(|column| column.to_string())
        .collect()
}

async fn read_uploaded_table(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<LoadedTable, AppError> {
    let upload_error = |e: MultipartError| AppError::from_multipart(e, max_upload_bytes);

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let bytes = field.bytes().await.map_err(upload_error)?;
        info!("Received upload '{file_name}' ({} bytes)", bytes.len());
        return Ok(read_upload(&bytes));
    }

    Err(AppError::Validation(format!(
        "Upload must include a '{FILE_FIELD}' field containing a CSV file"
    )))
}

/// POST /api/v1/pitches
///
/// Generates a pitch for every uploaded row and returns the preview
/// (startup name + pitch). Failing rows carry the error string as their pitch.
pub async fn handle_preview_pitches(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PitchPreviewResponse>, AppError> {
    let loaded = read_uploaded_table(multipart, state.config.max_upload_bytes).await?;
    let batch = generate_pitches(&loaded.table);

    let missing_columns = missing_columns(&loaded.table);
    if !missing_columns.is_empty() {
        warn!("Upload lacks columns: {}", missing_columns.join(", "));
    }

    Ok(Json(PitchPreviewResponse {
        rows: batch.preview(&loaded.table),
        row_count: loaded.table.len(),
        error_count: batch.error_count,
        missing_columns,
        notice: loaded.notice,
    }))
}

/// POST /api/v1/pitches/download
///
/// Same input as the preview; returns the uploaded table plus a
/// `Generated_Pitch` column as a CSV attachment.
pub async fn handle_download_pitches(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let loaded = read_uploaded_table(multipart, state.config.max_upload_bytes).await?;
    if let Some(notice) = &loaded.notice {
        warn!("Exporting despite load notice: {notice}");
    }

    let batch = generate_pitches(&loaded.table);
    let exported = with_pitch_column(&loaded.table, &batch.pitches);
    let body = to_csv_bytes(&exported)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to write CSV export: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
            ),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_lists_absent_required_columns() {
        let mut headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        headers.retain(|h| h != "Funding_Stage" && h != "Tech_Stack");
        headers.push("Website".to_string());
        let table = Table::new(headers, vec![]);

        assert_eq!(missing_columns(&table), vec!["Funding_Stage", "Tech_Stack"]);
    }

    #[test]
    fn test_headerless_table_reports_nothing() {
        assert!(missing_columns(&Table::default()).is_empty());
    }
}
