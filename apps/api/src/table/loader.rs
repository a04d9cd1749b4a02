//! CSV loading for the bundled sample file and for user uploads.
//!
//! Nothing here fails the request: a missing file, an unreadable CSV or an
//! empty table all degrade to an empty table plus a notice for the user.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::{ByteRecord, ReaderBuilder};
use thiserror::Error;
use tracing::{debug, warn};

use crate::table::Table;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Sample file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// A table plus whatever the user should be told about how it was loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    pub table: Arc<Table>,
    pub notice: Option<String>,
}

impl LoadedTable {
    /// Folds a load result into the non-fatal shape the handlers render.
    /// `source` names the input in the empty-table notice.
    pub fn from_result(result: Result<Arc<Table>, LoadError>, source: &str) -> Self {
        match result {
            Ok(table) if table.is_empty() => {
                warn!("{source} contains no rows");
                Self {
                    table,
                    notice: Some(format!("No startup rows found in {source}.")),
                }
            }
            Ok(table) => Self {
                table,
                notice: None,
            },
            Err(e) => {
                warn!("Failed to load {source}: {e}");
                Self {
                    table: Arc::new(Table::default()),
                    notice: Some(e.to_string()),
                }
            }
        }
    }
}

/// Reads an uploaded CSV body.
pub fn read_upload(bytes: &[u8]) -> LoadedTable {
    let result = parse_csv(bytes).map(Arc::new);
    LoadedTable::from_result(result, "the uploaded file")
}

pub fn read_csv_file(path: &Path) -> Result<Table, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let table = parse_csv(file)?;
    debug!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Parses CSV with a header row. Rows may differ in length; cells that are
/// not valid UTF-8 are decoded lossily.
pub fn parse_csv<R: Read>(reader: R) -> Result<Table, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| {
            String::from_utf8_lossy(h)
                .trim_start_matches('\u{feff}')
                .trim()
                .to_string()
        })
        .collect();

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        rows.push(
            record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect(),
        );
    }

    Ok(Table::new(headers, rows))
}
