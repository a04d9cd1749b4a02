use csv::WriterBuilder;

use crate::table::Table;

/// Column that carries the generated (or pre-rendered) pitch text.
pub const PITCH_COLUMN: &str = "Generated_Pitch";

/// Fixed file name offered for the download.
pub const DOWNLOAD_FILE_NAME: &str = "Generated_Investor_Pitches.csv";

/// Returns a copy of `table` with `pitches` in the [`PITCH_COLUMN`] column,
/// overwriting that column if the input already had one.
///
/// Rows are normalized to the header width first: short rows are padded
/// with empty cells, and trailing cells with no header are dropped.
pub fn with_pitch_column(table: &Table, pitches: &[String]) -> Table {
    let mut headers = table.headers.clone();
    let pitch_index = match table.column_index(PITCH_COLUMN) {
        Some(index) => index,
        None => {
            headers.push(PITCH_COLUMN.to_string());
            headers.len() - 1
        }
    };

    let rows = table
        .rows
        .iter()
        .zip(pitches)
        .map(|(cells, pitch)| {
            let mut row = cells.clone();
            row.resize(headers.len(), String::new());
            row[pitch_index] = pitch.clone();
            row
        })
        .collect();

    Table::new(headers, rows)
}

/// Serializes a table as UTF-8 CSV with a header row.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new(
            vec!["Startup_Name".into(), "Industry".into()],
            vec![
                vec!["Acme".into(), "Fintech".into()],
                vec!["Bolt".into()],
            ],
        )
    }

    #[test]
    fn test_pitch_column_is_appended() {
        let out = with_pitch_column(&table(), &["p1".to_string(), "p2".to_string()]);
        assert_eq!(out.headers, vec!["Startup_Name", "Industry", PITCH_COLUMN]);
        assert_eq!(out.rows[0], vec!["Acme", "Fintech", "p1"]);
        assert_eq!(out.rows[1], vec!["Bolt", "", "p2"]);
    }

    #[test]
    fn test_existing_pitch_column_is_overwritten() {
        let input = Table::new(
            vec!["Startup_Name".into(), PITCH_COLUMN.into()],
            vec![vec!["Acme".into(), "stale".into()]],
        );
        let out = with_pitch_column(&input, &["fresh".to_string()]);
        assert_eq!(out.headers.len(), 2);
        assert_eq!(out.rows[0][1], "fresh");
    }

    #[test]
    fn test_csv_bytes_quote_multiline_pitches() {
        let out = with_pitch_column(&table(), &["line one\nline two".to_string(), "x".to_string()]);
        let bytes = to_csv_bytes(&out).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("Startup_Name,Industry,Generated_Pitch\n"));
        assert!(text.contains("\"line one\nline two\""));
    }
}
