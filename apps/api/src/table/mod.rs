//! Row-oriented CSV tables: loading, export, and the row view the formatter
//! reads fields through.

pub mod export;
pub mod loader;

/// An ordered header list plus rows of string cells.
///
/// Rows may be shorter or longer than the header list; unknown columns are
/// kept verbatim so export can reproduce the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    #[cfg(test)]
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row { table: self, cells })
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row { table: self, cells })
    }
}

/// Borrowed view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// The raw cell under `column`, or `None` if the column is absent or the
    /// row is too short to reach it.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.table.column_index(column)?;
        self.cells.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                vec!["1".into(), "2".into(), "3".into()],
                vec!["4".into()],
            ],
        )
    }

    #[test]
    fn test_row_get_by_column_name() {
        let table = sample();
        let row = table.row(0).unwrap();
        assert_eq!(row.get("b"), Some("2"));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_short_row_returns_none_past_its_end() {
        let table = sample();
        let row = table.row(1).unwrap();
        assert_eq!(row.get("a"), Some("4"));
        assert_eq!(row.get("c"), None);
    }

    #[test]
    fn test_iter_rows_visits_every_row() {
        let table = sample();
        assert_eq!(table.iter_rows().count(), 2);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert!(Table::default().is_empty());
    }
}
