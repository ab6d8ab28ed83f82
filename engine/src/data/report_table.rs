// Untyped tabular view of a report, exactly as read from disk.

/// Header row plus string cells. Rows may be shorter than the header; missing
/// cells read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new(headers: Vec<String>) -> Self {
        ReportTable { headers, rows: Vec::new() }
    }

    /// Table with only the canonical report columns and no rows.
    pub fn empty_schema() -> Self {
        Self::new(shared::columns::EXPECTED.iter().map(|c| c.to_string()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column, comparing trimmed names case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.headers.iter().position(|h| h.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Returns the column index, appending an empty column when absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        match self.column_index(name) {
            Some(idx) => idx,
            None => {
                self.headers.push(name.to_string());
                self.headers.len() - 1
            }
        }
    }

    /// Appends a row given as `(column, value)` pairs. Columns not yet in the
    /// table are added; columns not mentioned stay empty.
    pub fn push_named(&mut self, values: &[(&str, &str)]) {
        let indexes: Vec<(usize, &str)> = values
            .iter()
            .map(|(name, value)| (self.ensure_column(name), *value))
            .collect();
        let mut row = vec![String::new(); self.headers.len()];
        for (idx, value) in indexes {
            row[idx] = value.to_string();
        }
        self.rows.push(row);
    }
}
