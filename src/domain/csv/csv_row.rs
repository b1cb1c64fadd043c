// ============================================================
// CSV TABLE TYPES
// ============================================================
// Header plus data records of the reference dataset

use serde::{Deserialize, Serialize};

/// A single data record, fields kept in column order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CsvRecord {
    /// Line-based index of the record among data rows (0-based)
    pub index: usize,

    /// Raw field values
    pub fields: Vec<String>,
}

impl CsvRecord {
    pub fn new(index: usize, fields: Vec<String>) -> Self {
        Self { index, fields }
    }

    /// Value at a column position, trimmed. `None` when the record is short.
    pub fn get(&self, column: usize) -> Option<&str> {
        self.fields.get(column).map(|value| value.trim())
    }

    pub fn width(&self) -> usize {
        self.fields.len()
    }
}

/// A parsed CSV file: the header row and every non-blank data record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub records: Vec<CsvRecord>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, records: Vec<CsvRecord>) -> Self {
        Self { headers, records }
    }

    /// True when there is no header or no data record after it.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.records.is_empty()
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Records with at least as many fields as the header. Shorter rows are
    /// dropped without error.
    pub fn complete_records(&self) -> impl Iterator<Item = &CsvRecord> {
        let width = self.headers.len();
        self.records.iter().filter(move |record| record.width() >= width)
    }
}
