// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Fetching, decoding and parsing of the reference dataset

mod csv_parser;
mod source;

pub use csv_parser::CsvParser;
pub use source::{source_for, CsvSource, FileCsvSource, HttpCsvSource, SourceLocation};
