// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Parsed reference-table types. No I/O, no async.

mod csv_row;

pub use csv_row::{CsvRecord, CsvTable};
