// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Parsed table value object. No I/O, no async

mod csv_table;

pub use csv_table::CsvTable;
