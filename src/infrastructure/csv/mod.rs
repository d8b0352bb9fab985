// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV decoding and parsing

mod csv_parser;

pub use csv_parser::{CsvParseAttempt, CsvParser};
