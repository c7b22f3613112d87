// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Spreadsheet export parsing and encoding detection

mod csv_parser;

pub use csv_parser::CsvParser;
