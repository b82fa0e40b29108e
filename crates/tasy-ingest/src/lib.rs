//! Table ingestion for lab result and patient registry exports.

pub mod csv_table;
pub mod error;

pub use csv_table::{CsvTable, read_csv_table, read_csv_table_from_reader, sniff_delimiter};
pub use error::IngestError;
