//! spendlens-ingest: bank statement CSV ingestion producing typed transactions.

pub mod csv_statement;

pub use csv_statement::{parse_statement_csv, parse_statement_reader};
