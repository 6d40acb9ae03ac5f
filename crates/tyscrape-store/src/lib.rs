//! Flat-file sink for extracted product records.

mod csv_writer;
mod error;

pub use csv_writer::{write_csv, WriteSummary};
pub use error::StoreError;
