//! Export functionality for Outlay data

pub mod csv;

pub use csv::{export_expenses_csv, export_file_name};
