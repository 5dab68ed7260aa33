//! Report output for the final result set.

pub mod csv_report;

pub use csv_report::write_report;
