//! Winner reports
//!
//! Turns the winners of a drawn event into a results table in one of
//! several export formats.

pub mod error;
pub mod formats;
pub mod rows;

pub use error::{ReportError, ReportResult};
pub use formats::{render, ReportFormat};
pub use rows::{default_filename, WinnerReport, WinnerRow};
