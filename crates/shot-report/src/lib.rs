//! Shot report generation library.
//!
//! Writes the curated shot table in the column layout the dispersion tool
//! imports (`Club, Type, Target, Total, Side`) and reads such files back.

mod error;
mod export;
mod read;

pub use error::{ExportError, Result};
pub use export::{
    DEFAULT_OUTPUT_DIR, export_file_name, export_table, format_value, write_export,
};
pub use read::read_export;
