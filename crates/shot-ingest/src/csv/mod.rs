//! CSV reading utilities.

mod header;
mod reader;
mod table;

pub use reader::{ReadOptions, read_source_table};
pub use table::{SourceRow, SourceTable};
