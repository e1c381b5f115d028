//! Shot data ingestion utilities.
//!
//! This crate loads the two inputs of a transpile run:
//!
//! - **Source CSV**: the launch-monitor export, with a header row and an
//!   optional units row directly below it
//! - **Configuration**: the JSON mapping document produced by the setup wizard
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use shot_ingest::{ReadOptions, load_config, read_source_table};
//!
//! let config = load_config(Path::new("config.json"))?;
//! let table = read_source_table(Path::new("data/garmin/session.csv"), &ReadOptions::default())?;
//! ```

mod config;
mod csv;
mod error;

// === Error Types ===
pub use error::{ConfigError, IngestError, Result};

// === CSV Reading ===
pub use csv::{ReadOptions, SourceRow, SourceTable, read_source_table};

// === Configuration ===
pub use config::{DEFAULT_CONFIG_FILE, load_config, parse_config};
