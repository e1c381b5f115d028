//! Mapping configuration loading.
//!
//! The configuration is read wholesale before any source file is touched.
//! A missing or malformed document aborts the run.

use std::fs;
use std::path::Path;

use shot_model::ShotConfig;
use tracing::debug;

use crate::error::ConfigError;

/// File name the setup wizard writes to.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Loads and validates the configuration at `path`.
pub fn load_config(path: &Path) -> Result<ShotConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let config = parse_config(path, &contents)?;
    debug!(
        path = %path.display(),
        club_mappings = config.club_mappings.len(),
        target_distances = config.target_distances.len(),
        "configuration loaded"
    );
    Ok(config)
}

/// Parses configuration text; `path` is only used for error context.
pub fn parse_config(path: &Path, contents: &str) -> Result<ShotConfig, ConfigError> {
    let config: ShotConfig =
        serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate().map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config)
}
