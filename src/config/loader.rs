//! Loading batch query files from TOML.

use crate::config::schema::{QueryConfig, ValidationError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read query file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("query file{} is not valid TOML: {source}", describe_file(.path))]
    Toml {
        path: Option<PathBuf>,
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("query file{} is invalid:\n{source}", describe_file(.path))]
    Validation {
        path: Option<PathBuf>,
        #[source]
        source: ValidationError,
    },
}

fn describe_file(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" {}", path.display()),
        None => String::new(),
    }
}

/// Parse and validate a query file held in memory.
pub fn load_from_str(input: &str) -> Result<QueryConfig, ConfigError> {
    parse(input, None)
}

/// Read, parse and validate the query file at `path`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<QueryConfig, ConfigError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading query file");

    let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&input, Some(path))
}

fn parse(input: &str, origin: Option<&Path>) -> Result<QueryConfig, ConfigError> {
    let path = || origin.map(Path::to_path_buf);

    let config: QueryConfig =
        toml_edit::de::from_str(input).map_err(|source| ConfigError::Toml {
            path: path(),
            source,
        })?;
    config.validate().map_err(|source| ConfigError::Validation {
        path: path(),
        source,
    })?;

    tracing::debug!(queries = config.queries.len(), "query file ok");
    Ok(config)
}
