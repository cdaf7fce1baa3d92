//! catalog_core - File-backed item catalog
//!
//! Loads armor, weapon and set-bonus definitions from a directory tree of
//! TOML or JSON files and serves them to the optimizer as an item lookup.

mod config;
mod registry;

pub use config::{CatalogFileConfig, FileFormat};
pub use registry::ItemCatalog;

use std::path::PathBuf;
use thiserror::Error;

/// Error loading catalog files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("JSON parse error in '{path}': {error}")]
    Json {
        error: serde_json::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}
