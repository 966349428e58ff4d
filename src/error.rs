use std::path::PathBuf;
use thiserror::Error;

use crate::kind::Kind;
use crate::types::SettingsPath;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("Invalid target {record}: {reason}")]
    InvalidTarget {
        record: &'static str,
        reason: String,
    },

    #[error("Field position {position} is out of range for {record} ({count} fields)")]
    FieldIndexOutOfRange {
        record: &'static str,
        position: usize,
        count: usize,
    },

    #[error("Unsupported kind '{kind}' for key '{key}'")]
    UnsupportedKind { key: String, kind: Kind },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml_edit::TomlError,
    },

    #[error("I/O error on {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not resolve a settings directory for {0:?}")]
    UnresolvedPath(SettingsPath),
}
