//! Error type shared by every generation stage

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocgenError {
    #[error("Missing keys in META \"{tool}\". Needed keys: \"{}\"", .required.join(", "))]
    MissingKeys {
        tool: String,
        required: Vec<&'static str>,
    },

    #[error("Invalid name format for: '{name}'. Only allowed: A-Za-z0-9_-")]
    InvalidToolName { name: String },

    #[error("Short-command \"{short_command}\" at tool '{tool}' already exists in another tool")]
    DuplicateShortCommand { tool: String, short_command: String },

    #[error("Tool name '{name}' is already used by another tool")]
    DuplicateToolName { name: String },

    #[error("Malformed META line {line} in {path}: {message}")]
    MetaSyntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Key '{key}' declared more than once in {path}")]
    DuplicateMetaKey { path: PathBuf, key: String },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DocgenError>;

impl DocgenError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigParse { .. } | Self::ConfigKeyNotFound { .. } => 2,
            Self::ChecksumMismatch { .. } => 3,
            _ => 1,
        }
    }

    /// Validation failures abort the run without rolling back pages
    /// already written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingKeys { .. }
                | Self::InvalidToolName { .. }
                | Self::DuplicateShortCommand { .. }
                | Self::DuplicateToolName { .. }
                | Self::MetaSyntax { .. }
                | Self::DuplicateMetaKey { .. }
        )
    }
}
