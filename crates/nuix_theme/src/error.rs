//! Theme errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading, activating or reading themes
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme `{theme_id}` defines token `{name}` more than once")]
    DuplicateToken { theme_id: String, name: String },

    #[error("theme `{theme_id}` is missing required token `{name}`")]
    MissingRequiredToken { theme_id: String, name: String },

    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    #[error("token `{name}` is not defined by theme `{theme_id}`")]
    UndefinedToken { theme_id: String, name: String },

    #[error("invalid value `{value}` for token `{name}`")]
    InvalidValue { name: String, value: String },

    #[error("no themes to load")]
    NoThemes,

    #[error("failed to parse theme document: {0}")]
    Parse(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
