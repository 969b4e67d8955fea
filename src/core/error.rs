//! Error types for Soundboard

use thiserror::Error;

/// Result type alias using Soundboard's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Soundboard error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Clip directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template pattern matches no files: {pattern}")]
    TemplateNotFound { pattern: String },

    #[error("Invalid template pattern: {0}")]
    TemplatePattern(#[from] glob::PatternError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for failures while locating, parsing or executing the page template
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            Error::TemplateNotFound { .. } | Error::TemplatePattern(_) | Error::Template(_)
        )
    }

    /// True for filesystem failures (walking the clip directory, reading files)
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Walk(_) | Error::Io(_))
    }

    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        if self.is_template_error() {
            "template"
        } else if self.is_io_error() {
            "io"
        } else {
            "internal"
        }
    }
}
