use std::io;
use std::path::PathBuf;

use crate::variant::PlatformVariant;

/// Failures reported by a UI toolkit backend.
#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    #[error("failed to start UI runtime '{program}': {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid entry document '{location}': {detail}")]
    InvalidDocument { location: String, detail: String },

    #[error("no application constructed before {operation}")]
    NoApplication { operation: &'static str },

    #[error("UI runtime I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ToolkitError {
    #[must_use]
    pub fn invalid_document(location: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidDocument {
            location: location.into(),
            detail: detail.into(),
        }
    }
}

/// Startup failures of the launcher.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("entry document '{document}' produced no root object ({variant} startup)")]
    MissingRoot {
        variant: PlatformVariant,
        document: String,
    },

    #[error("environment variable {key} cannot hold the value '{value}'")]
    InvalidEnvironment { key: &'static str, value: String },

    #[error("invalid launcher settings: {0}")]
    Settings(#[from] Box<figment::Error>),

    #[error("logging initialization failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Toolkit(#[from] ToolkitError),
}

impl LaunchError {
    #[must_use]
    pub fn missing_root(variant: PlatformVariant, document: impl Into<String>) -> Self {
        Self::MissingRoot {
            variant,
            document: document.into(),
        }
    }
}

impl From<figment::Error> for LaunchError {
    fn from(e: figment::Error) -> Self {
        Self::Settings(Box::new(e))
    }
}
