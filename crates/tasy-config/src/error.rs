use std::path::PathBuf;

use tasy_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },

    #[error("duplicate exam code in configuration: {code}")]
    DuplicateExamCode { code: String },

    #[error("exam {code} has no lab column aliases")]
    NoAliases { code: String },

    #[error("invalid facility code for {name:?}: {value}")]
    InvalidFacilityCode { name: String, value: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}
