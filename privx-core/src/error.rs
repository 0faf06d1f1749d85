use std::path::PathBuf;

use privx_protocol::ApiError;
use thiserror::Error;

/// Errors raised while carrying out a CLI operation
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("client type does not exist: {0}")]
    UnknownClientType(String),
    #[error("invalid input {}: {reason}", path.display())]
    InvalidInput { path: PathBuf, reason: String },
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures detected locally, before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::UnknownClientType(_) | Self::InvalidInput { .. })
    }
}
