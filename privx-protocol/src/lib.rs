//! Protocol definitions for the PrivX CLI
//!
//! This crate provides the wire data structures, the error taxonomy and the
//! traits that describe the remote PrivX services the CLI talks to.

pub mod roles;
pub mod trusted_clients;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use roles::{AwsToken, IdResponse, Role, RoleRef, RoleStore, User};
pub use trusted_clients::{
    Authorizer, CaCertificate, ClientType, DownloadHandle, TrustedClient, UserStore,
};

/// Categorized failure of a remote service call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    Decode(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Maps an unsuccessful HTTP status and its body onto a category.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            400 | 422 => Self::Validation(body),
            401 => Self::Unauthorized(body),
            403 => Self::Forbidden(body),
            404 => Self::NotFound(body),
            409 => Self::Conflict(body),
            _ => Self::Server { status, body },
        }
    }

    /// HTTP status this error was derived from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::Server { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) | Self::Io(_) => None,
        }
    }

    /// The service answers 403 both for "MFA required" and "user lacks role".
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }
}

/// List envelope returned by every PrivX collection endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet<T> {
    #[serde(default)]
    pub count: usize,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> ResultSet<T> {
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Common re-exports
pub mod prelude {
    pub use super::{
        ApiError, Authorizer, AwsToken, CaCertificate, ClientType, DownloadHandle, IdResponse,
        ResultSet, Role, RoleRef, RoleStore, TrustedClient, User, UserStore,
    };
}
