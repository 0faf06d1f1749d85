//! PrivX REST API client
//!
//! This crate implements the `privx-protocol` service traits on top of the
//! PrivX REST API: the role store, the local user store and the authorizer.

pub mod client;
mod authorizer;
mod rolestore;
mod userstore;

use std::fmt;
use thiserror::Error;
use url::Url;

pub use client::PrivxClient;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// How the client authenticates against PrivX
#[derive(Clone)]
pub enum Credentials {
    /// A bearer token obtained elsewhere
    AccessToken { token: String },
    /// API client credentials exchanged for a token with the password grant
    OAuth {
        api_client_id: String,
        api_client_secret: String,
        oauth_client_id: String,
        oauth_client_secret: String,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessToken { .. } => f
                .debug_struct("AccessToken")
                .field("token", &"***REDACTED***")
                .finish(),
            Self::OAuth {
                api_client_id,
                oauth_client_id,
                ..
            } => f
                .debug_struct("OAuth")
                .field("api_client_id", api_client_id)
                .field("api_client_secret", &"***REDACTED***")
                .field("oauth_client_id", oauth_client_id)
                .field("oauth_client_secret", &"***REDACTED***")
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrivxConfig {
    pub api_base_url: Url,
    pub credentials: Credentials,
    pub timeout_seconds: u64,
}

impl PrivxConfig {
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

    pub fn new(api_base_url: Url, credentials: Credentials) -> Self {
        Self {
            api_base_url,
            credentials,
            timeout_seconds: Self::DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Common traits and types used across the client
pub mod prelude {
    pub use super::{Credentials, PrivxClient, PrivxConfig, ProviderError};
    pub use privx_protocol::prelude::*;
}
