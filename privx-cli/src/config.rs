//! CLI configuration management
//!
//! Settings come from a TOML file and are overridden by command-line flags
//! or their environment variables.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use dirs::home_dir;
use privx_providers::{Credentials, PrivxConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    pub api_base_url: Option<String>,
    pub access_token: Option<String>,
    pub api_client_id: Option<String>,
    pub api_client_secret: Option<String>,
    pub oauth_client_id: Option<String>,
    pub oauth_client_secret: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            access_token: None,
            api_client_id: None,
            api_client_secret: None,
            oauth_client_id: None,
            oauth_client_secret: None,
            timeout_seconds: PrivxConfig::DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "***REDACTED***");
        f.debug_struct("CliConfig")
            .field("api_base_url", &self.api_base_url)
            .field("access_token", &redact(&self.access_token))
            .field("api_client_id", &self.api_client_id)
            .field("api_client_secret", &redact(&self.api_client_secret))
            .field("oauth_client_id", &self.oauth_client_id)
            .field("oauth_client_secret", &redact(&self.oauth_client_secret))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Connection settings accepted on the command line
#[derive(Args, Default)]
pub struct ConnectionArgs {
    /// PrivX API base URL
    #[arg(long, global = true, env = "PRIVX_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Bearer token; takes precedence over OAuth client credentials
    #[arg(long, global = true, env = "PRIVX_API_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// API client ID (OAuth username)
    #[arg(long, global = true, env = "PRIVX_API_CLIENT_ID")]
    pub api_client_id: Option<String>,

    /// API client secret (OAuth password)
    #[arg(long, global = true, env = "PRIVX_API_CLIENT_SECRET", hide_env_values = true)]
    pub api_client_secret: Option<String>,

    /// OAuth client ID
    #[arg(long, global = true, env = "PRIVX_API_OAUTH_CLIENT_ID")]
    pub oauth_client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, global = true, env = "PRIVX_API_OAUTH_CLIENT_SECRET", hide_env_values = true)]
    pub oauth_client_secret: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "PRIVX_API_TIMEOUT")]
    pub timeout: Option<u64>,
}

impl CliConfig {
    /// Loads the configuration file.
    ///
    /// An explicitly given file must exist; a missing default file yields
    /// the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::config_file_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Applies command-line and environment values on top of the file.
    pub fn with_overrides(mut self, args: &ConnectionArgs) -> Self {
        fn take(slot: &mut Option<String>, value: &Option<String>) {
            if let Some(value) = value {
                *slot = Some(value.clone());
            }
        }

        take(&mut self.api_base_url, &args.api_base_url);
        take(&mut self.access_token, &args.access_token);
        take(&mut self.api_client_id, &args.api_client_id);
        take(&mut self.api_client_secret, &args.api_client_secret);
        take(&mut self.oauth_client_id, &args.oauth_client_id);
        take(&mut self.oauth_client_secret, &args.oauth_client_secret);
        if let Some(timeout) = args.timeout {
            self.timeout_seconds = timeout;
        }
        self
    }

    pub fn into_privx_config(self) -> Result<PrivxConfig> {
        let base = non_empty(self.api_base_url).ok_or_else(|| {
            anyhow!("no API base URL configured (use --api-base-url, PRIVX_API_BASE_URL or api_base_url in the config file)")
        })?;
        let api_base_url =
            Url::parse(&base).with_context(|| format!("Invalid API base URL: {}", base))?;

        let credentials = match non_empty(self.access_token) {
            Some(token) => Credentials::AccessToken { token },
            None => match (
                non_empty(self.api_client_id),
                non_empty(self.api_client_secret),
                non_empty(self.oauth_client_id),
                non_empty(self.oauth_client_secret),
            ) {
                (
                    Some(api_client_id),
                    Some(api_client_secret),
                    Some(oauth_client_id),
                    Some(oauth_client_secret),
                ) => Credentials::OAuth {
                    api_client_id,
                    api_client_secret,
                    oauth_client_id,
                    oauth_client_secret,
                },
                _ => {
                    return Err(anyhow!(
                        "no credentials configured (set an access token or all four API/OAuth client values)"
                    ))
                }
            },
        };

        Ok(PrivxConfig {
            api_base_url,
            credentials,
            timeout_seconds: self.timeout_seconds,
        })
    }

    fn config_file_path() -> PathBuf {
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("privx")
            .join("cli.toml")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
