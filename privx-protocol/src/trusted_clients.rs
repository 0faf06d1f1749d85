//! Trusted client, certificate authority and pre-configuration types

use std::fmt;
use std::io::Write;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Category of a trusted client as reported by the service.
///
/// Kept open so categories the CLI does not know about survive a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientType(String);

impl ClientType {
    pub const EXTENDER: &'static str = "EXTENDER";
    pub const ICAP: &'static str = "ICAP";
    pub const CARRIER: &'static str = "CARRIER";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ClientType {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ClientType {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A registered extender, web-proxy or carrier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrustedClient {
    pub id: String,
    #[serde(rename = "type", default)]
    pub client_type: ClientType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TrustedClient {
    pub fn new(id: impl Into<String>, client_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            client_type: ClientType::new(client_type),
            ..Default::default()
        }
    }
}

/// Certificate authority used to validate trusted clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaCertificate {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ca_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x509_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprints: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Single-use handle for a pre-configuration download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadHandle {
    pub session_id: String,
}

/// Local user store operations. The listing has no server-side type filter.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn trusted_clients(&self) -> Result<Vec<TrustedClient>, ApiError>;
    async fn trusted_client(&self, id: &str) -> Result<TrustedClient, ApiError>;
}

/// Authorizer operations.
///
/// Downloads stream into `sink` and return the number of bytes written.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn extender_ca_certificates(
        &self,
        access_group_id: Option<&str>,
    ) -> Result<Vec<CaCertificate>, ApiError>;
    async fn web_proxy_ca_certificates(
        &self,
        access_group_id: Option<&str>,
    ) -> Result<Vec<CaCertificate>, ApiError>;
    async fn extender_ca_certificate(&self, id: &str) -> Result<CaCertificate, ApiError>;
    async fn web_proxy_ca_certificate(&self, id: &str) -> Result<CaCertificate, ApiError>;

    async fn download_extender_certificate_crl(
        &self,
        id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError>;
    async fn download_web_proxy_certificate_crl(
        &self,
        id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError>;

    async fn extender_config_download_handle(
        &self,
        client_id: &str,
    ) -> Result<DownloadHandle, ApiError>;
    async fn download_extender_config(
        &self,
        client_id: &str,
        session_id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError>;

    async fn web_proxy_config_download_handle(
        &self,
        client_id: &str,
    ) -> Result<DownloadHandle, ApiError>;
    async fn download_web_proxy_config(
        &self,
        client_id: &str,
        session_id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError>;

    async fn carrier_config_download_handle(
        &self,
        client_id: &str,
    ) -> Result<DownloadHandle, ApiError>;
    async fn download_carrier_config(
        &self,
        client_id: &str,
        session_id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError>;
}
