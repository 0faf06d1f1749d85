//! Role store types and the remote role store contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ApiError;

/// A PrivX role.
///
/// Only the fields the CLI reasons about are typed; everything else the
/// service sends is carried in `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Role {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[validate(length(min = 1, message = "role name must not be empty"))]
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_group_id: Option<String>,
    #[serde(default)]
    pub permit_agent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_rules: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Member of a role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Name to ID resolution entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: String,
}

/// Temporary AWS credentials issued for a role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwsToken {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    #[serde(default)]
    pub expiration: String,
    #[serde(default)]
    pub coordinator: bool,
}

/// Remote role store operations
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn roles(&self) -> Result<Vec<Role>, ApiError>;
    async fn create_role(&self, role: &Role) -> Result<IdResponse, ApiError>;
    async fn role(&self, id: &str) -> Result<Role, ApiError>;
    async fn update_role(&self, id: &str, role: &Role) -> Result<(), ApiError>;
    async fn delete_role(&self, id: &str) -> Result<(), ApiError>;
    async fn role_members(&self, id: &str) -> Result<Vec<User>, ApiError>;
    /// Resolves all names in a single request.
    async fn resolve_roles(&self, names: &[String]) -> Result<Vec<RoleRef>, ApiError>;
    /// Fails with [`ApiError::Forbidden`] when MFA is required but `token_code`
    /// is missing or wrong, and when the caller does not hold the role.
    async fn aws_token(
        &self,
        id: &str,
        token_code: Option<&str>,
        ttl: u32,
    ) -> Result<AwsToken, ApiError>;
}
