use async_trait::async_trait;
use privx_protocol::{ApiError, AwsToken, IdResponse, ResultSet, Role, RoleRef, RoleStore, User};

use crate::client::{PrivxClient, ROLE_STORE};

#[async_trait]
impl RoleStore for PrivxClient {
    async fn roles(&self) -> Result<Vec<Role>, ApiError> {
        let url = self.endpoint(ROLE_STORE, &["roles"])?;
        let set: ResultSet<Role> = self.get_json(url).await?;
        Ok(set.into_items())
    }

    async fn create_role(&self, role: &Role) -> Result<IdResponse, ApiError> {
        let url = self.endpoint(ROLE_STORE, &["roles"])?;
        self.post_json(url, role).await
    }

    async fn role(&self, id: &str) -> Result<Role, ApiError> {
        let url = self.endpoint(ROLE_STORE, &["roles", id])?;
        self.get_json(url).await
    }

    async fn update_role(&self, id: &str, role: &Role) -> Result<(), ApiError> {
        let url = self.endpoint(ROLE_STORE, &["roles", id])?;
        self.put_json(url, role).await
    }

    async fn delete_role(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(ROLE_STORE, &["roles", id])?;
        self.delete(url).await
    }

    async fn role_members(&self, id: &str) -> Result<Vec<User>, ApiError> {
        let url = self.endpoint(ROLE_STORE, &["roles", id, "members"])?;
        let set: ResultSet<User> = self.get_json(url).await?;
        Ok(set.into_items())
    }

    async fn resolve_roles(&self, names: &[String]) -> Result<Vec<RoleRef>, ApiError> {
        let url = self.endpoint(ROLE_STORE, &["roles", "resolve"])?;
        let set: ResultSet<RoleRef> = self.post_json(url, names).await?;
        Ok(set.into_items())
    }

    async fn aws_token(
        &self,
        id: &str,
        token_code: Option<&str>,
        ttl: u32,
    ) -> Result<AwsToken, ApiError> {
        let mut url = self.endpoint(ROLE_STORE, &["roles", id, "awstoken"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("ttl", &ttl.to_string());
            if let Some(code) = token_code.filter(|c| !c.is_empty()) {
                query.append_pair("tokencode", code);
            }
        }
        self.get_json(url).await
    }
}
