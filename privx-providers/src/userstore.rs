use async_trait::async_trait;
use privx_protocol::{ApiError, ResultSet, TrustedClient, UserStore};

use crate::client::{PrivxClient, USER_STORE};

#[async_trait]
impl UserStore for PrivxClient {
    async fn trusted_clients(&self) -> Result<Vec<TrustedClient>, ApiError> {
        let url = self.endpoint(USER_STORE, &["trusted-clients"])?;
        let set: ResultSet<TrustedClient> = self.get_json(url).await?;
        Ok(set.into_items())
    }

    async fn trusted_client(&self, id: &str) -> Result<TrustedClient, ApiError> {
        let url = self.endpoint(USER_STORE, &["trusted-clients", id])?;
        self.get_json(url).await
    }
}
