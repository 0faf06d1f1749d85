use std::io::Write;
use std::time::Duration;

use privx_protocol::ApiError;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;
use url::Url;

use crate::{Credentials, PrivxConfig, ProviderError};

pub(crate) const ROLE_STORE: &[&str] = &["role-store", "api", "v1"];
pub(crate) const USER_STORE: &[&str] = &["local-user-store", "api", "v1"];
pub(crate) const AUTHORIZER: &[&str] = &["authorizer", "api", "v1"];
const AUTH: &[&str] = &["auth", "api", "v1"];

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Authenticated HTTP client for the PrivX REST API.
///
/// OAuth credentials are exchanged for a bearer token on the first request;
/// the token is reused for the rest of the process.
pub struct PrivxClient {
    config: PrivxConfig,
    base_url: Url,
    http: reqwest::Client,
    token: OnceCell<String>,
}

impl PrivxClient {
    pub fn new(config: PrivxConfig) -> Result<Self, ProviderError> {
        let mut base_url = config.api_base_url.clone();
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidBaseUrl(base_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            config,
            base_url,
            http,
            token: OnceCell::new(),
        })
    }

    /// Builds `<base>/<service...>/<segments...>`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, service: &[&str], segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(service)
            .extend(segments);
        Ok(url)
    }

    async fn bearer(&self) -> Result<&str, ApiError> {
        match &self.config.credentials {
            Credentials::AccessToken { token } => Ok(token.as_str()),
            Credentials::OAuth { .. } => self
                .token
                .get_or_try_init(|| self.fetch_token())
                .await
                .map(String::as_str),
        }
    }

    async fn fetch_token(&self) -> Result<String, ApiError> {
        let Credentials::OAuth {
            api_client_id,
            api_client_secret,
            oauth_client_id,
            oauth_client_secret,
        } = &self.config.credentials
        else {
            return Err(ApiError::Unauthorized("no OAuth credentials configured".to_string()));
        };

        let url = self.endpoint(AUTH, &["oauth", "token"])?;
        debug!(url = %url, client_id = %api_client_id, "requesting access token");

        let response = self
            .http
            .post(url)
            .basic_auth(oauth_client_id, Some(oauth_client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", api_client_id.as_str()),
                ("password", api_client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;

        let token: TokenResponse = decode(check(response).await?).await?;
        Ok(token.access_token)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let token = self.bearer().await?;
        let response = request.bearer_auth(token).send().await.map_err(transport)?;
        check(response).await
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(method = "GET", path = url.path(), "privx request");
        decode(self.send(self.http.get(url)).await?).await
    }

    pub(crate) async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method = "POST", path = url.path(), "privx request");
        decode(self.send(self.http.post(url).json(body)).await?).await
    }

    /// POST without a request body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(method = "POST", path = url.path(), "privx request");
        decode(self.send(self.http.post(url)).await?).await
    }

    pub(crate) async fn put_json<B>(&self, url: Url, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        debug!(method = "PUT", path = url.path(), "privx request");
        self.send(self.http.put(url).json(body)).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<(), ApiError> {
        debug!(method = "DELETE", path = url.path(), "privx request");
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    /// Streams a response body into `sink`, returning the bytes written.
    pub(crate) async fn download(
        &self,
        url: Url,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        debug!(method = "GET", path = url.path(), "privx download");
        let mut response = self.send(self.http.get(url)).await?;

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(transport)? {
            sink.write_all(&chunk)?;
            written += chunk.len() as u64;
        }
        sink.flush()?;

        Ok(written)
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!(status = status.as_u16(), error = %e, "failed to read error body");
            reason_phrase(status)
        }
    };
    debug!(status = status.as_u16(), "privx request failed");
    Err(ApiError::from_status(status.as_u16(), body))
}

/// Stands in for an error body that could not be read.
fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().await.map_err(transport)?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}
