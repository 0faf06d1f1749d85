//! Client type dispatch
//!
//! Maps the `--type` token given on the command line onto exactly one
//! backend operation family. Every recognized token owns its own backend
//! calls; an unrecognized token is rejected before anything is sent.

use std::fmt;
use std::io::Write;

use privx_protocol::{
    ApiError, Authorizer, CaCertificate, ClientType, DownloadHandle, TrustedClient, UserStore,
};
use tracing::debug;

use crate::error::CommandError;
use crate::filter::filter_by_type;

/// Trusted client categories accepted by `list` and `pre-config`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKind {
    Extender,
    WebProxy,
    Carrier,
}

impl ClientKind {
    pub const ALL: [ClientKind; 3] = [Self::Extender, Self::WebProxy, Self::Carrier];

    /// Parses a command line token. Tokens are matched exactly.
    pub fn parse(token: &str) -> Result<Self, CommandError> {
        match token {
            "extender" => Ok(Self::Extender),
            "webproxy" => Ok(Self::WebProxy),
            "carrier" => Ok(Self::Carrier),
            other => Err(CommandError::UnknownClientType(other.to_string())),
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Extender => "extender",
            Self::WebProxy => "webproxy",
            Self::Carrier => "carrier",
        }
    }

    /// Category the service uses for this kind.
    ///
    /// The token is upper-cased, except `webproxy`, which the service
    /// calls `ICAP`.
    pub fn category(self) -> ClientType {
        match self {
            Self::WebProxy => ClientType::new(ClientType::ICAP),
            other => ClientType::new(other.token().to_uppercase()),
        }
    }

    /// First half of the pre-configuration download: obtain a session.
    pub async fn request_handle<A>(self, api: &A, client_id: &str) -> Result<DownloadHandle, ApiError>
    where
        A: Authorizer + ?Sized,
    {
        match self {
            Self::Extender => api.extender_config_download_handle(client_id).await,
            Self::WebProxy => api.web_proxy_config_download_handle(client_id).await,
            Self::Carrier => api.carrier_config_download_handle(client_id).await,
        }
    }

    /// Second half: fetch the configuration with a session from
    /// [`ClientKind::request_handle`].
    pub async fn fetch_with_session<A>(
        self,
        api: &A,
        client_id: &str,
        session_id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError>
    where
        A: Authorizer + ?Sized,
    {
        match self {
            Self::Extender => api.download_extender_config(client_id, session_id, sink).await,
            Self::WebProxy => api.download_web_proxy_config(client_id, session_id, sink).await,
            Self::Carrier => api.download_carrier_config(client_id, session_id, sink).await,
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Categories that have certificate authorities (no carrier CA exists)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaKind {
    Extender,
    WebProxy,
}

impl CaKind {
    pub fn parse(token: &str) -> Result<Self, CommandError> {
        match ClientKind::parse(token)? {
            ClientKind::Extender => Ok(Self::Extender),
            ClientKind::WebProxy => Ok(Self::WebProxy),
            ClientKind::Carrier => Err(CommandError::UnknownClientType(token.to_string())),
        }
    }

    pub fn token(self) -> &'static str {
        ClientKind::from(self).token()
    }
}

impl From<CaKind> for ClientKind {
    fn from(kind: CaKind) -> Self {
        match kind {
            CaKind::Extender => ClientKind::Extender,
            CaKind::WebProxy => ClientKind::WebProxy,
        }
    }
}

/// Upper-cases a recognized token, mapping `webproxy` to `ICAP`.
pub fn normalize(token: &str) -> Result<ClientType, CommandError> {
    ClientKind::parse(token).map(ClientKind::category)
}

/// Lists the trusted clients of one kind, in the order the service sent them.
pub async fn list_trusted_clients<U>(
    api: &U,
    kind: ClientKind,
) -> Result<Vec<TrustedClient>, CommandError>
where
    U: UserStore + ?Sized,
{
    let clients = api.trusted_clients().await?;
    let category = kind.category();
    debug!(total = clients.len(), category = %category, "filtering trusted clients");
    Ok(filter_by_type(&clients, &category))
}

pub async fn list_ca_certificates<A>(
    api: &A,
    kind: CaKind,
    access_group_id: Option<&str>,
) -> Result<Vec<CaCertificate>, CommandError>
where
    A: Authorizer + ?Sized,
{
    let certificates = match kind {
        CaKind::Extender => api.extender_ca_certificates(access_group_id).await?,
        CaKind::WebProxy => api.web_proxy_ca_certificates(access_group_id).await?,
    };
    Ok(certificates)
}

pub async fn show_ca_certificate<A>(
    api: &A,
    kind: CaKind,
    id: &str,
) -> Result<CaCertificate, CommandError>
where
    A: Authorizer + ?Sized,
{
    let certificate = match kind {
        CaKind::Extender => api.extender_ca_certificate(id).await?,
        CaKind::WebProxy => api.web_proxy_ca_certificate(id).await?,
    };
    Ok(certificate)
}
