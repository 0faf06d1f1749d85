//! File downloads: revocation lists and pre-configurations
//!
//! Both go through [`StagedFile`], so the destination only appears once the
//! whole body has been written.

use std::path::{Path, PathBuf};

use privx_protocol::{ApiError, Authorizer};
use serde::Serialize;
use tracing::{debug, info};

use crate::dispatch::{CaKind, ClientKind};
use crate::error::CommandError;
use crate::staged::StagedFile;

/// Outcome of a completed download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadReport {
    pub client_id: String,
    pub client_type: &'static str,
    pub file: PathBuf,
    pub bytes: u64,
}

/// Requests a download handle for `client_id` and fetches the
/// pre-configuration with it into `dest`.
///
/// The handle is single use. Nothing is retried: a failure in either step
/// aborts the download and `dest` is left as it was.
pub async fn download_pre_config<A>(
    api: &A,
    kind: ClientKind,
    client_id: &str,
    dest: &Path,
) -> Result<DownloadReport, CommandError>
where
    A: Authorizer + ?Sized,
{
    // Staged before any request so an unwritable destination does not burn a session.
    let mut staged = StagedFile::create(dest)?;

    let handle = kind.request_handle(api, client_id).await?;
    debug!(client_id, kind = %kind, "download handle issued");

    let bytes = kind
        .fetch_with_session(api, client_id, &handle.session_id, staged.writer())
        .await
        .map_err(|e| local_io(e, dest))?;
    let file = staged.commit()?;

    info!(client_id, kind = %kind, bytes, file = %file.display(), "pre-configuration downloaded");
    Ok(DownloadReport {
        client_id: client_id.to_string(),
        client_type: kind.token(),
        file,
        bytes,
    })
}

/// Downloads the certificate revocation list of a CA into `dest`.
pub async fn download_crl<A>(
    api: &A,
    kind: CaKind,
    ca_id: &str,
    dest: &Path,
) -> Result<DownloadReport, CommandError>
where
    A: Authorizer + ?Sized,
{
    let mut staged = StagedFile::create(dest)?;

    let bytes = match kind {
        CaKind::Extender => {
            api.download_extender_certificate_crl(ca_id, staged.writer())
                .await
        }
        CaKind::WebProxy => {
            api.download_web_proxy_certificate_crl(ca_id, staged.writer())
                .await
        }
    }
    .map_err(|e| local_io(e, dest))?;
    let file = staged.commit()?;

    info!(ca_id, kind = kind.token(), bytes, file = %file.display(), "revocation list downloaded");
    Ok(DownloadReport {
        client_id: ca_id.to_string(),
        client_type: kind.token(),
        file,
        bytes,
    })
}

/// Write failures on the staged file are local, whatever layer reports them.
fn local_io(err: ApiError, dest: &Path) -> CommandError {
    match err {
        ApiError::Io(source) => CommandError::io(dest, source),
        other => CommandError::Api(other),
    }
}
