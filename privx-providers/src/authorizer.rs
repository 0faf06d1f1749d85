use std::io::Write;

use async_trait::async_trait;
use privx_protocol::{ApiError, Authorizer, CaCertificate, DownloadHandle, ResultSet};

use crate::client::{PrivxClient, AUTHORIZER};

const EXTENDER: &str = "extender";
const ICAP: &str = "icap";
const CARRIER: &str = "carrier";

impl PrivxClient {
    async fn ca_certificates(
        &self,
        family: &str,
        access_group_id: Option<&str>,
    ) -> Result<Vec<CaCertificate>, ApiError> {
        let mut url = self.endpoint(AUTHORIZER, &[family, "cas"])?;
        if let Some(group) = access_group_id.filter(|g| !g.is_empty()) {
            url.query_pairs_mut().append_pair("access_group_id", group);
        }
        let set: ResultSet<CaCertificate> = self.get_json(url).await?;
        Ok(set.into_items())
    }

    async fn ca_certificate(&self, family: &str, id: &str) -> Result<CaCertificate, ApiError> {
        let url = self.endpoint(AUTHORIZER, &[family, "cas", id])?;
        self.get_json(url).await
    }

    async fn certificate_crl(
        &self,
        family: &str,
        id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        let url = self.endpoint(AUTHORIZER, &[family, "cas", id, "crl"])?;
        self.download(url, sink).await
    }

    async fn config_download_handle(
        &self,
        family: &str,
        client_id: &str,
    ) -> Result<DownloadHandle, ApiError> {
        let url = self.endpoint(AUTHORIZER, &[family, "conf", client_id])?;
        self.post_empty(url).await
    }

    async fn config_download(
        &self,
        family: &str,
        client_id: &str,
        session_id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        let url = self.endpoint(AUTHORIZER, &[family, "conf", client_id, session_id])?;
        self.download(url, sink).await
    }
}

#[async_trait]
impl Authorizer for PrivxClient {
    async fn extender_ca_certificates(
        &self,
        access_group_id: Option<&str>,
    ) -> Result<Vec<CaCertificate>, ApiError> {
        self.ca_certificates(EXTENDER, access_group_id).await
    }

    async fn web_proxy_ca_certificates(
        &self,
        access_group_id: Option<&str>,
    ) -> Result<Vec<CaCertificate>, ApiError> {
        self.ca_certificates(ICAP, access_group_id).await
    }

    async fn extender_ca_certificate(&self, id: &str) -> Result<CaCertificate, ApiError> {
        self.ca_certificate(EXTENDER, id).await
    }

    async fn web_proxy_ca_certificate(&self, id: &str) -> Result<CaCertificate, ApiError> {
        self.ca_certificate(ICAP, id).await
    }

    async fn download_extender_certificate_crl(
        &self,
        id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        self.certificate_crl(EXTENDER, id, sink).await
    }

    async fn download_web_proxy_certificate_crl(
        &self,
        id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        self.certificate_crl(ICAP, id, sink).await
    }

    async fn extender_config_download_handle(
        &self,
        client_id: &str,
    ) -> Result<DownloadHandle, ApiError> {
        self.config_download_handle(EXTENDER, client_id).await
    }

    async fn download_extender_config(
        &self,
        client_id: &str,
        session_id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        self.config_download(EXTENDER, client_id, session_id, sink).await
    }

    async fn web_proxy_config_download_handle(
        &self,
        client_id: &str,
    ) -> Result<DownloadHandle, ApiError> {
        self.config_download_handle(ICAP, client_id).await
    }

    async fn download_web_proxy_config(
        &self,
        client_id: &str,
        session_id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        self.config_download(ICAP, client_id, session_id, sink).await
    }

    async fn carrier_config_download_handle(
        &self,
        client_id: &str,
    ) -> Result<DownloadHandle, ApiError> {
        self.config_download_handle(CARRIER, client_id).await
    }

    async fn download_carrier_config(
        &self,
        client_id: &str,
        session_id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        self.config_download(CARRIER, client_id, session_id, sink).await
    }
}
