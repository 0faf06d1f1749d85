#![allow(dead_code)]

use async_trait::async_trait;
use privx_protocol::prelude::*;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::Mutex;

/// Call log shared by the mocks, in call order
#[derive(Default)]
pub struct CallLog(Mutex<Vec<String>>);

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct MockRoleStore {
    pub roles: Mutex<HashMap<String, Role>>,
    pub members: HashMap<String, Vec<User>>,
    /// Role ids for which every call fails with NotFound
    pub failing: HashSet<String>,
    pub log: CallLog,
}

impl MockRoleStore {
    pub fn with_roles(ids: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut roles = store.roles.lock().unwrap();
            for id in ids {
                roles.insert(
                    id.to_string(),
                    Role {
                        id: id.to_string(),
                        name: format!("role-{}", id),
                        ..Default::default()
                    },
                );
            }
        }
        store
    }

    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn with_members(mut self, id: &str, users: &[&str]) -> Self {
        self.members.insert(
            id.to_string(),
            users
                .iter()
                .map(|u| User {
                    id: u.to_string(),
                    principal: Some(u.to_string()),
                    ..Default::default()
                })
                .collect(),
        );
        self
    }

    fn check(&self, id: &str) -> Result<(), ApiError> {
        if self.failing.contains(id) {
            return Err(ApiError::NotFound(format!("role {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl RoleStore for MockRoleStore {
    async fn roles(&self) -> Result<Vec<Role>, ApiError> {
        self.log.record("roles");
        Ok(self.roles.lock().unwrap().values().cloned().collect())
    }

    async fn create_role(&self, role: &Role) -> Result<IdResponse, ApiError> {
        self.log.record(format!("create_role:{}", role.name));
        let id = format!("id-{}", role.name);
        self.roles.lock().unwrap().insert(id.clone(), role.clone());
        Ok(IdResponse { id })
    }

    async fn role(&self, id: &str) -> Result<Role, ApiError> {
        self.log.record(format!("role:{}", id));
        self.check(id)?;
        self.roles
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    async fn update_role(&self, id: &str, role: &Role) -> Result<(), ApiError> {
        self.log.record(format!("update_role:{}", id));
        self.check(id)?;
        self.roles.lock().unwrap().insert(id.to_string(), role.clone());
        Ok(())
    }

    async fn delete_role(&self, id: &str) -> Result<(), ApiError> {
        self.log.record(format!("delete_role:{}", id));
        self.check(id)?;
        self.roles
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    async fn role_members(&self, id: &str) -> Result<Vec<User>, ApiError> {
        self.log.record(format!("role_members:{}", id));
        self.check(id)?;
        Ok(self.members.get(id).cloned().unwrap_or_default())
    }

    async fn resolve_roles(&self, names: &[String]) -> Result<Vec<RoleRef>, ApiError> {
        self.log.record(format!("resolve_roles:{}", names.join("|")));
        Ok(names
            .iter()
            .map(|name| RoleRef {
                id: format!("id-{}", name),
                name: name.clone(),
            })
            .collect())
    }

    async fn aws_token(
        &self,
        id: &str,
        _token_code: Option<&str>,
        ttl: u32,
    ) -> Result<AwsToken, ApiError> {
        self.log.record(format!("aws_token:{}", id));
        self.check(id)?;
        Ok(AwsToken {
            access_key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: "session".to_string(),
            expiration: format!("ttl={}", ttl),
            coordinator: false,
        })
    }
}

#[derive(Default)]
pub struct MockUserStore {
    pub clients: Vec<TrustedClient>,
    pub fail_with: Option<u16>,
    pub log: CallLog,
}

impl MockUserStore {
    pub fn with_clients(clients: Vec<TrustedClient>) -> Self {
        Self {
            clients,
            ..Default::default()
        }
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn trusted_clients(&self) -> Result<Vec<TrustedClient>, ApiError> {
        self.log.record("trusted_clients");
        if let Some(status) = self.fail_with {
            return Err(ApiError::from_status(status, "trusted clients unavailable"));
        }
        Ok(self.clients.clone())
    }

    async fn trusted_client(&self, id: &str) -> Result<TrustedClient, ApiError> {
        self.log.record(format!("trusted_client:{}", id));
        self.clients
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }
}

/// Authorizer double. Config payloads are `"<kind> config for <client>"`.
#[derive(Default)]
pub struct MockAuthorizer {
    pub known_clients: HashSet<String>,
    /// Step 2 fails with this status after writing `partial` bytes
    pub download_failure: Option<(u16, usize)>,
    /// Step 2 fails as if the local sink refused the write
    pub sink_failure: bool,
    pub log: CallLog,
}

impl MockAuthorizer {
    pub fn knowing(clients: &[&str]) -> Self {
        Self {
            known_clients: clients.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing_sink(mut self) -> Self {
        self.sink_failure = true;
        self
    }

    pub fn failing_download(mut self, status: u16, partial: usize) -> Self {
        self.download_failure = Some((status, partial));
        self
    }

    fn handle(&self, kind: &str, client_id: &str) -> Result<DownloadHandle, ApiError> {
        self.log.record(format!("{}_handle:{}", kind, client_id));
        if !self.known_clients.contains(client_id) {
            return Err(ApiError::NotFound(format!("trusted client {}", client_id)));
        }
        Ok(DownloadHandle {
            session_id: format!("session-{}-{}", kind, client_id),
        })
    }

    fn download(
        &self,
        kind: &str,
        client_id: &str,
        session_id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        self.log
            .record(format!("{}_download:{}:{}", kind, client_id, session_id));
        if session_id != format!("session-{}-{}", kind, client_id) {
            return Err(ApiError::Unauthorized("unknown session".to_string()));
        }

        let body = format!("{} config for {}", kind, client_id);
        if self.sink_failure {
            return Err(ApiError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        if let Some((status, partial)) = self.download_failure {
            sink.write_all(&body.as_bytes()[..partial.min(body.len())])?;
            return Err(ApiError::from_status(status, "session expired"));
        }
        sink.write_all(body.as_bytes())?;
        Ok(body.len() as u64)
    }

    fn certificates(&self, kind: &str, group: Option<&str>) -> Vec<CaCertificate> {
        self.log
            .record(format!("{}_cas:{}", kind, group.unwrap_or("-")));
        vec![CaCertificate {
            id: format!("{}-ca", kind),
            access_group_id: group.map(str::to_string),
            ..Default::default()
        }]
    }

    fn crl(&self, kind: &str, id: &str, sink: &mut (dyn Write + Send)) -> Result<u64, ApiError> {
        self.log.record(format!("{}_crl:{}", kind, id));
        let body = format!("-----BEGIN X509 CRL----- {} {}", kind, id);
        sink.write_all(body.as_bytes())?;
        Ok(body.len() as u64)
    }
}

#[async_trait]
impl Authorizer for MockAuthorizer {
    async fn extender_ca_certificates(
        &self,
        access_group_id: Option<&str>,
    ) -> Result<Vec<CaCertificate>, ApiError> {
        Ok(self.certificates("extender", access_group_id))
    }

    async fn web_proxy_ca_certificates(
        &self,
        access_group_id: Option<&str>,
    ) -> Result<Vec<CaCertificate>, ApiError> {
        Ok(self.certificates("icap", access_group_id))
    }

    async fn extender_ca_certificate(&self, id: &str) -> Result<CaCertificate, ApiError> {
        self.log.record(format!("extender_ca:{}", id));
        Ok(CaCertificate {
            id: id.to_string(),
            ca_type: Some("EXTENDER".to_string()),
            ..Default::default()
        })
    }

    async fn web_proxy_ca_certificate(&self, id: &str) -> Result<CaCertificate, ApiError> {
        self.log.record(format!("icap_ca:{}", id));
        Ok(CaCertificate {
            id: id.to_string(),
            ca_type: Some("ICAP".to_string()),
            ..Default::default()
        })
    }

    async fn download_extender_certificate_crl(
        &self,
        id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        self.crl("extender", id, sink)
    }

    async fn download_web_proxy_certificate_crl(
        &self,
        id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        self.crl("icap", id, sink)
    }

    async fn extender_config_download_handle(
        &self,
        client_id: &str,
    ) -> Result<DownloadHandle, ApiError> {
        self.handle("extender", client_id)
    }

    async fn download_extender_config(
        &self,
        client_id: &str,
        session_id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        self.download("extender", client_id, session_id, sink)
    }

    async fn web_proxy_config_download_handle(
        &self,
        client_id: &str,
    ) -> Result<DownloadHandle, ApiError> {
        self.handle("icap", client_id)
    }

    async fn download_web_proxy_config(
        &self,
        client_id: &str,
        session_id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        self.download("icap", client_id, session_id, sink)
    }

    async fn carrier_config_download_handle(
        &self,
        client_id: &str,
    ) -> Result<DownloadHandle, ApiError> {
        self.handle("carrier", client_id)
    }

    async fn download_carrier_config(
        &self,
        client_id: &str,
        session_id: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ApiError> {
        self.download("carrier", client_id, session_id, sink)
    }
}
