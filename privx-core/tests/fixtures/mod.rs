#![allow(dead_code)]

use privx_protocol::TrustedClient;

/// A mixed fleet in the order the service would list it
pub fn mixed_fleet() -> Vec<TrustedClient> {
    vec![
        TrustedClient::new("ext-1", "EXTENDER"),
        TrustedClient::new("proxy-1", "ICAP"),
        TrustedClient::new("carrier-1", "CARRIER"),
        TrustedClient::new("ext-2", "EXTENDER"),
        TrustedClient::new("agent-1", "PRIVX_AGENT"),
        TrustedClient::new("proxy-2", "ICAP"),
        TrustedClient::new("odd-1", "WEBPROXY"),
    ]
}

pub fn ids(clients: &[TrustedClient]) -> Vec<&str> {
    clients.iter().map(|c| c.id.as_str()).collect()
}
