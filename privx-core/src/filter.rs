use privx_protocol::{ClientType, TrustedClient};

/// Keeps the clients whose type equals `category`, preserving order.
///
/// The listing endpoint has no server-side type filter, so this runs over
/// the full collection. An empty result is not an error.
pub fn filter_by_type(clients: &[TrustedClient], category: &ClientType) -> Vec<TrustedClient> {
    clients
        .iter()
        .filter(|client| &client.client_type == category)
        .cloned()
        .collect()
}
