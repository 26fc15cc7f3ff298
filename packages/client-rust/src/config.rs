//! Client configuration types.

use std::time::Duration;

/// Top-level configuration for building a [`crate::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Folio API, without a trailing slash.
    pub base_url: String,
    /// Bearer token attached to every request. `None` sends unauthenticated
    /// requests, which only works against local fixtures.
    pub auth_token: Option<String>,
    /// Paginated capabilities registered at construction. Removing an entry
    /// makes the corresponding namespace fail fast with a capability error.
    pub capabilities: Vec<CapabilityKind>,
    /// Transport-level settings.
    pub transport: TransportConfig,
    /// Operator-level settings.
    pub operator: OperatorConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.foliohq.com".to_string(),
            auth_token: None,
            capabilities: CapabilityKind::all().to_vec(),
            transport: TransportConfig::default(),
            operator: OperatorConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Default configuration with the given bearer token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            auth_token: Some(token.into()),
            ..Self::default()
        }
    }
}

/// The paginated capabilities a client can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    /// Workspace search (`POST /v1/search`).
    Search,
    /// Collection document queries (`POST /v1/collections/{id}/query`).
    CollectionQuery,
    /// Workspace member listing (`GET /v1/users`).
    Users,
}

impl CapabilityKind {
    /// Every capability, in registration order.
    #[must_use]
    pub fn all() -> [CapabilityKind; 3] {
        [
            CapabilityKind::Search,
            CapabilityKind::CollectionQuery,
            CapabilityKind::Users,
        ]
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Maximum time to wait for a single HTTP round trip.
    pub request_timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("folio-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Operator settings shared by one-shot and paginated execution.
#[derive(Debug, Clone)]
pub struct OperatorConfig {
    /// Page size requested when the caller does not specify one.
    pub page_size: u32,
    /// Bounded buffer capacity, in items, between a stream's page-fetch task
    /// and its consumer. Also the upper bound on prefetched items.
    pub stream_buffer: usize,
    /// Deadline applied to each whole operator call, expiring as
    /// cancellation. `None` leaves only the transport's per-request timeout.
    pub call_timeout: Option<Duration>,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            stream_buffer: 100,
            call_timeout: None,
        }
    }
}
