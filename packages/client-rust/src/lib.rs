//! Folio Client — capability-gated access to the Folio REST API.
//!
//! Build a [`Client`] from a [`ClientConfig`], then call through the
//! namespaces: [`Client::search`], [`Client::collections`],
//! [`Client::documents`], [`Client::users`]. Paginated endpoints offer the
//! whole result set ([`SearchNamespace::all`][namespaces::SearchNamespace::all]),
//! a single page, or a backpressured stream; every call takes a
//! cancellation token and stops at the next suspension point once it fires.

pub mod cancel;
pub mod client;
pub mod config;
pub mod error;
pub mod namespaces;
pub mod operator;
pub mod registry;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;

pub use cancel::cancel_after;
pub use client::{Client, PagedCapability};
pub use config::{CapabilityKind, ClientConfig, OperatorConfig, TransportConfig};
pub use error::{Error, Result};
pub use operator::{
    decode_body, decode_envelope, Operator, PagedRequest, PaginatedOperator, ResultStream,
};
pub use registry::CapabilityRegistry;
pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport};
