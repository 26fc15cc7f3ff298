//! Client façade: owns the transport, the capability registry, and the
//! configuration every namespace call reads.

use std::marker::PhantomData;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use folio_core::{Document, SearchResult, User};

use crate::cancel::cancel_after;
use crate::config::{CapabilityKind, ClientConfig, OperatorConfig};
use crate::error::Result;
use crate::namespaces::{
    CollectionsNamespace, DocumentsNamespace, SearchNamespace, UsersNamespace,
};
use crate::operator::{Operator, PaginatedOperator};
use crate::registry::{keys, CapabilityRegistry};
use crate::transport::{HttpTransport, Transport};

// ---------------------------------------------------------------------------
// PagedCapability
// ---------------------------------------------------------------------------

/// A paginated endpoint binding: the transport and operator settings for one
/// item type.
///
/// The client registers these under well-known [`keys`] at construction;
/// namespaces recover them through
/// [`CapabilityRegistry::get_typed`] and hand out operators from them.
pub struct PagedCapability<T> {
    transport: Arc<dyn Transport>,
    config: OperatorConfig,
    _items: PhantomData<fn() -> T>,
}

impl<T> PagedCapability<T> {
    pub(crate) fn new(transport: Arc<dyn Transport>, config: OperatorConfig) -> Self {
        Self {
            transport,
            config,
            _items: PhantomData,
        }
    }

    /// Operator that walks the whole cursor chain.
    #[must_use]
    pub fn paginated(&self) -> PaginatedOperator {
        PaginatedOperator::new(Arc::clone(&self.transport), self.config.clone())
    }

    /// Operator that fetches exactly one page.
    #[must_use]
    pub fn one_shot(&self) -> Operator {
        Operator::new(Arc::clone(&self.transport), self.config.clone())
    }
}

impl<T> std::fmt::Debug for PagedCapability<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedCapability")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Folio API client.
///
/// Construction wires the configured capabilities into the registry; the
/// namespace accessors ([`Client::search`], [`Client::collections`],
/// [`Client::documents`], [`Client::users`]) are the intended call surface.
pub struct Client {
    transport: Arc<dyn Transport>,
    registry: CapabilityRegistry,
    config: ClientConfig,
}

impl Client {
    /// Builds a client that talks HTTP to the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] if the base URL does not parse or
    /// the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(transport, config))
    }

    /// Builds a client over a caller-supplied transport. Used by tests and
    /// by callers that bring their own HTTP stack.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        let client = Self {
            transport,
            registry: CapabilityRegistry::new(),
            config,
        };
        client.register_capabilities();
        client
    }

    fn register_capabilities(&self) {
        for kind in &self.config.capabilities {
            match kind {
                CapabilityKind::Search => self.registry.register(
                    keys::SEARCH,
                    PagedCapability::<SearchResult>::new(
                        Arc::clone(&self.transport),
                        self.config.operator.clone(),
                    ),
                ),
                CapabilityKind::CollectionQuery => self.registry.register(
                    keys::COLLECTION_QUERY,
                    PagedCapability::<Document>::new(
                        Arc::clone(&self.transport),
                        self.config.operator.clone(),
                    ),
                ),
                CapabilityKind::Users => self.registry.register(
                    keys::USERS,
                    PagedCapability::<User>::new(
                        Arc::clone(&self.transport),
                        self.config.operator.clone(),
                    ),
                ),
            }
        }
        debug!(count = self.registry.len(), "capabilities registered");
    }

    /// Workspace search calls.
    #[must_use]
    pub fn search(&self) -> SearchNamespace<'_> {
        SearchNamespace::new(self)
    }

    /// Collection retrieval and document queries.
    #[must_use]
    pub fn collections(&self) -> CollectionsNamespace<'_> {
        CollectionsNamespace::new(self)
    }

    /// Single-document retrieval.
    #[must_use]
    pub fn documents(&self) -> DocumentsNamespace<'_> {
        DocumentsNamespace::new(self)
    }

    /// Workspace member listing.
    #[must_use]
    pub fn users(&self) -> UsersNamespace<'_> {
        UsersNamespace::new(self)
    }

    /// The capability registry. Callers can register their own bindings;
    /// re-registering a well-known key replaces the client's.
    #[must_use]
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// The caller's token, tightened by the configured per-call deadline
    /// when one is set.
    pub(crate) fn effective_cancel(&self, cancel: &CancellationToken) -> CancellationToken {
        match self.config.operator.call_timeout {
            Some(deadline) => cancel_after(cancel, deadline),
            None => cancel.clone(),
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
