//! Documents: `GET /v1/documents/{id}`.

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use folio_core::Document;

use crate::client::Client;
use crate::error::Result;
use crate::namespaces::paths;
use crate::operator::decode_body;
use crate::transport::{fetch, ApiRequest};

/// Single-document calls. Not capability gated.
pub struct DocumentsNamespace<'a> {
    client: &'a Client,
}

impl<'a> DocumentsNamespace<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetch one document by id.
    ///
    /// # Errors
    ///
    /// Returns transport, status, decode, or cancellation errors from the
    /// single fetch.
    pub async fn retrieve(
        &self,
        cancel: &CancellationToken,
        document_id: Uuid,
    ) -> Result<Document> {
        let cancel = self.client.effective_cancel(cancel);
        let raw = fetch(
            self.client.transport().as_ref(),
            ApiRequest::get(paths::document(document_id)),
            &cancel,
        )
        .await?;
        decode_body(&raw)
    }
}
