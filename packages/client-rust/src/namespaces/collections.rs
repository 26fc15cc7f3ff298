//! Collections: `GET /v1/collections/{id}` and
//! `POST /v1/collections/{id}/query`.

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use folio_core::{Collection, CollectionQuery, Document, Page, PageParams, QuerySort};

use crate::client::{Client, PagedCapability};
use crate::error::Result;
use crate::namespaces::paths;
use crate::operator::request::encode_body;
use crate::operator::{decode_body, decode_envelope, PagedRequest, ResultStream};
use crate::registry::keys;
use crate::transport::{fetch, ApiRequest, RawResponse};

/// Collection calls. Queries are resolved through the
/// [`keys::COLLECTION_QUERY`] capability; plain retrieval is not gated.
pub struct CollectionsNamespace<'a> {
    client: &'a Client,
}

impl<'a> CollectionsNamespace<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn capability(&self) -> Result<Arc<PagedCapability<Document>>> {
        self.client.registry().get_typed(keys::COLLECTION_QUERY)
    }

    /// Fetch one collection by id.
    ///
    /// # Errors
    ///
    /// Returns transport, status, decode, or cancellation errors from the
    /// single fetch.
    pub async fn retrieve(
        &self,
        cancel: &CancellationToken,
        collection_id: Uuid,
    ) -> Result<Collection> {
        let cancel = self.client.effective_cancel(cancel);
        let raw = fetch(
            self.client.transport().as_ref(),
            ApiRequest::get(paths::collection(collection_id)),
            &cancel,
        )
        .await?;
        decode_body(&raw)
    }

    /// Every matching document across all pages, in server order.
    /// All-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns a capability error before any network activity when
    /// collection queries are not registered, otherwise the first error the
    /// fetch loop hits.
    pub async fn query_all(
        &self,
        cancel: &CancellationToken,
        collection_id: Uuid,
        query: CollectionQuery,
    ) -> Result<Vec<Document>> {
        let capability = self.capability()?;
        let cancel = self.client.effective_cancel(cancel);
        let request = CollectionQueryRequest {
            collection_id,
            query,
        };
        capability.paginated().collect_all(&cancel, request).await
    }

    /// One page of matching documents plus the cursor to resume from.
    ///
    /// # Errors
    ///
    /// Returns a capability error before any network activity when
    /// collection queries are not registered, otherwise any error from the
    /// single fetch.
    pub async fn query_first_page(
        &self,
        cancel: &CancellationToken,
        collection_id: Uuid,
        query: CollectionQuery,
    ) -> Result<Page<Document>> {
        let capability = self.capability()?;
        let cancel = self.client.effective_cancel(cancel);
        let request = CollectionQueryRequest {
            collection_id,
            query,
        };
        capability.one_shot().execute(&cancel, request).await
    }

    /// Matching documents as an incremental stream. A missing capability
    /// yields a one-element closed sequence carrying the error.
    #[must_use]
    pub fn query_stream(
        &self,
        cancel: &CancellationToken,
        collection_id: Uuid,
        query: CollectionQuery,
    ) -> ResultStream<Document> {
        match self.capability() {
            Ok(capability) => {
                let cancel = self.client.effective_cancel(cancel);
                let request = CollectionQueryRequest {
                    collection_id,
                    query,
                };
                capability.paginated().stream(&cancel, request)
            }
            Err(err) => ResultStream::failed(err),
        }
    }
}

/// A [`CollectionQuery`] bound to the collection it runs against.
struct CollectionQueryRequest {
    collection_id: Uuid,
    query: CollectionQuery,
}

impl PagedRequest for CollectionQueryRequest {
    type Item = Document;

    fn initial_page(&self) -> PageParams {
        PageParams {
            start_cursor: self.query.start_cursor.clone(),
            page_size: self.query.page_size,
        }
    }

    fn page_request(&self, page: &PageParams) -> Result<ApiRequest> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            filter: Option<&'a serde_json::Value>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sorts: Option<&'a [QuerySort]>,
            #[serde(flatten)]
            page: &'a PageParams,
        }
        let body = encode_body(
            "collection query",
            &Body {
                filter: self.query.filter.as_ref(),
                sorts: (!self.query.sorts.is_empty()).then_some(self.query.sorts.as_slice()),
                page,
            },
        )?;
        Ok(ApiRequest::post(
            paths::collection_query(self.collection_id),
            body,
        ))
    }

    fn decode_page(&self, raw: &RawResponse) -> Result<Page<Self::Item>> {
        decode_envelope(raw)
    }
}
