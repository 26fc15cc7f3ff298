//! Workspace search: `POST /v1/search`.

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use folio_core::{Page, PageParams, SearchFilter, SearchRequest, SearchResult, SearchSort};

use crate::client::{Client, PagedCapability};
use crate::error::Result;
use crate::namespaces::paths;
use crate::operator::request::encode_body;
use crate::operator::{decode_envelope, PagedRequest, ResultStream};
use crate::registry::keys;
use crate::transport::{ApiRequest, RawResponse};

/// Workspace search calls, resolved through the [`keys::SEARCH`] capability.
pub struct SearchNamespace<'a> {
    client: &'a Client,
}

impl<'a> SearchNamespace<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn capability(&self) -> Result<Arc<PagedCapability<SearchResult>>> {
        self.client.registry().get_typed(keys::SEARCH)
    }

    /// Every hit across all pages, in server order. All-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns a capability error before any network activity when search is
    /// not registered, otherwise the first error the fetch loop hits.
    pub async fn all(
        &self,
        cancel: &CancellationToken,
        request: SearchRequest,
    ) -> Result<Vec<SearchResult>> {
        let capability = self.capability()?;
        let cancel = self.client.effective_cancel(cancel);
        capability.paginated().collect_all(&cancel, request).await
    }

    /// One page of hits plus the cursor to resume from.
    ///
    /// # Errors
    ///
    /// Returns a capability error before any network activity when search is
    /// not registered, otherwise any error from the single fetch.
    pub async fn first_page(
        &self,
        cancel: &CancellationToken,
        request: SearchRequest,
    ) -> Result<Page<SearchResult>> {
        let capability = self.capability()?;
        let cancel = self.client.effective_cancel(cancel);
        capability.one_shot().execute(&cancel, request).await
    }

    /// Hits as an incremental stream. A missing capability yields a
    /// one-element closed sequence carrying the error.
    #[must_use]
    pub fn stream(
        &self,
        cancel: &CancellationToken,
        request: SearchRequest,
    ) -> ResultStream<SearchResult> {
        match self.capability() {
            Ok(capability) => {
                let cancel = self.client.effective_cancel(cancel);
                capability.paginated().stream(&cancel, request)
            }
            Err(err) => ResultStream::failed(err),
        }
    }
}

impl PagedRequest for SearchRequest {
    type Item = SearchResult;

    fn initial_page(&self) -> PageParams {
        PageParams {
            start_cursor: self.start_cursor.clone(),
            page_size: self.page_size,
        }
    }

    fn page_request(&self, page: &PageParams) -> Result<ApiRequest> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            query: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            filter: Option<&'a SearchFilter>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sort: Option<&'a SearchSort>,
            #[serde(flatten)]
            page: &'a PageParams,
        }
        let body = encode_body(
            "search request",
            &Body {
                query: self.query.as_deref(),
                filter: self.filter.as_ref(),
                sort: self.sort.as_ref(),
                page,
            },
        )?;
        Ok(ApiRequest::post(paths::SEARCH, body))
    }

    fn decode_page(&self, raw: &RawResponse) -> Result<Page<Self::Item>> {
        decode_envelope(raw)
    }
}
