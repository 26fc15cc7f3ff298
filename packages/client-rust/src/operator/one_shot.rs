//! One-shot operator: a single bounded request, no pagination follow-up.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use folio_core::Page;

use crate::config::OperatorConfig;
use crate::error::Result;
use crate::operator::request::PagedRequest;
use crate::transport::{fetch, Transport};

/// Executes exactly one fetch for a resource kind and returns that page,
/// continuation cursor included but not followed.
///
/// The returned cursor is how callers resume: thread it into the next
/// request's `start_cursor`. Callers that want the full result set use
/// [`PaginatedOperator`](crate::operator::PaginatedOperator) instead.
pub struct Operator {
    transport: Arc<dyn Transport>,
    config: OperatorConfig,
}

impl Operator {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: OperatorConfig) -> Self {
        Self { transport, config }
    }

    /// Issue one request and decode the response page.
    ///
    /// All-or-nothing: any failure surfaces as the single `Err` with no
    /// partial items. Cancellation is observed before and during the round
    /// trip.
    ///
    /// # Errors
    ///
    /// Returns encode, transport, status, decode, or cancellation errors
    /// from the single fetch.
    pub async fn execute<R: PagedRequest>(
        &self,
        cancel: &CancellationToken,
        request: R,
    ) -> Result<Page<R::Item>> {
        let mut params = request.initial_page();
        if params.page_size.is_none() {
            params.page_size = Some(self.config.page_size);
        }
        let wire = request.page_request(&params)?;
        let raw = fetch(self.transport.as_ref(), wire, cancel).await?;
        request.decode_page(&raw)
    }
}
