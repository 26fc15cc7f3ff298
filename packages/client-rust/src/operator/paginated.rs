//! Paginated operator: one fetch loop behind two access patterns.
//!
//! [`PaginatedOperator::collect_all`] drains every page eagerly and returns
//! the whole result set or the first error. [`PaginatedOperator::stream`]
//! runs the same loop in a spawned task and hands items over a bounded
//! channel as pages arrive. Both drive a single [`Pager`], so cursor
//! threading, cancellation checks, and error mapping cannot drift between
//! the two patterns.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use folio_core::{Page, PageParams};

use crate::config::OperatorConfig;
use crate::error::{Error, Result};
use crate::operator::request::PagedRequest;
use crate::operator::stream::ResultStream;
use crate::transport::{fetch, Transport};

// ---------------------------------------------------------------------------
// Pager
// ---------------------------------------------------------------------------

/// Fused page iterator: yields `Some(Ok(page))` while the cursor chain
/// continues, `Some(Err(_))` exactly once on failure, then `None` forever.
struct Pager<R: PagedRequest> {
    transport: Arc<dyn Transport>,
    request: R,
    params: PageParams,
    pages_fetched: u32,
    finished: bool,
}

impl<R: PagedRequest> Pager<R> {
    fn new(transport: Arc<dyn Transport>, config: &OperatorConfig, request: R) -> Self {
        let mut params = request.initial_page();
        if params.page_size.is_none() {
            params.page_size = Some(config.page_size);
        }
        Self {
            transport,
            request,
            params,
            pages_fetched: 0,
            finished: false,
        }
    }

    async fn next_page(&mut self, cancel: &CancellationToken) -> Option<Result<Page<R::Item>>> {
        if self.finished {
            return None;
        }
        let outcome = self.fetch_page(cancel).await;
        match &outcome {
            Ok(page) => {
                self.pages_fetched += 1;
                debug!(
                    page = self.pages_fetched,
                    items = page.items.len(),
                    has_more = page.has_more(),
                    "page fetched"
                );
                match &page.next_cursor {
                    Some(cursor) => self.params.start_cursor = Some(cursor.clone()),
                    None => self.finished = true,
                }
            }
            Err(_) => self.finished = true,
        }
        Some(outcome)
    }

    async fn fetch_page(&self, cancel: &CancellationToken) -> Result<Page<R::Item>> {
        let wire = self.request.page_request(&self.params)?;
        let raw = fetch(self.transport.as_ref(), wire, cancel).await?;
        self.request.decode_page(&raw)
    }
}

// ---------------------------------------------------------------------------
// PaginatedOperator
// ---------------------------------------------------------------------------

/// Fetches every page of a paginated endpoint, eagerly or as a stream.
pub struct PaginatedOperator {
    transport: Arc<dyn Transport>,
    config: OperatorConfig,
}

impl PaginatedOperator {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: OperatorConfig) -> Self {
        Self { transport, config }
    }

    /// Fetch pages until the cursor chain ends and return every item in
    /// server order.
    ///
    /// All-or-nothing: the first failure discards items already fetched and
    /// returns the error. Cancellation is observed between pages and during
    /// each round trip.
    ///
    /// # Errors
    ///
    /// Returns the first encode, transport, status, decode, or cancellation
    /// error the fetch loop hits.
    pub async fn collect_all<R: PagedRequest>(
        &self,
        cancel: &CancellationToken,
        request: R,
    ) -> Result<Vec<R::Item>> {
        let mut pager = Pager::new(Arc::clone(&self.transport), &self.config, request);
        let mut items = Vec::new();
        while let Some(page) = pager.next_page(cancel).await {
            items.extend(page?.items);
        }
        Ok(items)
    }

    /// Fetch pages lazily, handing items over a bounded buffer as they
    /// arrive.
    ///
    /// Items already emitted stay delivered; a failure appends one terminal
    /// `Err` and closes the sequence. The terminal `Err(Error::Cancelled)`
    /// after cancellation is best-effort: when the consumer has stopped
    /// draining a full buffer, the sequence just closes. Dropping the stream
    /// stops the producer at its next send.
    pub fn stream<R>(&self, cancel: &CancellationToken, request: R) -> ResultStream<R::Item>
    where
        R: PagedRequest + 'static,
    {
        // mpsc panics on zero capacity; a one-item buffer is the floor.
        let (tx, rx) = mpsc::channel(self.config.stream_buffer.max(1));
        let mut pager = Pager::new(Arc::clone(&self.transport), &self.config, request);
        let cancel = cancel.clone();

        tokio::spawn(async move {
            while let Some(outcome) = pager.next_page(&cancel).await {
                let page = match outcome {
                    Ok(page) => page,
                    Err(err) => {
                        warn!(error = %err, "stream terminated");
                        if err.is_cancelled() {
                            let _ = tx.try_send(Err(err));
                        } else {
                            let _ = tx.send(Err(err)).await;
                        }
                        return;
                    }
                };
                for item in page.items {
                    tokio::select! {
                        // Prefer cancellation over delivery so a cancelled
                        // stream stops promptly instead of racing sends.
                        biased;
                        () = cancel.cancelled() => {
                            let _ = tx.try_send(Err(Error::Cancelled));
                            return;
                        }
                        sent = tx.send(Ok(item)) => {
                            if sent.is_err() {
                                // Consumer dropped the stream.
                                return;
                            }
                        }
                    }
                }
            }
        });

        ResultStream::new(rx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
