//! Scripted doubles shared by the unit tests in this crate.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use folio_core::{Cursor, Page, PageParams};

use crate::error::Result;
use crate::operator::request::{decode_envelope, encode_body, PagedRequest};
use crate::transport::{ApiRequest, RawResponse, Transport};

/// A list envelope body in the server's wire shape.
pub(crate) fn page_json(items: &[Value], next_cursor: Option<&str>) -> Value {
    json!({
        "results": items,
        "next_cursor": next_cursor,
        "has_more": next_cursor.is_some(),
    })
}

/// Fabricates an opaque cursor from a raw token.
pub(crate) fn cursor(token: &str) -> Cursor {
    serde_json::from_value(json!(token)).unwrap()
}

fn ok_response(body: Value) -> RawResponse {
    RawResponse {
        status: StatusCode::OK,
        body: Bytes::from(body.to_string()),
    }
}

struct Scripted {
    response: anyhow::Result<RawResponse>,
    delay: Option<Duration>,
}

/// Transport double that serves a queued script of canned responses and
/// records every request it sees.
pub(crate) struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
    calls: AtomicUsize,
    cancel_after: Mutex<Option<(usize, CancellationToken)>>,
}

impl MockTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            cancel_after: Mutex::new(None),
        })
    }

    fn push(&self, response: anyhow::Result<RawResponse>, delay: Option<Duration>) {
        self.script.lock().push_back(Scripted { response, delay });
    }

    pub(crate) fn push_page(&self, items: &[Value], next_cursor: Option<&str>) {
        self.push_json(page_json(items, next_cursor));
    }

    pub(crate) fn push_page_delayed(
        &self,
        items: &[Value],
        next_cursor: Option<&str>,
        delay: Duration,
    ) {
        self.push(Ok(ok_response(page_json(items, next_cursor))), Some(delay));
    }

    pub(crate) fn push_json(&self, body: Value) {
        self.push(Ok(ok_response(body)), None);
    }

    pub(crate) fn push_status(&self, status: u16, body: &str) {
        let response = RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body: Bytes::copy_from_slice(body.as_bytes()),
        };
        self.push(Ok(response), None);
    }

    pub(crate) fn push_transport_error(&self, message: &str) {
        self.push(Err(anyhow::anyhow!("{message}")), None);
    }

    /// Cancels `token` once the `call`th request (1-based) has been served.
    pub(crate) fn cancel_after_call(&self, call: usize, token: CancellationToken) {
        *self.cancel_after.lock() = Some((call, token));
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn request(&self, index: usize) -> ApiRequest {
        self.requests.lock()[index].clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> anyhow::Result<RawResponse> {
        self.requests.lock().push(request);
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        // Pop before the delay so no lock is held across an await.
        let scripted = self.script.lock().pop_front();
        let Some(scripted) = scripted else {
            anyhow::bail!("unscripted request #{call}")
        };
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        let fire = {
            let mut slot = self.cancel_after.lock();
            let due = matches!(slot.as_ref(), Some((after, _)) if *after == call);
            if due {
                slot.take()
            } else {
                None
            }
        };
        if let Some((_, token)) = fire {
            token.cancel();
        }
        scripted.response
    }
}

/// Minimal paged endpoint used to exercise the operators directly.
#[derive(Debug, Clone, Default)]
pub(crate) struct TestQuery {
    pub(crate) start_cursor: Option<Cursor>,
    pub(crate) page_size: Option<u32>,
}

impl PagedRequest for TestQuery {
    type Item = String;

    fn initial_page(&self) -> PageParams {
        PageParams {
            start_cursor: self.start_cursor.clone(),
            page_size: self.page_size,
        }
    }

    fn page_request(&self, page: &PageParams) -> Result<ApiRequest> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(flatten)]
            page: &'a PageParams,
        }
        let body = encode_body("test request", &Body { page })?;
        Ok(ApiRequest::post("/v1/test", body))
    }

    fn decode_page(&self, raw: &RawResponse) -> Result<Page<Self::Item>> {
        decode_envelope(raw)
    }
}
