//! Transport seam: how request descriptions become raw HTTP responses.
//!
//! [`Transport`] is the only place this crate touches the network. Operators
//! describe calls as [`ApiRequest`] values and decode [`RawResponse`] bodies;
//! everything between is swappable. [`HttpTransport`] is the production
//! implementation; tests substitute scripted doubles.

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Request / response values
// ---------------------------------------------------------------------------

/// A transport-agnostic description of one API request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the client's base URL, e.g. `/v1/search`.
    pub path: String,
    /// Query-string pairs, appended URL-encoded.
    pub query: Vec<(String, String)>,
    /// JSON body, present on POST endpoints.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// A GET request with no body.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// A POST request with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Attach query-string pairs.
    #[must_use]
    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }
}

/// An undecoded HTTP response: status plus raw body bytes.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

// ---------------------------------------------------------------------------
// Transport trait and the cancel-aware fetch helper
// ---------------------------------------------------------------------------

/// Pluggable HTTP layer.
///
/// Implementations perform exactly one round trip per call and report
/// connection-level failures through `anyhow`; HTTP status interpretation
/// happens above this seam.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> anyhow::Result<RawResponse>;
}

/// Sends `request`, racing the round trip against `cancel`, and maps
/// non-success statuses to [`Error::Status`].
///
/// The token is checked before the request leaves: a pre-cancelled call
/// performs no network activity. An in-flight request abandoned by
/// cancellation is dropped; the transport tears it down.
pub(crate) async fn fetch(
    transport: &dyn Transport,
    request: ApiRequest,
    cancel: &CancellationToken,
) -> Result<RawResponse> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    let raw = tokio::select! {
        () = cancel.cancelled() => return Err(Error::Cancelled),
        outcome = transport.send(request) => outcome?,
    };
    if raw.is_success() {
        Ok(raw)
    } else {
        Err(status_error(&raw))
    }
}

/// Builds [`Error::Status`] from a non-success response, preferring the
/// server's own `message` field over the raw body.
fn status_error(raw: &RawResponse) -> Error {
    let message = serde_json::from_slice::<serde_json::Value>(&raw.body)
        .ok()
        .and_then(|body| body.get("message")?.as_str().map(str::to_owned))
        .unwrap_or_else(|| {
            String::from_utf8_lossy(&raw.body)
                .chars()
                .take(256)
                .collect()
        });
    Error::Status {
        status: raw.status,
        message,
    }
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// Production transport over a pooled `reqwest` client.
#[derive(Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
    /// Base URL with any trailing slash stripped, so joining request paths
    /// is plain concatenation and a base with a path prefix keeps it.
    base_url: String,
    auth_token: Option<String>,
}

impl HttpTransport {
    /// Build a transport from client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the base URL does not parse or the
    /// underlying HTTP client cannot initialize (e.g. TLS backend).
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_owned();
        reqwest::Url::parse(&base_url)
            .map_err(|err| Error::Transport(anyhow::anyhow!("invalid base url {base_url:?}: {err}")))?;
        let http = reqwest::Client::builder()
            .timeout(config.transport.request_timeout)
            .user_agent(config.transport.user_agent.clone())
            .build()
            .map_err(|err| Error::Transport(anyhow::anyhow!("http client init: {err}")))?;
        Ok(Self {
            http,
            base_url,
            auth_token: config.auth_token.clone(),
        })
    }

    fn endpoint(&self, path: &str, query: &[(String, String)]) -> anyhow::Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|err| anyhow::anyhow!("invalid request path {path:?}: {err}"))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
            drop(pairs);
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> anyhow::Result<RawResponse> {
        let url = self.endpoint(&request.path, &request.query)?;
        let mut builder = self.http.request(request.method.clone(), url);
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            "request complete"
        );
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testutil::MockTransport;

    use super::*;

    fn transport_for(base_url: &str) -> HttpTransport {
        let config = ClientConfig {
            base_url: base_url.to_owned(),
            ..ClientConfig::default()
        };
        HttpTransport::new(&config).unwrap()
    }

    #[test]
    fn get_and_post_constructors() {
        let get = ApiRequest::get("/v1/users");
        assert_eq!(get.method, Method::GET);
        assert!(get.body.is_none());

        let post = ApiRequest::post("/v1/search", json!({ "query": "x" }));
        assert_eq!(post.method, Method::POST);
        assert_eq!(post.body, Some(json!({ "query": "x" })));
    }

    #[test]
    fn endpoint_appends_encoded_query() {
        let transport = transport_for("https://api.foliohq.com");
        let url = transport
            .endpoint(
                "/v1/users",
                &[("start_cursor".to_owned(), "a b+c".to_owned())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.foliohq.com/v1/users?start_cursor=a+b%2Bc"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_and_keeps_prefix() {
        let transport = transport_for("https://proxy.internal/folio/");
        let url = transport.endpoint("/v1/search", &[]).unwrap();
        assert_eq!(url.as_str(), "https://proxy.internal/folio/v1/search");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = ClientConfig {
            base_url: "not a url".to_owned(),
            ..ClientConfig::default()
        };
        let err = HttpTransport::new(&config).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn status_error_prefers_server_message() {
        let raw = RawResponse {
            status: StatusCode::BAD_REQUEST,
            body: Bytes::from(r#"{"message":"bad filter","code":"invalid"}"#),
        };
        match status_error(&raw) {
            Error::Status { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "bad filter");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn status_error_falls_back_to_raw_body() {
        let raw = RawResponse {
            status: StatusCode::BAD_GATEWAY,
            body: Bytes::from("upstream exploded"),
        };
        match status_error(&raw) {
            Error::Status { message, .. } => assert_eq!(message, "upstream exploded"),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_pre_cancelled_performs_no_call() {
        let mock = MockTransport::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = fetch(mock.as_ref(), ApiRequest::get("/v1/users"), &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn fetch_maps_non_success_status() {
        let mock = MockTransport::new();
        mock.push_status(404, r#"{"message":"no such document"}"#);

        let err = fetch(mock.as_ref(), ApiRequest::get("/v1/documents/x"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(
            matches!(err, Error::Status { status, ref message } if status == StatusCode::NOT_FOUND && message == "no such document")
        );
    }

    #[tokio::test]
    async fn fetch_wraps_transport_failures() {
        let mock = MockTransport::new();
        mock.push_transport_error("connection refused");

        let err = fetch(mock.as_ref(), ApiRequest::get("/v1/users"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("connection refused"));
    }
}
