//! The request seam between resource kinds and the operators.
//!
//! Each paginated resource implements [`PagedRequest`]: it knows its endpoint
//! shape and how one raw page decodes into items. The operators own
//! everything else: cursor threading, cancellation, buffering, and error
//! mapping. Most implementations decode through [`decode_envelope`], the
//! standard Folio list envelope.

use folio_core::{Page, PageEnvelope, PageParams};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::transport::{ApiRequest, RawResponse};

/// A resource kind that is fetched page by page.
pub trait PagedRequest: Send + Sync {
    /// The item type pages decode into.
    type Item: Send + 'static;

    /// Continuation state for the first fetch. The operator applies its
    /// configured default page size when this leaves `page_size` empty.
    fn initial_page(&self) -> PageParams;

    /// Describe the wire request for one page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if the request body cannot be serialized.
    fn page_request(&self, page: &PageParams) -> Result<ApiRequest>;

    /// Decode one raw page response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is not a valid page of items.
    fn decode_page(&self, raw: &RawResponse) -> Result<Page<Self::Item>>;
}

/// Decodes the standard Folio list envelope into a typed page.
///
/// # Errors
///
/// Returns [`Error::Decode`] naming whether the envelope itself or one of
/// its items failed to decode.
pub fn decode_envelope<T: DeserializeOwned>(raw: &RawResponse) -> Result<Page<T>> {
    let envelope: PageEnvelope = serde_json::from_slice(&raw.body)
        .map_err(|err| Error::decode("page envelope", err))?;
    let mut items = Vec::with_capacity(envelope.results.len());
    for result in envelope.results {
        items.push(serde_json::from_value(result).map_err(|err| Error::decode("page item", err))?);
    }
    Ok(Page {
        items,
        next_cursor: envelope.next_cursor,
    })
}

/// Decodes a single JSON resource body.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the body does not match `T`.
pub fn decode_body<T: DeserializeOwned>(raw: &RawResponse) -> Result<T> {
    serde_json::from_slice(&raw.body).map_err(|err| Error::decode("resource body", err))
}

/// Serializes a request body, naming the request kind in errors.
pub(crate) fn encode_body<T: Serialize>(context: &'static str, body: &T) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|err| Error::encode(context, err))
}
