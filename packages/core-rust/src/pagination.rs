//! Cursor pagination primitives shared by every paginated Folio endpoint.
//!
//! All of Folio's list endpoints speak the same envelope: a `results` array,
//! an optional `next_cursor` token, and a `has_more` flag. Cursors are opaque
//! server tokens; clients thread them back verbatim and never inspect or
//! fabricate them.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// An opaque pagination token issued by the server.
///
/// Cursors only come out of page responses ([`PageEnvelope::next_cursor`]);
/// there is no public constructor. Feeding one back through
/// [`PageParams::start_cursor`] resumes iteration after the page that
/// issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// The raw token, e.g. for logging or persisting a resume point.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        cursor.0
    }
}

// ---------------------------------------------------------------------------
// Page fetch parameters
// ---------------------------------------------------------------------------

/// Continuation parameters for a single page fetch.
///
/// Serializes into request bodies via `#[serde(flatten)]`; GET endpoints
/// render the same fields as query-string pairs through [`Self::query_pairs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageParams {
    /// Resume point from a previous page; absent means the first page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<Cursor>,

    /// Upper bound on results per page. The server may return fewer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl PageParams {
    /// Renders the present fields as query-string pairs for GET endpoints.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(cursor) = &self.start_cursor {
            pairs.push(("start_cursor".to_owned(), cursor.as_str().to_owned()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size".to_owned(), size.to_string()));
        }
        pairs
    }
}

// ---------------------------------------------------------------------------
// Decoded page and raw envelope
// ---------------------------------------------------------------------------

/// One decoded page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in server order.
    pub items: Vec<T>,

    /// Token for the page after this one; absent on the last page.
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// Whether the server reported another page after this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// The raw list envelope every paginated Folio endpoint returns.
///
/// `results` stays as raw JSON at this layer; decoding into a concrete item
/// type happens downstream, where the resource kind is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope {
    /// Raw result objects, one JSON value per item.
    pub results: Vec<serde_json::Value>,

    /// Token for the next page; `null` or absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next_cursor: Option<Cursor>,

    /// Server-reported continuation flag. `next_cursor` presence is the
    /// authoritative "more pages" signal; this field is informational.
    #[serde(default)]
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn cursor_is_a_bare_json_string() {
        let cursor: Cursor = serde_json::from_value(json!("tok_01HZX")).unwrap();
        assert_eq!(cursor.as_str(), "tok_01HZX");
        assert_eq!(serde_json::to_value(&cursor).unwrap(), json!("tok_01HZX"));
    }

    #[test]
    fn envelope_treats_null_and_absent_cursor_alike() {
        let with_null: PageEnvelope =
            serde_json::from_value(json!({ "results": [], "next_cursor": null, "has_more": false }))
                .unwrap();
        let absent: PageEnvelope = serde_json::from_value(json!({ "results": [] })).unwrap();
        assert_eq!(with_null.next_cursor, None);
        assert_eq!(absent.next_cursor, None);
        assert!(!absent.has_more);
    }

    #[test]
    fn envelope_keeps_result_order() {
        let envelope: PageEnvelope = serde_json::from_value(json!({
            "results": ["a", "b", "c"],
            "next_cursor": "n1",
            "has_more": true,
        }))
        .unwrap();
        assert_eq!(envelope.results, vec![json!("a"), json!("b"), json!("c")]);
        assert_eq!(envelope.next_cursor.unwrap().as_str(), "n1");
        assert!(envelope.has_more);
    }

    #[test]
    fn page_params_serialize_nothing_when_empty() {
        let body = serde_json::to_value(PageParams::default()).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn page_params_render_query_pairs_in_order() {
        let envelope: PageEnvelope =
            serde_json::from_value(json!({ "results": [], "next_cursor": "c 9/=" })).unwrap();
        let params = PageParams {
            start_cursor: envelope.next_cursor,
            page_size: Some(25),
        };
        assert_eq!(
            params.query_pairs(),
            vec![
                ("start_cursor".to_owned(), "c 9/=".to_owned()),
                ("page_size".to_owned(), "25".to_owned()),
            ]
        );
    }

    #[test]
    fn page_has_more_follows_cursor_presence() {
        let page = Page::<u32> {
            items: vec![],
            next_cursor: None,
        };
        assert!(!page.has_more());
    }

    proptest! {
        /// Cursor tokens are opaque: whatever string the server issues must
        /// come back byte-identical in the follow-up request body.
        #[test]
        fn cursor_tokens_thread_verbatim(token in "[ -~]{1,64}") {
            let envelope: PageEnvelope = serde_json::from_value(
                json!({ "results": [], "next_cursor": token, "has_more": true }),
            )
            .unwrap();
            let cursor = envelope.next_cursor.unwrap();
            prop_assert_eq!(cursor.as_str(), token.as_str());

            let params = PageParams { start_cursor: Some(cursor), page_size: None };
            let body = serde_json::to_value(&params).unwrap();
            prop_assert_eq!(&body["start_cursor"], &json!(token));
        }
    }
}
