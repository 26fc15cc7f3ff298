//! Workspace search request types.
//!
//! [`SearchRequest`] is the caller-facing input for `POST /v1/search`.
//! Continuation fields (`start_cursor`, `page_size`) are engine inputs, not
//! wire fields; the client assembles the actual request body and threads
//! continuation state itself, so this struct deliberately has no serde
//! representation of its own. The filter and sort leaves are wire types.

use serde::{Deserialize, Serialize};

use crate::objects::ObjectKind;
use crate::pagination::Cursor;

// ---------------------------------------------------------------------------
// Wire leaves
// ---------------------------------------------------------------------------

/// Sort direction for search and collection queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Which object timestamp search results are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortTimestamp {
    CreatedTime,
    LastEditedTime,
}

/// Orders search results by an object timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSort {
    pub direction: SortDirection,
    pub timestamp: SortTimestamp,
}

/// Restricts search hits to a single object kind.
///
/// `property` names the discriminator the filter applies to; the only value
/// the API accepts today is `"object"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub property: String,
    pub value: ObjectKind,
}

impl SearchFilter {
    /// Only match documents.
    #[must_use]
    pub fn documents() -> Self {
        Self {
            property: "object".to_owned(),
            value: ObjectKind::Document,
        }
    }

    /// Only match collections.
    #[must_use]
    pub fn collections() -> Self {
        Self {
            property: "object".to_owned(),
            value: ObjectKind::Collection,
        }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Input for a workspace search.
///
/// All fields are optional; the default value searches the whole workspace
/// in the server's default order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    /// Full-text query. Absent matches every object the caller can read.
    pub query: Option<String>,

    /// Restrict hits to one object kind.
    pub filter: Option<SearchFilter>,

    /// Result ordering.
    pub sort: Option<SearchSort>,

    /// Resume iteration from a previously returned cursor.
    pub start_cursor: Option<Cursor>,

    /// Per-page result bound; the operator's configured default applies
    /// when absent.
    pub page_size: Option<u32>,
}

impl SearchRequest {
    /// A plain full-text search over the whole workspace.
    #[must_use]
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn filter_serializes_object_discriminator() {
        let filter = SearchFilter::documents();
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({ "property": "object", "value": "document" })
        );
    }

    #[test]
    fn sort_uses_wire_names() {
        let sort = SearchSort {
            direction: SortDirection::Descending,
            timestamp: SortTimestamp::LastEditedTime,
        };
        assert_eq!(
            serde_json::to_value(sort).unwrap(),
            json!({ "direction": "descending", "timestamp": "last_edited_time" })
        );
    }

    #[test]
    fn text_helper_sets_only_the_query() {
        let req = SearchRequest::text("roadmap");
        assert_eq!(req.query.as_deref(), Some("roadmap"));
        assert_eq!(req.filter, None);
        assert_eq!(req.start_cursor, None);
    }
}
