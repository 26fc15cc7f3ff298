//! Collection query request types.
//!
//! [`CollectionQuery`] is the caller-facing input for
//! `POST /v1/collections/{id}/query`. As with search, continuation fields
//! are engine inputs rather than wire fields. The filter grammar is
//! server-defined and passed through as raw JSON.

use serde::{Deserialize, Serialize};

use crate::pagination::Cursor;
use crate::search::SortDirection;

/// Orders query results by a named collection property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySort {
    /// Property name as defined by the collection's schema.
    pub property: String,
    pub direction: SortDirection,
}

/// Input for querying the documents of one collection.
///
/// The default value returns every document in the collection in the
/// server's default order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionQuery {
    /// Property filter in the server's filter grammar, passed through
    /// verbatim.
    pub filter: Option<serde_json::Value>,

    /// Orderings applied in sequence.
    pub sorts: Vec<QuerySort>,

    /// Resume iteration from a previously returned cursor.
    pub start_cursor: Option<Cursor>,

    /// Per-page result bound; the operator's configured default applies
    /// when absent.
    pub page_size: Option<u32>,
}

impl CollectionQuery {
    /// Filter documents by a raw filter expression.
    #[must_use]
    pub fn filtered(filter: serde_json::Value) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }
}
