//! Folio Core — workspace object model, pagination primitives, and wire
//! schemas shared by the Folio API client.

pub mod objects;
pub mod pagination;
pub mod query;
pub mod search;

pub use objects::{Collection, Document, ObjectKind, ParentRef, SearchResult, User, UserKind};
pub use pagination::{Cursor, Page, PageEnvelope, PageParams};
pub use query::{CollectionQuery, QuerySort};
pub use search::{SearchFilter, SearchRequest, SearchSort, SortDirection, SortTimestamp};
