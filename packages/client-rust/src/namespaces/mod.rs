//! Resource namespaces: the typed call surface of the client.
//!
//! Each namespace borrows the [`crate::Client`], resolves its capability
//! from the registry, and runs the shared operators. A missing or mistyped
//! capability fails fast before any network activity: blocking calls return
//! the error, streaming calls return a one-element closed sequence carrying
//! it.

pub mod collections;
pub mod documents;
pub mod search;
pub mod users;

pub use collections::CollectionsNamespace;
pub use documents::DocumentsNamespace;
pub use search::SearchNamespace;
pub use users::UsersNamespace;

/// Endpoint paths, relative to the configured base URL.
pub(crate) mod paths {
    use uuid::Uuid;

    pub const SEARCH: &str = "/v1/search";
    pub const USERS: &str = "/v1/users";

    pub fn collection_query(collection_id: Uuid) -> String {
        format!("/v1/collections/{collection_id}/query")
    }

    pub fn collection(collection_id: Uuid) -> String {
        format!("/v1/collections/{collection_id}")
    }

    pub fn document(document_id: Uuid) -> String {
        format!("/v1/documents/{document_id}")
    }
}
