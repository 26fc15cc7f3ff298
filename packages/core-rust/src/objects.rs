//! Workspace object model: documents, collections, users, and the tagged
//! search-result union.
//!
//! These types mirror the JSON objects returned by the Folio REST API.
//! The wire format is snake_case JSON; polymorphic payloads carry an
//! `object` discriminator field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Discriminators and references
// ---------------------------------------------------------------------------

/// The kind of workspace object a search can match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Document,
    Collection,
}

/// Where an object lives in the workspace hierarchy.
///
/// Tagged by `type` on the wire, e.g.
/// `{ "type": "collection", "collection_id": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParentRef {
    /// A top-level object parented directly by the workspace.
    Workspace,
    /// Nested under a collection (e.g. a document that is a collection row).
    Collection { collection_id: Uuid },
    /// Nested under another document.
    Document { document_id: Uuid },
}

// ---------------------------------------------------------------------------
// Workspace objects
// ---------------------------------------------------------------------------

/// A single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier, unique per workspace.
    pub id: Uuid,

    /// Plain-text title.
    pub title: String,

    /// Creation timestamp (RFC 3339, UTC).
    pub created_time: DateTime<Utc>,

    /// Timestamp of the most recent edit (RFC 3339, UTC).
    pub last_edited_time: DateTime<Utc>,

    /// Whether the document has been moved to the archive.
    #[serde(default)]
    pub archived: bool,

    /// Position in the workspace hierarchy.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent: Option<ParentRef>,

    /// Canonical browser URL.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
}

/// A collection: a queryable container of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Stable identifier, unique per workspace.
    pub id: Uuid,

    /// Plain-text title.
    pub title: String,

    /// Optional longer description.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    /// Creation timestamp (RFC 3339, UTC).
    pub created_time: DateTime<Utc>,

    /// Timestamp of the most recent edit (RFC 3339, UTC).
    pub last_edited_time: DateTime<Utc>,

    /// Whether the collection has been moved to the archive.
    #[serde(default)]
    pub archived: bool,

    /// Position in the workspace hierarchy.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent: Option<ParentRef>,
}

/// A workspace member or integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier, unique per workspace.
    pub id: Uuid,

    /// Display name, if the user has set one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,

    /// Avatar image URL.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub avatar_url: Option<String>,

    /// Email address; only present for person accounts and only when the
    /// calling integration has user-info scope.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,

    /// Whether this is a person or an integration bot.
    #[serde(rename = "type")]
    pub kind: UserKind,
}

/// Discriminates person accounts from integration bots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserKind {
    Person,
    Bot,
}

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

/// One search hit: either a document or a collection, discriminated by the
/// `object` field on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum SearchResult {
    Document(Document),
    Collection(Collection),
}

impl SearchResult {
    /// The matched object's identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            SearchResult::Document(doc) => doc.id,
            SearchResult::Collection(col) => col.id,
        }
    }

    /// The matched object's title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            SearchResult::Document(doc) => &doc.title,
            SearchResult::Collection(col) => &col.title,
        }
    }

    /// Which kind of object matched.
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self {
            SearchResult::Document(_) => ObjectKind::Document,
            SearchResult::Collection(_) => ObjectKind::Collection,
        }
    }
}
