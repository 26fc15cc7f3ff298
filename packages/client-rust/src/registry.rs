//! Process-wide capability registry.
//!
//! Maps string keys to type-erased capability values and recovers the
//! concrete type at lookup. The two failure modes stay distinct so callers
//! can fail fast with a precise error: nothing registered under the key
//! ([`Error::CapabilityNotFound`]) versus registered with a different type
//! ([`Error::CapabilityMismatch`]).

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{Error, Result};

/// Keys the client registers at construction.
pub mod keys {
    /// Workspace search.
    pub const SEARCH: &str = "search";
    /// Collection document queries.
    pub const COLLECTION_QUERY: &str = "collection_query";
    /// Workspace member listing.
    pub const USERS: &str = "users";
}

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    /// Concrete type name of the registered value, kept for mismatch
    /// diagnostics after erasure.
    type_name: &'static str,
}

/// Type-erased capability store with typed retrieval.
///
/// Concurrent reads and writes are safe at any time; registration replaces
/// the previous binding for the key.
pub struct CapabilityRegistry {
    entries: DashMap<String, Entry>,
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Register `value` under `key`, replacing any previous binding.
    pub fn register<T: Send + Sync + 'static>(&self, key: impl Into<String>, value: T) {
        let key = key.into();
        self.entries.insert(
            key,
            Entry {
                value: Arc::new(value),
                type_name: std::any::type_name::<T>(),
            },
        );
    }

    /// Retrieve the capability registered under `key` as a `T`.
    ///
    /// # Errors
    ///
    /// [`Error::CapabilityNotFound`] if nothing is registered under `key`;
    /// [`Error::CapabilityMismatch`] if the binding exists with a different
    /// concrete type.
    pub fn get_typed<T: Send + Sync + 'static>(&self, key: &str) -> Result<Arc<T>> {
        let (value, registered) = match self.entries.get(key) {
            Some(entry) => (entry.value.clone(), entry.type_name),
            None => {
                return Err(Error::CapabilityNotFound {
                    key: key.to_owned(),
                })
            }
        };
        value.downcast::<T>().map_err(|_| Error::CapabilityMismatch {
            key: key.to_owned(),
            requested: std::any::type_name::<T>(),
            registered,
        })
    }

    /// Whether anything is registered under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of registered capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct SearchMarker {
        endpoint: &'static str,
    }

    #[test]
    fn register_and_get_typed() {
        let registry = CapabilityRegistry::new();
        registry.register(keys::SEARCH, SearchMarker { endpoint: "/v1/search" });

        let capability = registry.get_typed::<SearchMarker>(keys::SEARCH).unwrap();
        assert_eq!(capability.endpoint, "/v1/search");
    }

    #[test]
    fn missing_key_is_not_found() {
        let registry = CapabilityRegistry::new();
        let err = registry.get_typed::<SearchMarker>("absent").unwrap_err();
        assert!(matches!(err, Error::CapabilityNotFound { ref key } if key == "absent"));
    }

    #[test]
    fn wrong_type_is_mismatch_with_both_names() {
        let registry = CapabilityRegistry::new();
        registry.register(keys::SEARCH, 7_u32);

        let err = registry.get_typed::<String>(keys::SEARCH).unwrap_err();
        match err {
            Error::CapabilityMismatch {
                key,
                requested,
                registered,
            } => {
                assert_eq!(key, keys::SEARCH);
                assert!(requested.contains("String"));
                assert_eq!(registered, "u32");
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn rebinding_replaces_the_value() {
        let registry = CapabilityRegistry::new();
        registry.register("cap", 1_u32);
        registry.register("cap", "two".to_owned());

        assert!(registry.get_typed::<u32>("cap").is_err());
        assert_eq!(*registry.get_typed::<String>("cap").unwrap(), "two");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn contains_and_len_reflect_registrations() {
        let registry = CapabilityRegistry::new();
        assert!(registry.is_empty());
        registry.register(keys::USERS, ());
        assert!(registry.contains(keys::USERS));
        assert!(!registry.contains(keys::SEARCH));
        assert_eq!(registry.len(), 1);
    }
}
