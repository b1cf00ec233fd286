//! The seam between the reconciler and the database driver.

use crate::error::Result;
use crate::indexes::IndexSpec;
use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

/// A known index on a collection, as reported by the database
#[derive(Clone, Debug, PartialEq)]
pub struct IndexDescriptor {
    /// Index name (server-assigned when the spec carried none)
    pub name: String,
    /// Index key pattern
    pub keys: Document,
}

/// Operations the reconciler needs from the underlying document database
///
/// The production implementation is [`MongoStore`](crate::MongoStore); tests
/// substitute an instrumented in-memory store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Whether a collection with this exact name exists
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    /// Create a collection by name
    async fn create_collection(&self, name: &str) -> Result<()>;

    /// List the indexes currently present on a collection
    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexDescriptor>>;

    /// Create a single index from its spec
    async fn create_index(&self, collection: &str, spec: &IndexSpec) -> Result<()>;
}

/// Derive the conventional MongoDB index name from a key pattern
///
/// `{ "a": 1, "b": -1 }` becomes `a_1_b_-1`, matching what the server assigns
/// when an index is created without an explicit name.
pub(crate) fn default_index_name(keys: &Document) -> String {
    keys.iter()
        .map(|(field, direction)| match direction {
            Bson::String(s) => format!("{}_{}", field, s),
            other => format!("{}_{}", field, other),
        })
        .collect::<Vec<_>>()
        .join("_")
}
