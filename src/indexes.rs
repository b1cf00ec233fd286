//! Desired-index specifications and the options surface that carries them.

use mongodb::bson::Document;
use serde::Deserialize;
use std::collections::HashMap;

/// Desired indexes per collection: collection name -> index specs
pub type CollectionIndexMap = HashMap<String, Vec<IndexSpec>>;

/// A single desired index: a key pattern plus its options
///
/// Deserializes from the same shape the configuration surface uses:
///
/// ```json
/// { "keys": { "email": 1 }, "options": { "name": "email_idx", "unique": true } }
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct IndexSpec {
    /// Index key pattern, e.g. `{ "email": 1 }` or `{ "a": 1, "b": -1 }`
    pub keys: Document,

    /// Index options; `name` identifies the index for reconciliation
    #[serde(default)]
    pub options: IndexSpecOptions,
}

/// Typed index options
///
/// `name` is expected but not enforced: a spec without a name never matches a
/// cached index and is therefore always attempted, letting the server assign
/// its conventional auto-generated name.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct IndexSpecOptions {
    pub name: Option<String>,
    pub unique: Option<bool>,
    pub sparse: Option<bool>,
    #[serde(rename = "expireAfterSeconds")]
    pub expire_after_secs: Option<u64>,
}

impl IndexSpec {
    /// Create a spec for a key pattern with default options
    pub fn new(keys: Document) -> Self {
        Self {
            keys,
            options: IndexSpecOptions::default(),
        }
    }

    /// Set the index name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.options.name = Some(name.into());
        self
    }

    /// Mark the index unique
    pub fn unique(mut self) -> Self {
        self.options.unique = Some(true);
        self
    }

    /// Mark the index sparse
    pub fn sparse(mut self) -> Self {
        self.options.sparse = Some(true);
        self
    }

    /// Expire documents after the given number of seconds (TTL index)
    pub fn expire_after_secs(mut self, secs: u64) -> Self {
        self.options.expire_after_secs = Some(secs);
        self
    }

    /// The desired index name, if one was supplied
    pub fn name(&self) -> Option<&str> {
        self.options.name.as_deref()
    }
}

/// Options accepted by [`MongoClient::get_client`](crate::MongoClient::get_client)
///
/// The `collection-indexes` key matches the configuration surface consumed by
/// the client; when present, the named indexes are reconciled before the
/// database handle is returned.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SetupOptions {
    #[serde(rename = "collection-indexes")]
    pub collection_indexes: Option<CollectionIndexMap>,
}

impl SetupOptions {
    /// Reconcile the given indexes when the client handle is requested
    pub fn with_collection_indexes(mut self, indexes: CollectionIndexMap) -> Self {
        self.collection_indexes = Some(indexes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_index_spec_builder() {
        let spec = IndexSpec::new(doc! { "email": 1 })
            .with_name("email_idx")
            .unique();
        assert_eq!(spec.name(), Some("email_idx"));
        assert_eq!(spec.options.unique, Some(true));
        assert_eq!(spec.options.sparse, None);
    }

    #[test]
    fn test_index_spec_without_name() {
        let spec = IndexSpec::new(doc! { "email": 1 });
        assert_eq!(spec.name(), None);
    }

    #[test]
    fn test_setup_options_deserialize() {
        let json = r#"{
            "collection-indexes": {
                "users": [
                    { "keys": { "email": 1 }, "options": { "name": "email_idx", "unique": true } },
                    { "keys": { "created_at": 1 }, "options": { "name": "ttl_idx", "expireAfterSeconds": 3600 } }
                ]
            }
        }"#;

        let options: SetupOptions = serde_json::from_str(json).unwrap();
        let indexes = options.collection_indexes.unwrap();
        let users = &indexes["users"];
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name(), Some("email_idx"));
        assert_eq!(users[0].options.unique, Some(true));
        assert_eq!(users[1].options.expire_after_secs, Some(3600));
    }

    #[test]
    fn test_setup_options_deserialize_empty() {
        let options: SetupOptions = serde_json::from_str("{}").unwrap();
        assert!(options.collection_indexes.is_none());
    }

    #[test]
    fn test_index_spec_deserialize_missing_options() {
        let spec: IndexSpec = serde_json::from_str(r#"{ "keys": { "email": 1 } }"#).unwrap();
        assert_eq!(spec.name(), None);
    }
}
