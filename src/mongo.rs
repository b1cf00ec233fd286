//! Driver-backed [`DocumentStore`] over a `mongodb::Database`.

use crate::error::Result;
use crate::indexes::IndexSpec;
use crate::store::{DocumentStore, IndexDescriptor, default_index_name};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};
use std::time::Duration;
use tracing::debug;

/// `DocumentStore` implementation backed by the MongoDB driver
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// The underlying database handle
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn index_options(spec: &IndexSpec) -> IndexOptions {
        let mut options = IndexOptions::default();
        options.name = spec.options.name.clone();
        options.unique = spec.options.unique;
        options.sparse = spec.options.sparse;
        options.expire_after = spec.options.expire_after_secs.map(Duration::from_secs);
        options
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        let names = self
            .database
            .list_collection_names()
            .filter(doc! { "name": name })
            .await?;
        Ok(!names.is_empty())
    }

    async fn create_collection(&self, name: &str) -> Result<()> {
        debug!(collection = name, "creating collection");
        self.database.create_collection(name).await?;
        Ok(())
    }

    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexDescriptor>> {
        let cursor = self
            .database
            .collection::<Document>(collection)
            .list_indexes()
            .await?;
        let models: Vec<IndexModel> = cursor.try_collect().await?;
        Ok(models.into_iter().map(descriptor_from).collect())
    }

    async fn create_index(&self, collection: &str, spec: &IndexSpec) -> Result<()> {
        let model = IndexModel::builder()
            .keys(spec.keys.clone())
            .options(Self::index_options(spec))
            .build();
        self.database
            .collection::<Document>(collection)
            .create_index(model)
            .await?;
        Ok(())
    }
}

fn descriptor_from(model: IndexModel) -> IndexDescriptor {
    let name = model
        .options
        .as_ref()
        .and_then(|options| options.name.clone())
        .unwrap_or_else(|| default_index_name(&model.keys));
    IndexDescriptor {
        name,
        keys: model.keys,
    }
}
