//! Index reconciliation: diff desired indexes against what the database
//! reports, create the missing ones, and cap concurrent database work.

use crate::error::Result;
use crate::indexes::{CollectionIndexMap, IndexSpec};
use crate::store::{DocumentStore, IndexDescriptor};
use futures::future;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::{error, info};

/// Maximum number of database operations in flight across one reconciliation
///
/// Collection preparation, index creation, and cache refresh all compete for
/// the same slots.
pub const MAX_IN_FLIGHT_OPS: usize = 5;

/// Reconciles desired per-collection indexes against the database
///
/// Index lists are cached per collection for the lifetime of the reconciler
/// and refreshed after any collection that saw at least one index-creation
/// attempt. All collection-level and index-level failures are logged and
/// swallowed; reconciliation of the remaining work continues.
pub struct IndexReconciler<S> {
    store: S,
    limit: Arc<Semaphore>,
    cache: Mutex<HashMap<String, Vec<IndexDescriptor>>>,
}

impl<S: DocumentStore> IndexReconciler<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            limit: Arc::new(Semaphore::new(MAX_IN_FLIGHT_OPS)),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ensure every named index in `desired` exists, creating missing ones
    ///
    /// Collections are processed concurrently. Failures never propagate: a
    /// collection that cannot be resolved is skipped, an index that cannot be
    /// created is logged, and the rest of the batch proceeds.
    pub async fn ensure_indexes(&self, desired: &CollectionIndexMap) {
        let work = desired
            .iter()
            .map(|(collection, specs)| self.reconcile_collection(collection, specs));
        future::join_all(work).await;
    }

    async fn reconcile_collection(&self, collection: &str, specs: &[IndexSpec]) {
        let known = {
            let _permit = self.limit.acquire().await.expect("semaphore closed");
            self.known_indexes(collection).await
        };
        let known = match known {
            Ok(known) => known,
            Err(e) => {
                error!(collection, error = %e, "failed to resolve collection, skipping its indexes");
                return;
            }
        };
        let existing: HashSet<&str> = known.iter().map(|d| d.name.as_str()).collect();

        let attempts = specs
            .iter()
            .map(|spec| self.create_missing_index(collection, spec, &existing));
        let attempted = future::join_all(attempts).await.into_iter().any(|a| a);

        // Refresh after any attempt, successful or not; at worst an extra read.
        if attempted {
            self.refresh_cache(collection).await;
        }
    }

    /// Cached index list for a collection, resolving (or creating) the
    /// collection and populating the cache on first reference
    async fn known_indexes(&self, collection: &str) -> Result<Vec<IndexDescriptor>> {
        if let Some(entry) = self.cache.lock().await.get(collection).cloned() {
            return Ok(entry);
        }

        if !self.store.collection_exists(collection).await? {
            self.store.create_collection(collection).await?;
        }
        let indexes = self.store.list_indexes(collection).await?;
        self.cache
            .lock()
            .await
            .insert(collection.to_string(), indexes.clone());
        Ok(indexes)
    }

    /// Attempt creation of one index when its name is not already known
    ///
    /// Returns whether an attempt was made, regardless of outcome. A spec
    /// without a name never matches and is always attempted.
    async fn create_missing_index(
        &self,
        collection: &str,
        spec: &IndexSpec,
        existing: &HashSet<&str>,
    ) -> bool {
        if let Some(name) = spec.name() {
            if existing.contains(name) {
                return false;
            }
        }

        let _permit = self.limit.acquire().await.expect("semaphore closed");
        if let Err(e) = self.store.create_index(collection, spec).await {
            let index = spec.name().unwrap_or("<unnamed>");
            error!(collection, index, error = %e, "failed to create index");
        }
        true
    }

    async fn refresh_cache(&self, collection: &str) {
        let _permit = self.limit.acquire().await.expect("semaphore closed");
        match self.store.list_indexes(collection).await {
            Ok(fresh) => {
                let indexes = fresh.len();
                self.cache
                    .lock()
                    .await
                    .insert(collection.to_string(), fresh);
                info!(collection, indexes, "index cache refreshed after creation attempts");
            }
            Err(e) => {
                error!(collection, error = %e, "failed to refresh index list");
            }
        }
    }
}
