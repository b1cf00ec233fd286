//! Connection and index-management helper in front of the MongoDB driver.
//!
//! This library lazily establishes a single shared connection, exposes a
//! handle to a named database, and ensures that a caller-supplied set of
//! per-collection indexes exists — creating missing indexes with bounded
//! concurrency and tolerating individual creation failures without aborting
//! the batch.
//!
//! # Examples
//!
//! ## Connect and reconcile indexes
//!
//! ```ignore
//! use mongo_client::{IndexSpec, MongoClient, MongoConfig};
//! use mongodb::bson::doc;
//!
//! let client = MongoClient::new(MongoConfig::new("mongodb://localhost:27017", "mydb"));
//!
//! let desired = [(
//!     "users".to_string(),
//!     vec![IndexSpec::new(doc! { "email": 1 }).with_name("email_idx").unique()],
//! )]
//! .into();
//! client.ensure_indexes(&desired).await?;
//!
//! let db = client.database().await?;
//! let users = db.collection::<mongodb::bson::Document>("users");
//! ```
//!
//! ## Drive reconciliation from configuration
//!
//! ```ignore
//! use mongo_client::{MongoClient, SetupOptions};
//!
//! let options: SetupOptions = serde_json::from_str(
//!     r#"{ "collection-indexes": {
//!         "users": [{ "keys": { "email": 1 }, "options": { "name": "email_idx" } }]
//!     } }"#,
//! )?;
//!
//! let client = MongoClient::from_env()?;
//! let db = client.get_client(Some(&options)).await?;
//! ```
//!
//! Index-level and collection-level failures are logged via `tracing` and
//! never surface to the caller; only connection failures do.

pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod indexes;
pub mod mongo;
pub mod reconciler;
pub mod store;

pub use client::MongoClient;
pub use config::MongoConfig;
pub use error::{Error, Result};
pub use health::HealthStatus;
pub use indexes::{CollectionIndexMap, IndexSpec, IndexSpecOptions, SetupOptions};
pub use mongo::MongoStore;
pub use reconciler::{IndexReconciler, MAX_IN_FLIGHT_OPS};
pub use store::{DocumentStore, IndexDescriptor};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
