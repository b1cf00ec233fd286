//! Lazy, connect-once MongoDB client with index reconciliation on request.

use crate::config::MongoConfig;
use crate::error::{Error, Result};
use crate::health::{self, HealthStatus};
use crate::indexes::{CollectionIndexMap, SetupOptions};
use crate::mongo::MongoStore;
use crate::reconciler::IndexReconciler;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::info;

/// Connection and index-management client
///
/// The connection is established lazily, at most once: the first call that
/// needs it performs the connect, later calls reuse the shared handle, and a
/// failed connect leaves the handle unset so a later call can try again.
///
/// # Example
///
/// ```ignore
/// use mongo_client::{IndexSpec, MongoClient, MongoConfig, SetupOptions};
/// use mongodb::bson::doc;
///
/// let client = MongoClient::new(MongoConfig::from_env()?);
/// let options = SetupOptions::default().with_collection_indexes(
///     [(
///         "users".to_string(),
///         vec![IndexSpec::new(doc! { "email": 1 }).with_name("email_idx").unique()],
///     )]
///     .into(),
/// );
/// let db = client.get_client(Some(&options)).await?;
/// ```
pub struct MongoClient {
    config: MongoConfig,
    conn: OnceCell<Connection>,
}

struct Connection {
    database: Database,
    reconciler: IndexReconciler<MongoStore>,
}

impl MongoClient {
    pub fn new(config: MongoConfig) -> Self {
        Self {
            config,
            conn: OnceCell::new(),
        }
    }

    /// Construct a client from environment variables
    ///
    /// See [`MongoConfig::from_env`] for the variables consumed.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(MongoConfig::from_env()?))
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &MongoConfig {
        &self.config
    }

    /// Get the shared database handle, connecting if necessary
    ///
    /// When `options` carries a `collection-indexes` mapping, those indexes
    /// are reconciled before the handle is returned. Index-level failures are
    /// logged, not returned; only connection failure is an error here.
    pub async fn get_client(&self, options: Option<&SetupOptions>) -> Result<&Database> {
        let conn = self.connection().await?;
        if let Some(desired) = options.and_then(|o| o.collection_indexes.as_ref()) {
            conn.reconciler.ensure_indexes(desired).await;
        }
        Ok(&conn.database)
    }

    /// Ensure the desired indexes exist, connecting if necessary
    pub async fn ensure_indexes(&self, desired: &CollectionIndexMap) -> Result<()> {
        let conn = self.connection().await?;
        conn.reconciler.ensure_indexes(desired).await;
        Ok(())
    }

    /// The shared database handle, connecting if necessary
    pub async fn database(&self) -> Result<&Database> {
        Ok(&self.connection().await?.database)
    }

    /// Whether the database answers a ping
    pub async fn check_health(&self) -> bool {
        match self.connection().await {
            Ok(conn) => health::check_health(&conn.database).await,
            Err(_) => false,
        }
    }

    /// Ping the database and report timing and error details
    pub async fn check_health_detailed(&self) -> HealthStatus {
        let start = std::time::Instant::now();
        match self.connection().await {
            Ok(conn) => health::check_health_detailed(&conn.database).await,
            Err(e) => HealthStatus {
                healthy: false,
                message: Some(e.to_string()),
                response_time_ms: start.elapsed().as_millis() as u64,
            },
        }
    }

    async fn connection(&self) -> Result<&Connection> {
        self.conn.get_or_try_init(|| self.establish()).await
    }

    async fn establish(&self) -> Result<Connection> {
        info!(url = %self.config.url, db = %self.config.db_name, "connecting to MongoDB");

        let mut options = ClientOptions::parse(&self.config.url).await?;
        options.max_pool_size = Some(self.config.max_pool_size);
        options.min_pool_size = Some(self.config.min_pool_size);
        options.connect_timeout = Some(Duration::from_secs(self.config.connect_timeout_secs));
        options.server_selection_timeout =
            Some(Duration::from_secs(self.config.server_selection_timeout_secs));
        if let Some(ref app_name) = self.config.app_name {
            options.app_name = Some(app_name.clone());
        }

        let client = Client::with_options(options)?;

        // Verify connectivity up front so get_client fails fast.
        client
            .list_database_names()
            .await
            .map_err(|e| Error::ConnectionFailed(e.to_string()))?;

        let database = client.database(&self.config.db_name);
        info!(db = %self.config.db_name, "connected to MongoDB");

        Ok(Connection {
            reconciler: IndexReconciler::new(MongoStore::new(database.clone())),
            database,
        })
    }
}
