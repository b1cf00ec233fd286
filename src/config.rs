use crate::error::{Error, Result};

/// MongoDB connection configuration
///
/// Holds the connection URL, the target database name, and the driver knobs
/// applied at connect time. It can be constructed manually or loaded from
/// environment variables.
///
/// # Example
///
/// ```ignore
/// use mongo_client::MongoConfig;
///
/// // Manual construction
/// let config = MongoConfig::new("mongodb://localhost:27017", "mydb");
///
/// // From environment variables
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// MongoDB connection URL (required)
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Target database name
    pub db_name: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a new MongoConfig with a URL and database name
    ///
    /// # Example
    /// ```ignore
    /// let config = MongoConfig::new("mongodb://localhost:27017", "mydb");
    /// ```
    pub fn new(url: impl Into<String>, db_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            db_name: db_name.into(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }

    /// Create a MongoConfig with custom pool settings
    pub fn with_pool_size(
        url: impl Into<String>,
        db_name: impl Into<String>,
        max_pool_size: u32,
        min_pool_size: u32,
    ) -> Self {
        Self {
            max_pool_size,
            min_pool_size,
            ..Self::new(url, db_name)
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Get a reference to the MongoDB URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the database name
    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    /// Load MongoConfig from environment variables
    ///
    /// Environment variables:
    /// - `MONGO_URL` or `MONGODB_URL` (required) - MongoDB connection string
    /// - `MONGO_DB_NAME` or `MONGODB_DATABASE` (required) - Database name
    /// - `MONGO_APP_NAME` (optional) - Application name for server logs
    /// - `MONGO_MAX_POOL_SIZE` (optional, default: 100)
    /// - `MONGO_MIN_POOL_SIZE` (optional, default: 5)
    /// - `MONGO_CONNECT_TIMEOUT_SECS` (optional, default: 10)
    /// - `MONGO_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 30)
    pub fn from_env() -> Result<Self> {
        let url = env_either("MONGO_URL", "MONGODB_URL")?;
        let db_name = env_either("MONGO_DB_NAME", "MONGODB_DATABASE")?;
        let app_name = std::env::var("MONGO_APP_NAME").ok();

        Ok(Self {
            url,
            db_name,
            app_name,
            max_pool_size: env_parsed("MONGO_MAX_POOL_SIZE", 100)?,
            min_pool_size: env_parsed("MONGO_MIN_POOL_SIZE", 5)?,
            connect_timeout_secs: env_parsed("MONGO_CONNECT_TIMEOUT_SECS", 10)?,
            server_selection_timeout_secs: env_parsed("MONGO_SERVER_SELECTION_TIMEOUT_SECS", 30)?,
        })
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new("mongodb://localhost:27017", "default")
    }
}

/// Read the first of two environment variables, erroring if neither is set
fn env_either(key: &str, fallback: &str) -> Result<String> {
    std::env::var(key)
        .or_else(|_| std::env::var(fallback))
        .map_err(|_| {
            Error::Config(format!(
                "environment variable '{}' or '{}' is required but not set",
                key, fallback
            ))
        })
}

/// Read and parse an optional environment variable, falling back to a default
fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("failed to parse '{}': {}", key, e))),
        Err(_) => Ok(default),
    }
}
