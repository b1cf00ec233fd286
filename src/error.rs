/// Unified error type for connection and index-management operations
///
/// Only connection-level failures surface to callers; collection and index
/// level failures are logged and recovered inside the reconciler.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// MongoDB driver error
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Connection could not be established
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Generic(String),
}

/// Result type alias for this crate's operations
pub type Result<T> = std::result::Result<T, Error>;
