use mongodb::bson::doc;
use mongodb::Database;
use std::time::Instant;

/// Health check status for the connected database
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the database is healthy
    pub healthy: bool,
    /// Optional message (e.g., error details)
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

/// Check database health with a ping command
pub async fn check_health(database: &Database) -> bool {
    database.run_command(doc! { "ping": 1 }).await.is_ok()
}

/// Check database health with detailed status
///
/// Returns timing information and any error message.
pub async fn check_health_detailed(database: &Database) -> HealthStatus {
    let start = Instant::now();

    match database.run_command(doc! { "ping": 1 }).await {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms: start.elapsed().as_millis() as u64,
        },
    }
}
