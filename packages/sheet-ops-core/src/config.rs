//! Service configuration.

/// Service configuration shared by the runtime and API layers.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Maximum number of operations accepted in one dimension batch
    pub max_batch_operations: usize,
    /// Default row count for newly created sheets
    pub default_rows: u32,
    /// Default column count for newly created sheets
    pub default_columns: u32,
    /// Request body read timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Runtime response timeout in milliseconds
    pub response_timeout_ms: u64,
    /// Base URL used when rendering resource links in responses
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_batch_operations: 100,
            default_rows: 1000,
            default_columns: 26,
            request_timeout_ms: 5000,   // 5 seconds default
            response_timeout_ms: 10000, // 10 seconds default
            base_url: "http://localhost:8080".to_string(),
        }
    }
}
