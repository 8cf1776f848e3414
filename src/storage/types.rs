//! Type definitions for the storage layer

use serde::{Deserialize, Serialize};

/// Backend health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub backend_type: String,
    pub connection_status: ConnectionStatus,
    pub latency_ms: u64,
    pub errors: Vec<String>,
}

/// Connection status for health checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}
