use crate::core::errors::SettlementError;
use crate::core::models::audit::AppLog;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

const DEFAULT_CAPACITY: usize = 1_000;

/// Keeps the most recent app log entries; the oldest entry is evicted once
/// `capacity` is reached.
#[derive(Clone)]
pub struct InMemoryLogging {
    logs: Arc<RwLock<VecDeque<AppLog>>>,
    capacity: usize,
}

impl Default for InMemoryLogging {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLogging {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        InMemoryLogging {
            logs: Arc::new(RwLock::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(&self, action: &str, details: serde_json::Value) -> Result<(), SettlementError> {
        let entry = AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            details: serde_json::from_value(details)
                .map_err(|e| SettlementError::LoggingError(format!("Failed to serialize log details: {}", e)))?,
            timestamp: chrono::Utc::now(),
        };
        let mut logs = self.logs.write().await;
        if logs.len() >= self.capacity {
            logs.pop_front();
        }
        logs.push_back(entry);
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, SettlementError> {
        let logs = self.logs.read().await;
        Ok(logs.iter().cloned().collect())
    }
}
