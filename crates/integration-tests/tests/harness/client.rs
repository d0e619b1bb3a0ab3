//! MCP client handler that records logging notifications

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rmcp::ClientHandler;
use rmcp::model::{LoggingLevel, LoggingMessageNotificationParam};
use rmcp::service::{NotificationContext, RoleClient};
use serde_json::Value;

/// Collects `notifications/message` entries from the `fmp` logger in arrival order
#[derive(Clone, Default)]
pub struct LogRecorder {
    entries: Arc<Mutex<Vec<(LoggingLevel, String)>>>,
}

impl LogRecorder {
    pub fn entries(&self) -> Vec<(LoggingLevel, String)> {
        self.entries.lock().unwrap().clone()
    }

    /// Wait until at least `count` entries arrived, or give up after five seconds
    ///
    /// Notification handlers run on their own tasks, so they can land after
    /// the tool result.
    pub async fn wait_for(&self, count: usize) -> Vec<(LoggingLevel, String)> {
        let poll = async {
            loop {
                let entries = self.entries();
                if entries.len() >= count {
                    return entries;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        };

        tokio::time::timeout(Duration::from_secs(5), poll)
            .await
            .unwrap_or_else(|_| self.entries())
    }
}

impl ClientHandler for LogRecorder {
    async fn on_logging_message(
        &self,
        params: LoggingMessageNotificationParam,
        _context: NotificationContext<RoleClient>,
    ) {
        if params.logger.as_deref() != Some("fmp") {
            return;
        }

        let message = match params.data {
            Value::String(message) => message,
            other => other.to_string(),
        };
        self.entries.lock().unwrap().push((params.level, message));
    }
}
