use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use async_trait::async_trait;
use fmp_gateway::{Observer, TraceLevel};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult, LoggingLevel,
    LoggingMessageNotificationParam, PaginatedRequestParam, ServerCapabilities, ServerInfo, SetLevelRequestParam,
    Tool,
};
use rmcp::service::{Peer, RequestContext, RoleServer};
use rmcp::{ErrorData, ServerHandler};
use serde_json::Value;

use crate::registry::{OperationDefinition, ToolRegistry};

/// Name advertised in the MCP `initialize` response
pub const SERVER_NAME: &str = "FMP Financial Data Connector";

/// Guidance advertised to agents in the MCP `initialize` response
pub const INSTRUCTIONS: &str = "Custom connector for Financial Modeling Prep (FMP) API. Use these operations to \
     search for stock symbols and company names, retrieve real-time stock quotes, historical price/volume data, \
     company profiles, and key financial statements (income statement, balance sheet, cash flow). Agents should \
     call these operations whenever the user asks for financial data, stock lookups, company information, or \
     financial statements.";

const LOGGER: &str = "fmp";

/// MCP server handler exposing the FMP tools
///
/// One instance per session. The registry is shared; the logging threshold
/// set by `logging/setLevel` belongs to the session. In stateless HTTP mode
/// every request is its own session, so the threshold does not carry over
/// to later requests.
#[derive(Debug, Clone)]
pub struct FmpServer {
    registry: Arc<ToolRegistry>,
    threshold: LogThreshold,
}

impl FmpServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            threshold: LogThreshold::default(),
        }
    }

    fn tools(&self) -> Vec<Tool> {
        self.registry.definitions().iter().map(to_tool).collect()
    }
}

impl ServerHandler for FmpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_logging().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_owned(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                ..Implementation::default()
            },
            instructions: Some(INSTRUCTIONS.to_owned()),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let observer = PeerObserver {
            peer: context.peer.clone(),
            threshold: self.threshold.clone(),
        };

        let call = self.registry.call(&request.name, request.arguments, Some(&observer));

        let value = tokio::select! {
            result = call => result?,
            () = context.ct.cancelled() => {
                tracing::debug!(tool = %request.name, "tool call cancelled by client");
                return Err(ErrorData::internal_error("request cancelled", None));
            }
        };

        Ok(CallToolResult::success(vec![Content::json(value)?]))
    }

    async fn set_level(
        &self,
        request: SetLevelRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<(), ErrorData> {
        tracing::debug!(level = ?request.level, "client set logging level");
        self.threshold.set(request.level);
        Ok(())
    }
}

fn to_tool(definition: &OperationDefinition) -> Tool {
    Tool::new(definition.name, definition.description, Arc::clone(&definition.input_schema))
}

/// Minimum level forwarded to the client; everything passes until set
#[derive(Debug, Clone)]
struct LogThreshold(Arc<AtomicU8>);

impl Default for LogThreshold {
    fn default() -> Self {
        Self(Arc::new(AtomicU8::new(rank(LoggingLevel::Debug))))
    }
}

impl LogThreshold {
    fn set(&self, level: LoggingLevel) {
        self.0.store(rank(level), Ordering::Relaxed);
    }

    fn allows(&self, level: LoggingLevel) -> bool {
        rank(level) >= self.0.load(Ordering::Relaxed)
    }
}

/// Forwards trace entries to the calling client as logging notifications
struct PeerObserver {
    peer: Peer<RoleServer>,
    threshold: LogThreshold,
}

#[async_trait]
impl Observer for PeerObserver {
    async fn emit(&self, level: TraceLevel, message: &str) {
        let level = logging_level(level);
        if !self.threshold.allows(level) {
            return;
        }

        let param = LoggingMessageNotificationParam {
            level,
            logger: Some(LOGGER.to_owned()),
            data: Value::String(message.to_owned()),
        };

        if let Err(e) = self.peer.notify_logging_message(param).await {
            tracing::debug!(error = %e, "failed to deliver logging notification");
        }
    }
}

const fn logging_level(level: TraceLevel) -> LoggingLevel {
    match level {
        TraceLevel::Debug => LoggingLevel::Debug,
        TraceLevel::Info => LoggingLevel::Info,
        TraceLevel::Error => LoggingLevel::Error,
    }
}

/// Severity order from RFC 5424, lowest first
const fn rank(level: LoggingLevel) -> u8 {
    match level {
        LoggingLevel::Debug => 0,
        LoggingLevel::Info => 1,
        LoggingLevel::Notice => 2,
        LoggingLevel::Warning => 3,
        LoggingLevel::Error => 4,
        LoggingLevel::Critical => 5,
        LoggingLevel::Alert => 6,
        LoggingLevel::Emergency => 7,
    }
}
