use std::sync::Arc;

use fmp_gateway::{Gateway, Observer};
use serde_json::{Map, Value};
use strum::IntoEnumIterator;

use crate::error::ToolError;
use crate::operation::Operation;

/// Advertised shape of one tool
#[derive(Debug, Clone)]
pub struct OperationDefinition {
    pub operation: Operation,
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Arc<Map<String, Value>>,
}

impl From<Operation> for OperationDefinition {
    fn from(operation: Operation) -> Self {
        Self {
            operation,
            name: operation.name(),
            description: operation.description(),
            input_schema: Arc::new(operation.input_schema()),
        }
    }
}

/// Lookup from tool name to operation, sharing one gateway
///
/// Built once at startup and shared by every session.
#[derive(Debug)]
pub struct ToolRegistry {
    gateway: Gateway,
    definitions: Vec<OperationDefinition>,
}

impl ToolRegistry {
    pub fn new(gateway: Gateway) -> Self {
        let definitions = Operation::iter().map(OperationDefinition::from).collect();
        Self { gateway, definitions }
    }

    pub fn definitions(&self) -> &[OperationDefinition] {
        &self.definitions
    }

    pub fn definition(&self, name: &str) -> Option<&OperationDefinition> {
        self.definitions.iter().find(|definition| definition.name == name)
    }

    /// Invoke the tool called `name`
    ///
    /// Missing arguments decode as an empty object.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
        observer: Option<&dyn Observer>,
    ) -> Result<Value, ToolError> {
        let Some(definition) = self.definition(name) else {
            return Err(ToolError::invalid(format!("unknown tool: {name}")));
        };

        tracing::debug!(tool = name, "invoking tool");

        definition
            .operation
            .invoke(&self.gateway, arguments.unwrap_or_default(), observer)
            .await
    }
}
