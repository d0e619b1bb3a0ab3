//! Typed tool arguments and their validation
//!
//! Argument structs double as the source of each tool's JSON Schema.

use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use strum::{AsRefStr, EnumString};

use crate::error::ToolError;

pub(crate) const QUERY_EMPTY: &str = "Query parameter cannot be empty";
pub(crate) const SYMBOL_EMPTY: &str = "Symbol parameter cannot be empty";
pub(crate) const PERIOD_INVALID: &str = "Period must be 'annual' or 'quarter'";
pub(crate) const LIMIT_OUT_OF_RANGE: &str = "Limit must be between 1 and 100";

const MIN_LIMIT: i64 = 1;
const MAX_LIMIT: i64 = 100;

/// Reporting period for financial statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, JsonSchema)]
#[schemars(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Period {
    Annual,
    Quarter,
}

/// Arguments for the search tools
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchArgs {
    /// Search text: a company name, ETF name, or ticker fragment
    pub query: String,
}

/// Arguments for tools keyed by a single ticker
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SymbolArgs {
    /// Stock ticker symbol (e.g. AAPL, MSFT, TSLA)
    pub symbol: String,
}

/// Arguments for historical end-of-day prices
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HistoricalPricesArgs {
    /// Stock ticker symbol (e.g. AAPL)
    pub symbol: String,
    /// Start date in YYYY-MM-DD format
    #[serde(default)]
    pub from_date: Option<String>,
    /// End date in YYYY-MM-DD format
    #[serde(default)]
    pub to_date: Option<String>,
}

/// Arguments for the financial statement tools
#[derive(Debug, Deserialize, JsonSchema)]
pub struct StatementArgs {
    /// Stock ticker symbol (e.g. AAPL)
    pub symbol: String,
    /// "annual" or "quarter"
    #[serde(default = "default_period")]
    #[schemars(with = "Period")]
    pub period: String,
    /// Number of periods to return
    #[serde(default = "default_limit")]
    #[schemars(range(min = 1, max = 100))]
    pub limit: i64,
}

fn default_period() -> String {
    Period::Annual.as_ref().to_owned()
}

#[allow(clippy::missing_const_for_fn)]
fn default_limit() -> i64 {
    5
}

/// Validated historical price request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalPricesRequest {
    pub symbol: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Validated statement request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRequest {
    pub symbol: String,
    pub period: Period,
    pub limit: i64,
}

impl SearchArgs {
    /// Trimmed, non-blank query
    pub fn validate(self) -> Result<String, ToolError> {
        required_text(&self.query, QUERY_EMPTY)
    }
}

impl SymbolArgs {
    /// Uppercased, non-blank symbol
    pub fn validate(self) -> Result<String, ToolError> {
        normalize_symbol(&self.symbol)
    }
}

impl HistoricalPricesArgs {
    pub fn validate(self) -> Result<HistoricalPricesRequest, ToolError> {
        Ok(HistoricalPricesRequest {
            symbol: normalize_symbol(&self.symbol)?,
            from: optional_text(self.from_date.as_deref(), "from_date cannot be empty")?,
            to: optional_text(self.to_date.as_deref(), "to_date cannot be empty")?,
        })
    }
}

impl StatementArgs {
    pub fn validate(self) -> Result<StatementRequest, ToolError> {
        let symbol = normalize_symbol(&self.symbol)?;
        let period = self
            .period
            .parse::<Period>()
            .map_err(|_| ToolError::invalid(PERIOD_INVALID))?;

        if !(MIN_LIMIT..=MAX_LIMIT).contains(&self.limit) {
            return Err(ToolError::invalid(LIMIT_OUT_OF_RANGE));
        }

        Ok(StatementRequest {
            symbol,
            period,
            limit: self.limit,
        })
    }
}

/// Decode raw MCP arguments into a typed argument struct
pub fn decode<T: DeserializeOwned>(arguments: Map<String, Value>) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments)).map_err(|e| ToolError::invalid(format!("Invalid arguments: {e}")))
}

/// Trim and uppercase a ticker, rejecting blanks
pub fn normalize_symbol(raw: &str) -> Result<String, ToolError> {
    required_text(raw, SYMBOL_EMPTY).map(|symbol| symbol.to_uppercase())
}

fn required_text(raw: &str, message: &str) -> Result<String, ToolError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ToolError::invalid(message));
    }
    Ok(trimmed.to_owned())
}

/// Absent stays absent; present must not be blank
fn optional_text(raw: Option<&str>, message: &str) -> Result<Option<String>, ToolError> {
    raw.map(|value| required_text(value, message)).transpose()
}
