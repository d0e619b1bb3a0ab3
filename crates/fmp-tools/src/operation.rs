use fmp_gateway::{Gateway, Observer, QueryParams, TraceLevel, notify};
use schemars::JsonSchema;
use serde_json::{Map, Value, json};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::args::{HistoricalPricesArgs, SearchArgs, StatementArgs, SymbolArgs, decode};
use crate::error::ToolError;

/// Every tool this connector exposes
///
/// Names are the snake_case variant names (`get_quote`, ...), so they are
/// unique by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    SearchSymbol,
    SearchName,
    GetQuote,
    GetHistoricalPrices,
    GetCompanyProfile,
    GetIncomeStatement,
    GetBalanceSheet,
    GetCashFlow,
}

impl Operation {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::SearchSymbol => {
                "Stock Symbol Search - Use when you have a company name or partial ticker and want to find \
                 matching ticker symbols and basic metadata. Returns a list of matches with symbol, name, \
                 currency, and exchange."
            }
            Self::SearchName => {
                "Company Name Search - Use to search companies or ETFs by name and retrieve their ticker \
                 symbols and exchange information. Returns a list of matches with symbol, name, currency, \
                 and exchange."
            }
            Self::GetQuote => {
                "Stock Quote - Retrieves the real-time price, change, volume, market cap and other trading \
                 data for a ticker. Use when the user asks for a current stock price."
            }
            Self::GetHistoricalPrices => {
                "Historical Price & Volume Data - Retrieves end-of-day open, high, low, close and volume for \
                 a ticker, optionally limited to a date range. Use for charts, trend analysis, or backtesting."
            }
            Self::GetCompanyProfile => {
                "Company Profile - Retrieves company details such as industry, sector, CEO, market cap, \
                 website, and description. Use when the user asks for a company overview."
            }
            Self::GetIncomeStatement => {
                "Income Statement - Retrieves annual or quarterly income statements: revenue, gross profit, \
                 operating income, net income, EPS."
            }
            Self::GetBalanceSheet => {
                "Balance Sheet Statement - Retrieves assets, liabilities, and shareholder equity. Use when \
                 the user asks for a balance sheet or financial position."
            }
            Self::GetCashFlow => {
                "Cash Flow Statement - Retrieves operating, investing, and financing cash flows for \
                 liquidity and cash management analysis."
            }
        }
    }

    /// JSON Schema of the tool's arguments
    pub fn input_schema(self) -> Map<String, Value> {
        match self {
            Self::SearchSymbol | Self::SearchName => schema_object::<SearchArgs>(),
            Self::GetQuote | Self::GetCompanyProfile => schema_object::<SymbolArgs>(),
            Self::GetHistoricalPrices => schema_object::<HistoricalPricesArgs>(),
            Self::GetIncomeStatement | Self::GetBalanceSheet | Self::GetCashFlow => schema_object::<StatementArgs>(),
        }
    }

    /// Validate `arguments` and forward the request to FMP
    ///
    /// Validation failures return before the gateway is touched.
    pub async fn invoke(
        self,
        gateway: &Gateway,
        arguments: Map<String, Value>,
        observer: Option<&dyn Observer>,
    ) -> Result<Value, ToolError> {
        match self {
            Self::SearchSymbol => search(gateway, "search-symbol", "Searching for symbol", arguments, observer).await,
            Self::SearchName => {
                search(gateway, "search-name", "Searching for company name", arguments, observer).await
            }
            Self::GetQuote => by_symbol(gateway, "quote", "Getting quote for", arguments, observer).await,
            Self::GetCompanyProfile => {
                by_symbol(gateway, "profile", "Getting company profile for", arguments, observer).await
            }
            Self::GetHistoricalPrices => historical_prices(gateway, arguments, observer).await,
            Self::GetIncomeStatement => {
                statement(gateway, "income-statement", "Getting income statement for", arguments, observer).await
            }
            Self::GetBalanceSheet => {
                statement(gateway, "balance-sheet-statement", "Getting balance sheet for", arguments, observer).await
            }
            Self::GetCashFlow => {
                statement(gateway, "cash-flow-statement", "Getting cash flow statement for", arguments, observer).await
            }
        }
    }
}

/// Root schema of a derived argument struct, always a JSON object
fn schema_object<T: JsonSchema>() -> Map<String, Value> {
    schemars::schema_for!(T)
        .as_object()
        .cloned()
        .expect("derived argument schema must be a JSON object")
}

async fn search(
    gateway: &Gateway,
    endpoint: &'static str,
    action: &str,
    arguments: Map<String, Value>,
    observer: Option<&dyn Observer>,
) -> Result<Value, ToolError> {
    let query = decode::<SearchArgs>(arguments)?.validate()?;
    notify(observer, TraceLevel::Info, &format!("{action}: {query}")).await;

    Ok(gateway.call(&[endpoint], QueryParams::new().text("query", query), observer).await?)
}

async fn by_symbol(
    gateway: &Gateway,
    endpoint: &'static str,
    action: &str,
    arguments: Map<String, Value>,
    observer: Option<&dyn Observer>,
) -> Result<Value, ToolError> {
    let symbol = decode::<SymbolArgs>(arguments)?.validate()?;
    notify(observer, TraceLevel::Info, &format!("{action}: {symbol}")).await;

    Ok(gateway.call(&[endpoint], QueryParams::new().text("symbol", symbol), observer).await?)
}

/// `historical-price-eod/full/{SYMBOL}` with optional `from`/`to`
///
/// The symbol is a single path segment; a `/` in it is percent-encoded.
///
/// An array response is wrapped as `{"symbol", "historical"}`; an object
/// response already carries the symbol and is returned as is.
async fn historical_prices(
    gateway: &Gateway,
    arguments: Map<String, Value>,
    observer: Option<&dyn Observer>,
) -> Result<Value, ToolError> {
    let request = decode::<HistoricalPricesArgs>(arguments)?.validate()?;
    notify(
        observer,
        TraceLevel::Info,
        &format!("Getting historical prices for: {}", request.symbol),
    )
    .await;

    let params = QueryParams::new()
        .optional_text("from", request.from)
        .optional_text("to", request.to);
    let path = ["historical-price-eod", "full", request.symbol.as_str()];

    match gateway.call(&path, params, observer).await? {
        Value::Array(historical) => Ok(json!({
            "symbol": request.symbol,
            "historical": historical,
        })),
        other => Ok(other),
    }
}

async fn statement(
    gateway: &Gateway,
    endpoint: &'static str,
    action: &str,
    arguments: Map<String, Value>,
    observer: Option<&dyn Observer>,
) -> Result<Value, ToolError> {
    let request = decode::<StatementArgs>(arguments)?.validate()?;
    let period = request.period.as_ref();
    notify(
        observer,
        TraceLevel::Info,
        &format!("{action}: {} ({period})", request.symbol),
    )
    .await;

    let params = QueryParams::new()
        .text("symbol", request.symbol.as_str())
        .text("period", period)
        .integer("limit", request.limit);

    Ok(gateway.call(&[endpoint], params, observer).await?)
}
