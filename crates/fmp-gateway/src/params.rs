use std::fmt;

use indexmap::IndexMap;

/// Query parameter reserved for the API key
pub const API_KEY_PARAM: &str = "apikey";

/// A single query parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// Caller-supplied query parameters, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(IndexMap<&'static str, QueryValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text parameter, replacing any previous value under `name`
    #[must_use]
    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.0.insert(name, QueryValue::Text(value.into()));
        self
    }

    /// Add an integer parameter, replacing any previous value under `name`
    #[must_use]
    pub fn integer(mut self, name: &'static str, value: i64) -> Self {
        self.0.insert(name, QueryValue::Integer(value));
        self
    }

    /// Add a text parameter only when a value is present
    #[must_use]
    pub fn optional_text(self, name: &'static str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Pairs ready for URL encoding
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        self.0.iter().map(|(name, value)| (*name, value.to_string())).collect()
    }
}
