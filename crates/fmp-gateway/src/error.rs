/// Upstream failure for a single gateway call
///
/// Every variant is the same error kind from the caller's point of view; the
/// split only shapes the message.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No API key was configured, so the call was never sent
    #[error("FMP API key is not configured")]
    MissingApiKey,

    /// FMP answered with a non-success status
    #[error("FMP API error (HTTP {status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Connection, DNS, TLS or timeout failure before a response arrived
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Anything else, such as a body that is not JSON
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl GatewayError {
    /// HTTP status returned by FMP, if the failure came from a response
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a transport error from a reqwest failure
    ///
    /// The request URL is stripped because it carries the API key, and the
    /// source chain is flattened so the root cause (e.g. "connection
    /// refused") reaches the caller.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::Transport(describe(&err.without_url()))
    }
}

fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }

    message
}
