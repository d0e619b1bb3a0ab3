use fmp_gateway::GatewayError;
use rmcp::ErrorData;

/// Failure of a single tool invocation
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Arguments were rejected before any upstream call
    #[error("{0}")]
    InvalidParams(String),

    /// The gateway call failed
    #[error(transparent)]
    Upstream(#[from] GatewayError),
}

impl ToolError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }
}

impl From<ToolError> for ErrorData {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::InvalidParams(message) => Self::invalid_params(message, None),
            ToolError::Upstream(upstream) => Self::internal_error(upstream.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn invalid_params_keep_their_message() {
        let data: ErrorData = ToolError::invalid("Symbol parameter cannot be empty").into();
        assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(data.message, "Symbol parameter cannot be empty");
    }

    #[test]
    fn upstream_errors_are_internal() {
        let err = ToolError::from(GatewayError::Status {
            status: 404,
            body: "Not Found".to_owned(),
        });
        let data: ErrorData = err.into();
        assert_eq!(data.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(data.message, "FMP API error (HTTP 404): Not Found");
    }
}
