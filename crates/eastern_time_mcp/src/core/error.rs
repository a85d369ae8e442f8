pub use rmcp::ErrorData as McpError;
use rmcp::model::ErrorCode;
use serde_json::Value;

// Error messages
const ERROR_PARSE: &str = "Parse error";
const ERROR_INTERNAL: &str = "Internal error";

/// Custom error types for better error handling
#[derive(Debug, thiserror::Error)]
pub enum TimeServerError {
    #[error("Unknown tool: {}", .name.as_deref().unwrap_or("<missing>"))]
    UnknownTool { name: Option<String> },
    #[error("Method not found: {method}")]
    MethodNotFound { method: String },
    #[error("Failed to format timestamp: {message}")]
    Formatting { message: String },
    #[error("Invalid request body: {message}")]
    Parse { message: String },
    /// Logging initialization failed
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TimeServerError> for McpError {
    fn from(err: TimeServerError) -> Self {
        match err {
            TimeServerError::UnknownTool { .. } => {
                McpError::new(ErrorCode::INVALID_PARAMS, err.to_string(), None)
            }
            TimeServerError::MethodNotFound { .. } => {
                McpError::new(ErrorCode::METHOD_NOT_FOUND, err.to_string(), None)
            }
            TimeServerError::Parse { .. } => McpError::new(ErrorCode::PARSE_ERROR, ERROR_PARSE, None),
            TimeServerError::Formatting { message } => McpError::new(
                ErrorCode::INTERNAL_ERROR,
                ERROR_INTERNAL,
                Some(Value::String(message)),
            ),
            other => McpError::new(
                ErrorCode::INTERNAL_ERROR,
                ERROR_INTERNAL,
                Some(Value::String(other.to_string())),
            ),
        }
    }
}

pub type TimeServerResult<T> = Result<T, TimeServerError>;
pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::TimeServerError;
    use crate::core::error::McpError;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_unknown_tool_conversion() {
        let error = TimeServerError::UnknownTool {
            name: Some("bogus".to_string()),
        };
        let mcp_error: McpError = error.into();

        assert_eq!(mcp_error.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(mcp_error.message, "Unknown tool: bogus");
        assert!(mcp_error.data.is_none());
    }

    #[test]
    fn test_missing_tool_name_message() {
        let error = TimeServerError::UnknownTool { name: None };
        assert_eq!(error.to_string(), "Unknown tool: <missing>");
    }

    #[test]
    fn test_formatting_error_carries_detail() {
        let error = TimeServerError::Formatting {
            message: "tz data missing".to_string(),
        };
        let mcp_error: McpError = error.into();

        assert_eq!(mcp_error.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(mcp_error.message, "Internal error");
        assert_eq!(mcp_error.data, Some(serde_json::json!("tz data missing")));
    }

    #[test]
    fn test_parse_error_code() {
        let error = TimeServerError::Parse {
            message: "expected value".to_string(),
        };
        let mcp_error: McpError = error.into();

        assert_eq!(mcp_error.code.0, -32700);
        assert!(mcp_error.data.is_none());
    }
}
