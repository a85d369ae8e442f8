use std::collections::BTreeMap;

use rmcp::model::ProtocolVersion;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::error::McpError;
use crate::core::utils::{
    DEFAULT_REQUEST_ID, JSONRPC_VERSION, SERVER_DESCRIPTION, SERVER_NAME, TOOL_NAME,
};

/// Parameters accepted by `tools/call`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CallParams {
    /// Name of the tool to invoke
    #[serde(default)]
    pub name: Option<String>,
}

/// Inbound JSON-RPC request envelope
///
/// Unknown fields are ignored. `id` is kept as raw JSON so numbers and
/// strings echo back unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub protocol_version: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<CallParams>,
}

impl RpcRequest {
    /// Build a request from `GET` query parameters
    ///
    /// Only `tools/call` receives params; every other method ignores `name`.
    pub fn from_query(method: String, tool_name: Option<String>) -> Self {
        let params = (method == "tools/call").then(|| CallParams { name: tool_name });

        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            protocol_version: None,
            id: Some(Value::from(DEFAULT_REQUEST_ID)),
            method,
            params,
        }
    }

    /// The request id, falling back to the sentinel when absent or null
    pub fn response_id(&self) -> Value {
        self.id
            .clone()
            .unwrap_or_else(|| Value::from(DEFAULT_REQUEST_ID))
    }

    pub fn tool_name(&self) -> Option<&str> {
        self.params.as_ref().and_then(|params| params.name.as_deref())
    }
}

/// Either half of a response; never both
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcOutcome {
    Result(Value),
    Error(McpError),
}

/// Outbound JSON-RPC response envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(flatten)]
    pub outcome: RpcOutcome,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: RpcOutcome::Result(result),
        }
    }

    pub fn error(id: Value, error: McpError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: RpcOutcome::Error(error),
        }
    }

    pub fn from_result(id: Value, result: Result<Value, McpError>) -> Self {
        match result {
            Ok(value) => Self::success(id, value),
            Err(error) => Self::error(id, error),
        }
    }

    pub fn error_code(&self) -> Option<i32> {
        match &self.outcome {
            RpcOutcome::Error(error) => Some(error.code.0),
            RpcOutcome::Result(_) => None,
        }
    }
}

/// Reply to a bare `GET /`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampReply {
    pub timestamp: String,
}

/// Tool entry returned by `tools/list`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub output_format: &'static str,
}

impl ToolDescriptor {
    pub fn eastern_time() -> Self {
        Self {
            name: TOOL_NAME,
            description: "Get Eastern Time ISO string",
            input_schema: empty_input_schema(),
            output_format: "string (ISO 8601 / RFC 3339)",
        }
    }
}

/// `tools/list` result
#[derive(Debug, Clone, Serialize)]
pub struct ToolList {
    pub tools: Vec<ToolDescriptor>,
}

/// Per-tool entry advertised in the `initialize` capabilities
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCapability {
    pub description: &'static str,
    pub input_schema: Value,
    pub output_format: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Capabilities {
    pub tools: BTreeMap<&'static str, ToolCapability>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

/// `initialize` result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: ProtocolVersion,
    pub server_info: ServerInfo,
    pub capabilities: Capabilities,
}

impl InitializeResult {
    pub fn eastern_time() -> Self {
        let mut tools = BTreeMap::new();
        tools.insert(
            TOOL_NAME,
            ToolCapability {
                description: "Returns ISO 8601 Eastern Time string",
                input_schema: empty_input_schema(),
                output_format: "string (ISO 8601 / RFC 3339, e.g. 2025-06-14T14:23:45-04:00)",
            },
        );

        Self {
            protocol_version: ProtocolVersion::V_2024_11_05,
            server_info: ServerInfo {
                name: SERVER_NAME,
                version: env!("CARGO_PKG_VERSION"),
                description: SERVER_DESCRIPTION,
            },
            capabilities: Capabilities { tools },
        }
    }
}

/// Schema for a tool that takes no arguments
fn empty_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "additionalProperties": false
    })
}
