use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::core::{
    error::{McpError, McpResult, TimeServerError},
    models::{InitializeResult, RpcRequest, RpcResponse, ToolDescriptor, ToolList},
    provider::EasternClock,
    utils::TOOL_NAME,
};

/// The closed set of RPC methods this server answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    Initialize,
    ToolsList,
    ToolsCall,
    /// Direct invocation of the tool without the `tools/call` wrapper
    GetEasternTime,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::ToolsList => "tools/list",
            Self::ToolsCall => "tools/call",
            Self::GetEasternTime => TOOL_NAME,
        }
    }
}

impl FromStr for RpcMethod {
    type Err = TimeServerError;

    fn from_str(method: &str) -> Result<Self, Self::Err> {
        match method {
            "initialize" => Ok(Self::Initialize),
            "tools/list" => Ok(Self::ToolsList),
            "tools/call" => Ok(Self::ToolsCall),
            TOOL_NAME => Ok(Self::GetEasternTime),
            other => Err(TimeServerError::MethodNotFound {
                method: other.to_string(),
            }),
        }
    }
}

/// Maps request envelopes onto handlers
///
/// Holds no mutable state, so one instance is cloned into every request.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    clock: EasternClock,
    tool_delay: Duration,
}

impl Dispatcher {
    pub fn new(tool_delay: Duration) -> Self {
        Self {
            clock: EasternClock::new(),
            tool_delay,
        }
    }

    pub fn clock(&self) -> &EasternClock {
        &self.clock
    }

    /// Handle one request envelope and build its response envelope
    pub async fn handle_rpc(&self, request: RpcRequest) -> RpcResponse {
        let id = request.response_id();

        let result = match request.method.parse::<RpcMethod>() {
            Ok(method) => {
                tracing::debug!(
                    method = method.as_str(),
                    id = %id,
                    jsonrpc = request.jsonrpc.as_deref().unwrap_or("-"),
                    "Dispatching RPC request"
                );
                self.invoke(method, &request).await
            }
            Err(e) => {
                tracing::warn!(method = %request.method, "Rejected unknown RPC method");
                Err(e.into())
            }
        };

        let response = RpcResponse::from_result(id, result);
        if let Some(code) = response.error_code() {
            tracing::debug!(code, method = %request.method, "RPC request failed");
        }

        response
    }

    async fn invoke(&self, method: RpcMethod, request: &RpcRequest) -> McpResult<Value> {
        match method {
            RpcMethod::Initialize => {
                tracing::info!(
                    client_protocol = request.protocol_version.as_deref().unwrap_or("unspecified"),
                    "Client initialized"
                );
                to_result(&InitializeResult::eastern_time())
            }
            RpcMethod::ToolsList => to_result(&ToolList {
                tools: vec![ToolDescriptor::eastern_time()],
            }),
            RpcMethod::ToolsCall => self.call_tool(request.tool_name()).await,
            RpcMethod::GetEasternTime => self.call_tool(Some(TOOL_NAME)).await,
        }
    }

    /// Run the tool, then hold the reply for the configured delay
    async fn call_tool(&self, name: Option<&str>) -> McpResult<Value> {
        if name != Some(TOOL_NAME) {
            return Err(TimeServerError::UnknownTool {
                name: name.map(str::to_string),
            }
            .into());
        }

        let timestamp = self.clock.now()?;

        if !self.tool_delay.is_zero() {
            tokio::time::sleep(self.tool_delay).await;
        }

        Ok(Value::String(timestamp))
    }
}

fn to_result<T: Serialize>(value: &T) -> McpResult<Value> {
    serde_json::to_value(value).map_err(|e| {
        McpError::from(TimeServerError::Formatting {
            message: e.to_string(),
        })
    })
}
