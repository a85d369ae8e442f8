use axum::http::StatusCode;
use serde_json::Value;

use crate::core::{
    dispatcher::Dispatcher,
    error::{McpError, TimeServerError},
    models::{RpcRequest, RpcResponse, TimestampReply},
    utils::{DEFAULT_REQUEST_ID, METHOD_NOT_ALLOWED_TEXT},
};

/// One inbound call, independent of the HTTP framework
#[derive(Debug, Clone, PartialEq)]
pub enum InboundCall {
    /// `GET` with its `method` and `name` query parameters
    Get {
        method: Option<String>,
        name: Option<String>,
    },
    /// `POST` with the raw request body
    Post { body: Vec<u8> },
    /// Any other verb
    Unsupported { verb: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplyBody {
    Rpc(RpcResponse),
    Timestamp(TimestampReply),
    Text(&'static str),
}

/// Status code and body produced for a call
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: ReplyBody,
}

impl HttpReply {
    fn ok(body: ReplyBody) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }
}

impl Dispatcher {
    /// Apply transport framing to a call and dispatch it
    ///
    /// RPC-level failures stay inside a 200 response. Only an unparsable
    /// `POST` body (400) and unsupported verbs (405) change the status.
    pub async fn dispatch(&self, call: InboundCall) -> HttpReply {
        match call {
            InboundCall::Get {
                method: Some(method),
                name,
            } if !method.is_empty() => {
                let response = self.handle_rpc(RpcRequest::from_query(method, name)).await;
                HttpReply::ok(ReplyBody::Rpc(response))
            }
            InboundCall::Get { .. } => self.bare_timestamp(),
            InboundCall::Post { body } => match serde_json::from_slice::<RpcRequest>(&body) {
                Ok(request) => HttpReply::ok(ReplyBody::Rpc(self.handle_rpc(request).await)),
                Err(e) => {
                    tracing::warn!(error = %e, "Rejected malformed request body");
                    let error = McpError::from(TimeServerError::Parse {
                        message: e.to_string(),
                    });
                    HttpReply {
                        status: StatusCode::BAD_REQUEST,
                        body: ReplyBody::Rpc(RpcResponse::error(Value::Null, error)),
                    }
                }
            },
            InboundCall::Unsupported { verb } => {
                tracing::debug!(verb = %verb, "Rejected unsupported HTTP verb");
                HttpReply {
                    status: StatusCode::METHOD_NOT_ALLOWED,
                    body: ReplyBody::Text(METHOD_NOT_ALLOWED_TEXT),
                }
            }
        }
    }

    fn bare_timestamp(&self) -> HttpReply {
        match self.clock().now() {
            Ok(timestamp) => HttpReply::ok(ReplyBody::Timestamp(TimestampReply { timestamp })),
            Err(e) => {
                tracing::error!(error = %e, "Failed to produce timestamp");
                HttpReply {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ReplyBody::Rpc(RpcResponse::error(
                        Value::from(DEFAULT_REQUEST_ID),
                        e.into(),
                    )),
                }
            }
        }
    }
}
