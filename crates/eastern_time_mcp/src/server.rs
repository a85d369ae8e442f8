use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::Method,
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;

use crate::config::Config;
use crate::core::{
    dispatcher::Dispatcher,
    error::TimeServerResult,
    transport::{HttpReply, InboundCall, ReplyBody},
};

/// Query parameters understood by `GET /`
#[derive(Debug, Default, PartialEq)]
pub struct RpcQuery {
    pub method: Option<String>,
    pub name: Option<String>,
}

impl RpcQuery {
    /// Keep the first value of each known key; repeats and unknown keys are ignored
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "method" => &mut query.method,
                "name" => &mut query.name,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// Build the HTTP surface: a single method-routed endpoint at `/`
pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route(
            "/",
            get(handle_get)
                .head(handle_unsupported)
                .post(handle_post)
                .fallback(handle_unsupported),
        )
        .with_state(dispatcher)
}

async fn handle_get(
    State(dispatcher): State<Dispatcher>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> HttpReply {
    let query = RpcQuery::from_pairs(pairs);
    dispatcher
        .dispatch(InboundCall::Get {
            method: query.method,
            name: query.name,
        })
        .await
}

async fn handle_post(State(dispatcher): State<Dispatcher>, body: Bytes) -> HttpReply {
    dispatcher
        .dispatch(InboundCall::Post {
            body: body.to_vec(),
        })
        .await
}

async fn handle_unsupported(State(dispatcher): State<Dispatcher>, method: Method) -> HttpReply {
    dispatcher
        .dispatch(InboundCall::Unsupported {
            verb: method.to_string(),
        })
        .await
}

impl IntoResponse for HttpReply {
    fn into_response(self) -> Response {
        match self.body {
            ReplyBody::Rpc(response) => (self.status, Json(response)).into_response(),
            ReplyBody::Timestamp(reply) => (self.status, Json(reply)).into_response(),
            ReplyBody::Text(text) => (self.status, text).into_response(),
        }
    }
}

pub async fn run(config: Config) -> TimeServerResult<()> {
    let listener = TcpListener::bind(config.listen_addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        tool_delay_ms = config.tool_delay.as_millis() as u64,
        "Eastern Time MCP server listening"
    );

    axum::serve(listener, router(Dispatcher::new(config.tool_delay)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Eastern Time MCP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    async fn send(request: Request<Body>) -> (StatusCode, String, Vec<u8>) {
        let response = router(Dispatcher::new(Duration::ZERO))
            .oneshot(request)
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|value| value.to_str().unwrap().to_string())
            .unwrap_or_default();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, content_type, body.to_vec())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn assert_eastern_timestamp(value: &Value) {
        let timestamp = value.as_str().expect("timestamp should be a string");
        assert_eq!(timestamp.len(), 25, "unexpected timestamp {timestamp}");
        assert_eq!(&timestamp[10..11], "T");
        assert!(timestamp.ends_with("-04:00") || timestamp.ends_with("-05:00"));
    }

    #[tokio::test]
    async fn test_get_direct_tool_method() {
        let (status, content_type, body) = send(get("/?method=get_eastern_time")).await;
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], "mcp-id");
        assert_eastern_timestamp(&value["result"]);
    }

    #[tokio::test]
    async fn test_get_tools_call_with_name() {
        let (status, _, body) = send(get("/?method=tools/call&name=get_eastern_time")).await;
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eastern_timestamp(&value["result"]);
    }

    #[tokio::test]
    async fn test_get_tools_call_unknown_name_stays_200() {
        let (status, _, body) = send(get("/?method=tools/call&name=other")).await;
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_get_bare_timestamp() {
        let (status, content_type, body) = send(get("/")).await;
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eastern_timestamp(&value["timestamp"]);
    }

    #[tokio::test]
    async fn test_post_initialize() {
        let (status, _, body) =
            send(post(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#)).await;
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["id"], 1);
        assert_eq!(value["result"]["protocolVersion"], "2024-11-05");
        assert!(value["result"]["capabilities"]["tools"]["get_eastern_time"].is_object());
    }

    #[tokio::test]
    async fn test_post_tools_list_is_stable() {
        let request = r#"{"jsonrpc":"2.0","id":"list","method":"tools/list"}"#;
        let (_, _, first) = send(post(request)).await;
        let (_, _, second) = send(post(request)).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_post_unknown_tool() {
        let (status, _, body) = send(post(
            r#"{"jsonrpc":"2.0","id":"abc","method":"tools/call","params":{"name":"bogus"}}"#,
        ))
        .await;
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["id"], "abc");
        assert_eq!(value["error"]["code"], -32602);
        assert!(value.get("result").is_none());
    }

    #[tokio::test]
    async fn test_post_unknown_method() {
        let (status, _, body) = send(post(r#"{"id":"m","method":"ping"}"#)).await;
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_post_malformed_json() {
        let (status, content_type, body) = send(post("{oops")).await;
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type, "application/json");
        assert_eq!(value["error"]["code"], -32700);
        assert_eq!(value["error"]["message"], "Parse error");
        assert!(value["id"].is_null());
    }

    #[tokio::test]
    async fn test_put_is_not_allowed() {
        let request = Request::builder()
            .method("PUT")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let (status, content_type, body) = send(request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(String::from_utf8(body).unwrap(), crate::core::utils::METHOD_NOT_ALLOWED_TEXT);
    }

    #[tokio::test]
    async fn test_head_is_not_allowed() {
        let request = Request::builder()
            .method("HEAD")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_delete_is_not_allowed() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(String::from_utf8(body).unwrap(), crate::core::utils::METHOD_NOT_ALLOWED_TEXT);
    }

    #[tokio::test]
    async fn test_repeated_method_uses_first_value() {
        let (status, _, body) = send(get("/?method=initialize&method=tools/list")).await;
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["result"]["protocolVersion"], "2024-11-05");
        assert!(value["result"].get("tools").is_none());
    }

    #[tokio::test]
    async fn test_repeated_name_uses_first_value() {
        let (status, _, body) =
            send(get("/?method=tools/call&name=a&name=get_eastern_time")).await;
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["error"]["code"], -32602);
        assert_eq!(value["error"]["message"], "Unknown tool: a");
    }

    #[test]
    fn test_query_from_pairs() {
        let query = RpcQuery::from_pairs(vec![
            ("other".to_string(), "x".to_string()),
            ("name".to_string(), "first".to_string()),
            ("method".to_string(), "tools/call".to_string()),
            ("name".to_string(), "second".to_string()),
        ]);

        assert_eq!(
            query,
            RpcQuery {
                method: Some("tools/call".to_string()),
                name: Some("first".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_other_paths_are_not_routed() {
        let (status, _, _) = send(get("/rpc")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
