//! Tests for `HttpExecutionBackend` against a throwaway axum executor bound to
//! an ephemeral local port.

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use tracepad_core::ExecutionRequest;
use tracepad_server::backend::{ExecutionBackend, HttpExecutionBackend, TransportError};

/// Serves `app` on 127.0.0.1 and returns the `/run` URL.
async fn spawn_executor(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/run", addr)
}

/// Mimics the reference execution service: echoes inputs and always sends
/// an `error` field, empty on success.
async fn echo(Json(body): Json<Value>) -> Json<Value> {
    let inputs: Vec<String> = body["inputs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    Json(json!({
        "output": inputs.join(" "),
        "error": "",
        "trace": [
            { "type": "assign", "content": format!("code = {:?}", body["code"].as_str().unwrap()) }
        ],
        "time_complexity": "O(n)",
        "execution_time": 0.0123
    }))
}

#[tokio::test]
async fn posts_request_and_parses_result() {
    let url = spawn_executor(Router::new().route("/run", post(echo))).await;
    let backend = HttpExecutionBackend::new(url);

    let result = backend
        .execute(&ExecutionRequest::new(
            "print(input())",
            vec!["hello".to_string(), "world".to_string()],
        ))
        .await
        .unwrap();

    assert_eq!(result.output, "hello world");
    assert_eq!(result.error, None);
    assert_eq!(result.trace.len(), 1);
    assert_eq!(result.trace[0].kind.as_deref(), Some("assign"));
    assert_eq!(result.trace[0].content, "code = \"print(input())\"");
    assert_eq!(result.time_complexity, "O(n)");
    assert_eq!(result.execution_time, 0.0123);
}

#[tokio::test]
async fn server_error_status_is_transport_failure() {
    let app = Router::new().route(
        "/run",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>") }),
    );
    let backend = HttpExecutionBackend::new(spawn_executor(app).await);

    let err = backend
        .execute(&ExecutionRequest::new("x", vec![]))
        .await
        .unwrap_err();
    match err {
        TransportError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "<html>boom</html>");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_transport_failure() {
    let app = Router::new().route("/run", post(|| async { "not json" }));
    let backend = HttpExecutionBackend::new(spawn_executor(app).await);

    let err = backend
        .execute(&ExecutionRequest::new("x", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Malformed(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_service_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpExecutionBackend::new(format!("http://{}/run", addr));
    let err = backend
        .execute(&ExecutionRequest::new("x", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Unreachable(_)), "{err:?}");
}

#[tokio::test]
async fn null_optional_fields_are_not_transport_failures() {
    let app = Router::new().route(
        "/run",
        post(|| async {
            Json(json!({
                "output": "7\n",
                "error": null,
                "trace": null,
                "time_complexity": null,
                "execution_time": null
            }))
        }),
    );
    let backend = HttpExecutionBackend::new(spawn_executor(app).await);

    let result = backend
        .execute(&ExecutionRequest::new("print(7)", vec![]))
        .await
        .unwrap();
    assert_eq!(result.output, "7\n");
    assert!(result.trace.is_empty());
    assert_eq!(result.time_complexity, "Unknown");
    assert_eq!(result.execution_time, 0.0);
}
