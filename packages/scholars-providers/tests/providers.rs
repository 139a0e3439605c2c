use std::{net::SocketAddr, time::Duration};

use axum::{Json, Router, http::StatusCode, routing::post};
use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};
use tokio::net::TcpListener;

use scholars_config::CompletionProviderConfig;
use scholars_providers::{ChatMessage, Error, Role, completion};

async fn echo(Json(body): Json<Value>) -> Json<Value> {
	let count = body["messages"].as_array().map(|messages| messages.len()).unwrap_or(0);
	let content = format!(
		"model={} max_tokens={} messages={count} first_role={}",
		body["model"].as_str().unwrap_or(""),
		body["max_tokens"],
		body["messages"][0]["role"].as_str().unwrap_or(""),
	);

	Json(serde_json::json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] }))
}

async fn failing() -> (StatusCode, Json<Value>) {
	(StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "error": "boom" })))
}

async fn malformed() -> Json<Value> {
	Json(serde_json::json!({ "unexpected": true }))
}

async fn slow() -> Json<Value> {
	tokio::time::sleep(Duration::from_secs(2)).await;

	Json(serde_json::json!({ "choices": [{ "message": { "content": "too late" } }] }))
}

async fn spawn_upstream() -> SocketAddr {
	let app = Router::new()
		.route("/ok", post(echo))
		.route("/fail", post(failing))
		.route("/malformed", post(malformed))
		.route("/slow", post(slow));
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind mock upstream.");
	let addr = listener.local_addr().expect("Mock upstream has no address.");

	tokio::spawn(async move {
		let _ = axum::serve(listener, app).await;
	});

	addr
}

fn provider(addr: SocketAddr, path: &str, timeout_ms: u64) -> CompletionProviderConfig {
	CompletionProviderConfig {
		provider_id: "mock".to_string(),
		api_base: format!("http://{addr}"),
		api_key: "test-key".to_string(),
		path: path.to_string(),
		model: "mock-model".to_string(),
		temperature: 0.7,
		max_tokens: 1_000,
		timeout_ms,
		default_headers: Map::new(),
	}
}

fn conversation() -> Vec<ChatMessage> {
	vec![
		ChatMessage::new(Role::System, "Be brief."),
		ChatMessage::new(Role::User, "Any essay contests?"),
	]
}

#[test]
fn builds_bearer_auth_header() {
	let headers =
		scholars_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn rejects_non_string_default_header() {
	let mut extra = Map::new();

	extra.insert("x-retries".to_string(), serde_json::json!(3));

	let result = scholars_providers::auth_headers("secret", &extra);

	assert!(matches!(result, Err(Error::InvalidConfig { .. })));
}

#[tokio::test]
async fn sends_model_messages_and_token_budget() {
	let addr = spawn_upstream().await;
	let cfg = provider(addr, "/ok", 5_000);
	let content =
		completion::complete(&cfg, &conversation(), 50).await.expect("Completion failed.");

	assert_eq!(content, "model=mock-model max_tokens=50 messages=2 first_role=system");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
	let addr = spawn_upstream().await;
	let cfg = provider(addr, "/fail", 5_000);
	let err = completion::complete(&cfg, &conversation(), 50)
		.await
		.expect_err("A 500 response must fail.");

	match err {
		Error::Status { status, body } => {
			assert_eq!(status, 500);
			assert!(body.contains("boom"));
		},
		other => panic!("Expected a status error, got {other:?}."),
	}
}

#[tokio::test]
async fn unexpected_shape_is_an_invalid_response() {
	let addr = spawn_upstream().await;
	let cfg = provider(addr, "/malformed", 5_000);
	let err = completion::complete(&cfg, &conversation(), 50)
		.await
		.expect_err("A malformed body must fail.");

	assert!(matches!(err, Error::InvalidResponse { .. }));
}

#[tokio::test]
async fn slow_upstream_times_out() {
	let addr = spawn_upstream().await;
	let cfg = provider(addr, "/slow", 200);
	let err = completion::complete(&cfg, &conversation(), 50)
		.await
		.expect_err("A slow upstream must time out.");

	assert!(err.is_timeout(), "Expected a timeout, got {err:?}.");
}
