//! Exercises the real HTTP client against an in-process mock of the
//! generateContent endpoint.

use axum::body::Body;
use axum::extract::{ Path, Query, State };
use axum::http::{ Request, StatusCode };
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{ Json, Router };
use chat_relay::llm::chat::gemini::GeminiChatClient;
use chat_relay::llm::chat::{ ChatClient, GeminiContent };
use chat_relay::llm::{ LlmConfig, LlmError };
use chat_relay::models::chat::ChatRole;
use chat_relay::relay::ChatRelay;
use chat_relay::server::{ router, AppState };
use chat_relay::theme::{ PageMetadata, ThemeContext, ThemeShell };
use serde_json::{ json, Value };
use std::collections::HashMap;
use std::sync::{ Arc, Mutex };
use tower::ServiceExt;

#[derive(Clone, Default)]
struct Seen {
    requests: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

async fn generate(
    State(seen): State<Seen>,
    Path(model_call): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>
) -> impl IntoResponse {
    let key = query.get("key").cloned();
    seen.requests.lock().unwrap().push((model_call, key.clone(), body));

    match key.as_deref() {
        Some("good-key") =>
            (
                StatusCode::OK,
                Json(json!({ "candidates": [{ "content": { "parts": [{ "text": "Hello!" }] } }] })),
            ).into_response(),
        Some("empty-key") => (StatusCode::OK, Json(json!({ "candidates": [] }))).into_response(),
        _ =>
            (
                StatusCode::BAD_REQUEST,
                "{\"error\":{\"message\":\"API key not valid\"}}",
            ).into_response(),
    }
}

async fn spawn_upstream() -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new().route("/v1/models/{model_call}", post(generate)).with_state(seen.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind mock upstream");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock upstream");
    });
    (format!("http://{}/v1", addr), seen)
}

fn client(base_url: &str, key: &str) -> GeminiChatClient {
    GeminiChatClient::from_config(
        &(LlmConfig {
            api_key: Some(key.to_string()),
            completion_model: "gemini-1.5-flash".into(),
            base_url: base_url.to_string(),
        })
    )
}

#[tokio::test]
async fn posts_contents_to_generate_content() {
    let (base_url, seen) = spawn_upstream().await;
    let contents = vec![
        GeminiContent::text(ChatRole::User, "hi"),
        GeminiContent::text(ChatRole::Assistant, "hello"),
        GeminiContent::text(ChatRole::User, "how are you?")
    ];

    let resp = client(&base_url, "good-key").generate(&contents).await.expect("generate");
    assert_eq!(resp["candidates"][0]["content"]["parts"][0]["text"], "Hello!");

    let requests = seen.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let (model_call, key, body) = &requests[0];
    assert_eq!(model_call, "gemini-1.5-flash:generateContent");
    assert_eq!(key.as_deref(), Some("good-key"));
    assert_eq!(body["contents"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["contents"][2], json!({ "role": "user", "parts": [{ "text": "how are you?" }] }));
}

#[tokio::test]
async fn error_status_keeps_raw_body() {
    let (base_url, _) = spawn_upstream().await;
    let err = client(&base_url, "bad-key")
        .generate(&[GeminiContent::text(ChatRole::User, "hi")]).await
        .unwrap_err();

    match err {
        LlmError::Status { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "{\"error\":{\"message\":\"API key not valid\"}}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    let err = client("http://127.0.0.1:1/v1", "good-key")
        .generate(&[GeminiContent::text(ChatRole::User, "hi")]).await
        .unwrap_err();
    assert!(matches!(err, LlmError::Transport(_)));
}

async fn chat_through(base_url: &str, key: &str) -> (StatusCode, Value) {
    let state = AppState {
        relay: ChatRelay::new(Arc::new(client(base_url, key))),
        shell: ThemeShell::new(ThemeContext::default(), PageMetadata::default()),
    };
    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "message": "hi" }).to_string()))
        .unwrap();
    let resp = router(state).oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("read body");
    (status, serde_json::from_slice(&bytes).expect("parse JSON"))
}

#[tokio::test]
async fn end_to_end_success_fallback_and_failure() {
    let (base_url, _) = spawn_upstream().await;

    let (status, json) = chat_through(&base_url, "good-key").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "Hello!" }));

    let (status, json) = chat_through(&base_url, "empty-key").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "I apologize, but I cannot generate a response at the moment.");

    let (status, json) = chat_through(&base_url, "bad-key").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Gemini API error");
    assert_eq!(json["details"], "{\"error\":{\"message\":\"API key not valid\"}}");
}
