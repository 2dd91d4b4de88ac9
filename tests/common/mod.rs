#![allow(dead_code)]

use agrismart_web::app::{create_app, AppState};
use agrismart_web::config::Settings;
use agrismart_web::domain::ChatMessage;
use agrismart_web::services::ResponseSource;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const GUIDE_MODEL: &str = "gemini-test";
pub const GUIDE_KEY: &str = "test-key";

/// Deterministic stand-in for the canned responder.
pub struct EchoReply;

impl ResponseSource for EchoReply {
    fn classify(&self, message: &ChatMessage) -> ChatMessage {
        ChatMessage::assistant(format!("echo: {}", message.content))
    }
}

pub fn settings(prediction_url: &str, guide_url: &str) -> Settings {
    Settings {
        prediction_service_url: prediction_url.to_string(),
        guide_api_url: guide_url.to_string(),
        guide_model: GUIDE_MODEL.to_string(),
        guide_api_key: GUIDE_KEY.to_string(),
        ..Settings::default()
    }
}

pub fn build(settings: Settings, responder: Arc<dyn ResponseSource>) -> (Router, Arc<AppState>) {
    let state = AppState::from_settings(settings, responder).unwrap();
    (create_app(Arc::clone(&state)), state)
}

pub struct Reply {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub text: String,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = header_value(response.headers(), header::LOCATION);
    let content_type = header_value(response.headers(), header::CONTENT_TYPE);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    Reply {
        status,
        location,
        content_type,
        text: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Reply {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> Reply {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Open a session through the JSON API and return its id.
pub async fn open_session(app: &Router) -> String {
    let reply = post_json(app, "/api/sessions", Value::Null).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    reply.json()["data"]["session_id"]
        .as_str()
        .unwrap()
        .to_string()
}

pub fn soil_form() -> Value {
    serde_json::json!({
        "nitrogen": "90",
        "phosphorus": "42",
        "potassium": "43",
        "ph": "6.5",
        "temperature": "20.8",
        "humidity": "82",
        "rainfall": "202.9"
    })
}
