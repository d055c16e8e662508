//! In-process stand-in for the Cloze API.
//!
//! Every request is recorded. Unless a path has a scripted response, the
//! server answers `200` with an echo envelope describing what it received.
//! Requests without a bearer token get the API's `401` answer.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// One request as seen by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug)]
struct Scripted {
    status: StatusCode,
    body: Option<Value>,
    delay: Option<Duration>,
}

#[derive(Default)]
struct Inner {
    requests: Vec<RecordedRequest>,
    scripts: HashMap<String, Scripted>,
}

/// Shared handle to the server's request log and scripted responses.
#[derive(Clone, Default)]
pub struct MockState {
    inner: Arc<Mutex<Inner>>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with `status` and a JSON body from now on.
    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.script(path, status, Some(body), None);
    }

    /// Answer `path` with `status` and an empty body.
    pub fn respond_empty(&self, path: &str, status: u16) {
        self.script(path, status, None, None);
    }

    /// Hold the answer to `path` for `delay` before sending the echo.
    pub fn delay(&self, path: &str, delay: Duration) {
        self.script(path, 200, Some(json!({"errorcode": 0})), Some(delay));
    }

    fn script(&self, path: &str, status: u16, body: Option<Value>, delay: Option<Duration>) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.lock()
            .scripts
            .insert(path.to_string(), Scripted { status, body, delay });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn app(state: MockState) -> Router {
    Router::new().fallback(handle).with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Response {
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body: decode_body(&body),
    };
    tracing::info!(method = %recorded.method, path = %recorded.path, "recorded request");

    let scripted = {
        let mut inner = state.lock();
        inner.requests.push(recorded.clone());
        inner.scripts.get(&recorded.path).cloned()
    };

    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer ") && v.len() > "Bearer ".len());
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"errorcode": 1, "message": "Missing or invalid API key"})),
        )
            .into_response();
    }

    match scripted {
        Some(Scripted { status, body, delay }) => {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match body {
                Some(body) => (status, Json(body)).into_response(),
                None => status.into_response(),
            }
        }
        None => Json(echo(&recorded)).into_response(),
    }
}

fn decode_body(bytes: &Bytes) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    Some(
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned())),
    )
}

fn echo(request: &RecordedRequest) -> Value {
    json!({
        "errorcode": 0,
        "method": request.method,
        "path": request.path,
        "query": request.query,
        "body": request.body,
    })
}
