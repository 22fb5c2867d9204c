//! HTTP stub of the admin backend.
//!
//! Runs an axum server on a background thread with its own runtime so it can
//! serve both async tests and CLI processes spawned by `assert_cmd`.

use std::collections::HashMap;
use std::net::TcpListener as StdListener;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use axum::Router;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use chrono::Utc;
use folio_types::{Envelope, Paged, ResourceKind};
use serde_json::{Map, Value, json};
use tokio::sync::oneshot;

use crate::fixtures::slugify;

/// Token accepted by the stub's authenticated endpoints
pub const STUB_TOKEN: &str = "stub-admin-token";

/// A request as seen by the stub
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub bearer: Option<String>,
    /// Multipart text fields in order; file fields appear as `file:<name>`
    pub fields: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn field_values(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }
}

#[derive(Default)]
struct StubState {
    records: HashMap<ResourceKind, Vec<Value>>,
    requests: Vec<RecordedRequest>,
    fail_next: Option<(u16, Option<String>)>,
    next_id: u64,
    generated: String,
}

type Shared = Arc<Mutex<StubState>>;

fn lock(state: &Shared) -> MutexGuard<'_, StubState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct StubServer {
    base_url: String,
    state: Shared,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl StubServer {
    /// Start the stub on an ephemeral local port.
    pub fn start() -> anyhow::Result<Self> {
        let listener = StdListener::bind("127.0.0.1:0")?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;

        let state: Shared = Arc::new(Mutex::new(StubState {
            next_id: 1000,
            ..Default::default()
        }));
        let app = router(state.clone());
        let (tx, rx) = oneshot::channel::<()>();

        let thread = std::thread::Builder::new()
            .name("folio-stub".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(_) => return,
                };
                runtime.block_on(async move {
                    let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                        return;
                    };
                    let _ = axum::serve(listener, app)
                        .with_graceful_shutdown(async {
                            let _ = rx.await;
                        })
                        .await;
                });
            })?;

        Ok(Self {
            base_url: format!("http://{}/api", addr),
            state,
            shutdown: Some(tx),
            thread: Some(thread),
        })
    }

    /// Base URL including the `/api` prefix
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &'static str {
        STUB_TOKEN
    }

    pub fn seed<R: folio_types::Resource>(&self, records: Vec<R>) {
        let mut state = lock(&self.state);
        let entry = state.records.entry(R::KIND).or_default();
        for record in records {
            if let Ok(value) = serde_json::to_value(record) {
                entry.push(value);
            }
        }
    }

    pub fn set_generated(&self, content: impl Into<String>) {
        lock(&self.state).generated = content.into();
    }

    /// Answer the next request with `status`; with no message the body is
    /// plain text rather than an envelope.
    pub fn fail_next(&self, status: u16, message: Option<&str>) {
        lock(&self.state).fail_next = Some((status, message.map(String::from)));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.state).requests.last().cloned()
    }

    pub fn records(&self, kind: ResourceKind) -> Vec<Value> {
        lock(&self.state)
            .records
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/ai-content/generate", post(generate))
        .route("/api/:collection", get(list).post(create))
        .route(
            "/api/:collection/:id",
            get(show).patch(update).delete(remove),
        )
        .with_state(state)
}

fn kind_of(collection: &str) -> Option<ResourceKind> {
    match collection {
        "blogs" => Some(ResourceKind::Blog),
        "portfolio" => Some(ResourceKind::Portfolio),
        _ => None,
    }
}

fn envelope(status: StatusCode, body: Envelope<Value>) -> Response {
    (status, Json(body)).into_response()
}

fn failure(status: StatusCode, message: &str) -> Response {
    envelope(status, Envelope::failure(message))
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}

/// Record the request; returns a ready response when a failure was scripted
/// or authentication is missing.
fn admit(
    state: &Shared,
    request: RecordedRequest,
    needs_auth: bool,
) -> Option<Response> {
    let mut guard = lock(state);
    let authorized = request.bearer.as_deref() == Some(STUB_TOKEN);
    guard.requests.push(request);

    if let Some((status, message)) = guard.fail_next.take() {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return Some(match message {
            Some(message) => failure(status, &message),
            None => (status, "Internal Server Error").into_response(),
        });
    }
    if needs_auth && !authorized {
        return Some(failure(StatusCode::UNAUTHORIZED, "Unauthorized"));
    }
    None
}

fn recorded(method: &Method, uri: &Uri, headers: &HeaderMap) -> RecordedRequest {
    RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: HashMap::new(),
        bearer: bearer(headers),
        fields: Vec::new(),
    }
}

async fn read_fields(
    mut multipart: Multipart,
) -> Result<Vec<(String, String)>, Response> {
    let mut fields = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return Err(failure(StatusCode::BAD_REQUEST, "Malformed multipart body")),
        };
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(String::from);
        let Ok(bytes) = field.bytes().await else {
            return Err(failure(StatusCode::BAD_REQUEST, "Malformed multipart body"));
        };
        let value = match file_name {
            Some(file_name) => format!("file:{}", file_name),
            None => String::from_utf8_lossy(&bytes).into_owned(),
        };
        fields.push((name, value));
    }
    Ok(fields)
}

/// Apply multipart fields onto a JSON record the way the backend would.
fn apply_fields(record: &mut Map<String, Value>, fields: &[(String, String)]) {
    let technologies: Vec<Value> = fields
        .iter()
        .filter(|(n, _)| n == "technologies")
        .map(|(_, v)| Value::String(v.clone()))
        .collect();
    if !technologies.is_empty() {
        record.insert("technologies".to_string(), Value::Array(technologies));
    }

    for (name, value) in fields {
        match name.as_str() {
            "technologies" => {}
            "isPublished" => {
                record.insert(name.clone(), Value::Bool(value == "true"));
            }
            "image" => {
                let file = value.strip_prefix("file:").unwrap_or(value);
                record.insert(name.clone(), Value::String(format!("uploads/{}", file)));
            }
            "title" => {
                record.insert("slug".to_string(), Value::String(slugify(value)));
                record.insert(name.clone(), Value::String(value.clone()));
            }
            _ => {
                record.insert(name.clone(), Value::String(value.clone()));
            }
        }
    }
    record.insert("updatedAt".to_string(), Value::String(Utc::now().to_rfc3339()));
}

async fn list(
    State(state): State<Shared>,
    Path(collection): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let mut request = recorded(&method, &uri, &headers);
    request.query = query.clone();
    if let Some(response) = admit(&state, request, false) {
        return response;
    }
    let Some(kind) = kind_of(&collection) else {
        return failure(StatusCode::NOT_FOUND, "Route not found");
    };

    let page = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let search = query.get("search").cloned().unwrap_or_default().to_lowercase();

    let items: Vec<Value> = lock(&state)
        .records
        .get(&kind)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|r| {
            search.is_empty()
                || r["title"]
                    .as_str()
                    .is_some_and(|t| t.to_lowercase().contains(&search))
        })
        .collect();
    let paged = Paged::from_all(items, page, limit);
    match serde_json::to_value(paged) {
        Ok(data) => envelope(StatusCode::OK, Envelope::ok(data)),
        Err(_) => failure(StatusCode::INTERNAL_SERVER_ERROR, "Serialization failed"),
    }
}

async fn show(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if let Some(response) = admit(&state, recorded(&method, &uri, &headers), false) {
        return response;
    }
    let Some(kind) = kind_of(&collection) else {
        return failure(StatusCode::NOT_FOUND, "Route not found");
    };
    let found = lock(&state)
        .records
        .get(&kind)
        .and_then(|records| records.iter().find(|r| r["id"] == id.as_str()).cloned());
    match found {
        Some(record) => envelope(StatusCode::OK, Envelope::ok(record)),
        None => failure(StatusCode::NOT_FOUND, &format!("{} not found", kind)),
    }
}

async fn create(
    State(state): State<Shared>,
    Path(collection): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let fields = match read_fields(multipart).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let mut request = recorded(&method, &uri, &headers);
    request.fields = fields.clone();
    if let Some(response) = admit(&state, request, true) {
        return response;
    }
    let Some(kind) = kind_of(&collection) else {
        return failure(StatusCode::NOT_FOUND, "Route not found");
    };

    let mut guard = lock(&state);
    guard.next_id += 1;
    let now = Utc::now().to_rfc3339();
    let mut record = Map::new();
    record.insert("id".to_string(), Value::String(guard.next_id.to_string()));
    record.insert("createdAt".to_string(), Value::String(now));
    apply_fields(&mut record, &fields);
    let record = Value::Object(record);
    guard.records.entry(kind).or_default().push(record.clone());
    drop(guard);

    envelope(StatusCode::CREATED, Envelope::ok(record))
}

async fn update(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let fields = match read_fields(multipart).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let mut request = recorded(&method, &uri, &headers);
    request.fields = fields.clone();
    if let Some(response) = admit(&state, request, true) {
        return response;
    }
    let Some(kind) = kind_of(&collection) else {
        return failure(StatusCode::NOT_FOUND, "Route not found");
    };

    let mut guard = lock(&state);
    let record = guard
        .records
        .get_mut(&kind)
        .and_then(|records| records.iter_mut().find(|r| r["id"] == id.as_str()));
    match record {
        Some(Value::Object(map)) => {
            apply_fields(map, &fields);
            let updated = Value::Object(map.clone());
            envelope(StatusCode::OK, Envelope::ok(updated))
        }
        _ => failure(StatusCode::NOT_FOUND, &format!("{} not found", kind)),
    }
}

async fn remove(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if let Some(response) = admit(&state, recorded(&method, &uri, &headers), true) {
        return response;
    }
    let Some(kind) = kind_of(&collection) else {
        return failure(StatusCode::NOT_FOUND, "Route not found");
    };

    let mut guard = lock(&state);
    let records = guard.records.entry(kind).or_default();
    let before = records.len();
    records.retain(|r| r["id"] != id.as_str());
    if records.len() == before {
        return failure(StatusCode::NOT_FOUND, &format!("{} not found", kind));
    }
    envelope(StatusCode::OK, Envelope::ok(Value::Null))
}

async fn generate(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut request = recorded(&method, &uri, &headers);
    if let Some(context) = body["context"].as_str() {
        request.fields.push(("context".to_string(), context.to_string()));
    }
    if let Some(response) = admit(&state, request, true) {
        return response;
    }
    let content = lock(&state).generated.clone();
    envelope(StatusCode::OK, Envelope::ok(json!({ "content": content })))
}
