//! In-memory stand-in for a Rexster-style graph gateway.
//!
//! Serves the slice of the REST surface `rexreq` talks to: the graph listing,
//! single graphs, and vertices by id. Every route demands HTTP Basic auth with
//! the security token in the username slot and `none` as password. Every
//! request, authenticated or not, is recorded so tests can count round-trips.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, error};

pub const VERSION: &str = "2.5.0";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vertex {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type")]
    pub kind: String,
}

impl Vertex {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: "vertex".to_string(),
        }
    }
}

/// One request as the gateway saw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub uri: String,
    pub authorization: Option<String>,
}

/// Token taken from a verified `authorization` header.
#[derive(Clone, Debug)]
pub struct Token(pub String);

type Graphs = Arc<RwLock<BTreeMap<String, BTreeMap<String, Vertex>>>>;

#[derive(Clone)]
pub struct GatewayState {
    graphs: Graphs,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Default for GatewayState {
    fn default() -> Self {
        Self::with_graphs(&["tinkergraph"])
    }
}

impl GatewayState {
    pub fn with_graphs(names: &[&str]) -> Self {
        let graphs = names
            .iter()
            .map(|name| (name.to_string(), BTreeMap::new()))
            .collect();
        Self {
            graphs: Arc::new(RwLock::new(graphs)),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed a vertex from synchronous code. Creates the graph if needed.
    /// Must not be called from inside an async runtime.
    pub fn insert_vertex(&self, graph: &str, id: &str) {
        self.graphs
            .blocking_write()
            .entry(graph.to_string())
            .or_default()
            .insert(id.to_string(), Vertex::new(id));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock_log().clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock_log().len()
    }

    fn lock_log(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        // The log is append-only; a poisoned guard still holds consistent data.
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Error body in the gateway's format: `{"message": ...}`.
#[derive(Debug)]
pub struct GatewayError {
    status: StatusCode,
    message: String,
}

impl GatewayError {
    fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }

    fn graph_not_found(graph: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("Graph [{graph}] could not be found"))
    }

    fn vertex_not_found(id: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("Vertex with [{id}] cannot be found."))
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

pub fn app() -> Router {
    app_with_state(GatewayState::default())
}

pub fn app_with_state(state: GatewayState) -> Router {
    Router::new()
        .route("/graphs", get(list_graphs))
        .route("/graphs/{graph}", get(get_graph))
        .route(
            "/graphs/{graph}/vertices/{id}",
            get(get_vertex).put(put_vertex).post(post_vertex).delete(delete_vertex),
        )
        .fallback(unknown_resource)
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, GatewayState::default()).await
}

pub async fn run_with_state(listener: TcpListener, state: GatewayState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

/// Start the gateway on a random local port in a background thread with its
/// own runtime. Returns the bound address.
pub fn serve_in_background(state: GatewayState) -> std::io::Result<SocketAddr> {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = std_listener.local_addr()?;
    std_listener.set_nonblocking(true)?;

    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = %e, "cannot build mock gateway runtime");
                return;
            }
        };
        let result = runtime.block_on(async {
            let listener = TcpListener::from_std(std_listener)?;
            run_with_state(listener, state).await
        });
        if let Err(e) = result {
            error!(error = %e, "mock gateway stopped");
        }
    });

    Ok(addr)
}

/// Decode `Basic base64(user:password)` into its two halves.
pub fn decode_basic(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

async fn authenticate(State(state): State<GatewayState>, mut request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.lock_log().push(RecordedRequest {
        method: request.method().to_string(),
        uri: request.uri().to_string(),
        authorization,
    });

    match decode_basic(request.headers()) {
        Some((token, password)) if !token.is_empty() && password == "none" => {
            debug!(method = %request.method(), uri = %request.uri(), "authenticated request");
            request.extensions_mut().insert(Token(token));
            next.run(request).await
        }
        _ => GatewayError::new(
            StatusCode::UNAUTHORIZED,
            "Authentication failed: a security token is required".to_string(),
        )
        .into_response(),
    }
}

async fn list_graphs(State(state): State<GatewayState>) -> Json<Value> {
    let graphs = state.graphs.read().await;
    let names: Vec<&String> = graphs.keys().collect();
    Json(json!({ "graphs": names }))
}

async fn get_graph(State(state): State<GatewayState>, Path(graph): Path<String>) -> Result<Json<Value>, GatewayError> {
    let graphs = state.graphs.read().await;
    let vertices = graphs.get(&graph).ok_or_else(|| GatewayError::graph_not_found(&graph))?;
    Ok(Json(json!({
        "version": VERSION,
        "name": graph,
        "graph": format!("tinkergraph[vertices:{} edges:0]", vertices.len()),
    })))
}

fn vertex_body(method: &Method, token: &str, vertex: Option<&Vertex>) -> Value {
    let mut body = json!({
        "version": VERSION,
        "method": method.as_str(),
        "token": token,
    });
    if let Some(vertex) = vertex {
        body["results"] = json!(vertex);
    }
    body
}

async fn get_vertex(
    State(state): State<GatewayState>,
    Path((graph, id)): Path<(String, String)>,
    Extension(Token(token)): Extension<Token>,
    method: Method,
) -> Result<Json<Value>, GatewayError> {
    let graphs = state.graphs.read().await;
    let vertices = graphs.get(&graph).ok_or_else(|| GatewayError::graph_not_found(&graph))?;
    let vertex = vertices.get(&id).ok_or_else(|| GatewayError::vertex_not_found(&id))?;
    Ok(Json(vertex_body(&method, &token, Some(vertex))))
}

/// PUT replaces an existing vertex; it never creates one.
async fn put_vertex(
    State(state): State<GatewayState>,
    Path((graph, id)): Path<(String, String)>,
    Extension(Token(token)): Extension<Token>,
    method: Method,
) -> Result<Json<Value>, GatewayError> {
    let mut graphs = state.graphs.write().await;
    let vertices = graphs.get_mut(&graph).ok_or_else(|| GatewayError::graph_not_found(&graph))?;
    let vertex = vertices.get_mut(&id).ok_or_else(|| GatewayError::vertex_not_found(&id))?;
    *vertex = Vertex::new(&id);
    Ok(Json(vertex_body(&method, &token, Some(&*vertex))))
}

/// POST creates the vertex, or returns it unchanged if it exists.
async fn post_vertex(
    State(state): State<GatewayState>,
    Path((graph, id)): Path<(String, String)>,
    Extension(Token(token)): Extension<Token>,
    method: Method,
) -> Result<Json<Value>, GatewayError> {
    let mut graphs = state.graphs.write().await;
    let vertices = graphs.get_mut(&graph).ok_or_else(|| GatewayError::graph_not_found(&graph))?;
    let vertex = vertices.entry(id.clone()).or_insert_with(|| Vertex::new(&id));
    Ok(Json(vertex_body(&method, &token, Some(&*vertex))))
}

async fn delete_vertex(
    State(state): State<GatewayState>,
    Path((graph, id)): Path<(String, String)>,
    Extension(Token(token)): Extension<Token>,
    method: Method,
) -> Result<Json<Value>, GatewayError> {
    let mut graphs = state.graphs.write().await;
    let vertices = graphs.get_mut(&graph).ok_or_else(|| GatewayError::graph_not_found(&graph))?;
    vertices.remove(&id).ok_or_else(|| GatewayError::vertex_not_found(&id))?;
    Ok(Json(vertex_body(&method, &token, None)))
}

async fn unknown_resource(request: Request) -> GatewayError {
    GatewayError::new(StatusCode::NOT_FOUND, format!("No resource at [{}]", request.uri().path()))
}
