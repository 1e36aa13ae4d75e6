//! In-process HTTP server for exercising the fetch paths without network access.

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub(crate) struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn ok(path: &'static str, body: impl Into<String>) -> Self {
        Self {
            path,
            status: 200,
            body: body.into(),
        }
    }
}

/// One entry per request, in arrival order: `METHOD target` on the first line,
/// then a `name: value` line per header.
pub(crate) type RequestLog = Arc<Mutex<Vec<String>>>;

#[derive(Clone)]
struct ServerState {
    routes: Arc<Vec<Route>>,
    log: RequestLog,
}

async fn respond(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut entry = format!("{} {}", method, uri);
    for (name, value) in &headers {
        entry.push_str(&format!("\n{}: {}", name, String::from_utf8_lossy(value.as_bytes())));
    }
    state.log.lock().expect("request log").push(entry);

    let (status, body) = state
        .routes
        .iter()
        .find(|route| route.path == uri.path())
        .map(|route| {
            (
                StatusCode::from_u16(route.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                route.body.clone(),
            )
        })
        .unwrap_or((StatusCode::NOT_FOUND, String::new()));
    (status, [(CONTENT_TYPE, "application/json")], body)
}

/// Serves `routes` on an ephemeral port until the runtime shuts down.
/// Routes match on the path without query string; anything else gets a 404.
pub(crate) async fn spawn(routes: Vec<Route>) -> (String, RequestLog) {
    let log = RequestLog::default();
    let app = Router::new().fallback(respond).with_state(ServerState {
        routes: Arc::new(routes),
        log: Arc::clone(&log),
    });

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    (format!("http://{}", addr), log)
}

/// A client that talks to the test server directly, whatever proxy the environment sets.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("test http client")
}
