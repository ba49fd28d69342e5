//! Local HTTP stand-in for the REST and image hosts.
//!
//! Responses are queued per path prefix and served in order; every request is
//! recorded with its decoded query string.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, Response, StatusCode};
use axum::routing::any;
use axum::Router;
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const REST_PATH: &str = "/services/rest/";
pub const IMAGE_PATH: &str = "/img/";

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl CapturedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find_map(|(key, value)| (key == name).then_some(value.as_str()))
    }
}

/// Canned reply.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    pub delay: Duration,
}

impl MockResponse {
    fn new(status: u16, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn json(body: &str) -> Self {
        Self::new(200, "application/json", body.as_bytes().to_vec())
    }

    pub fn bytes(body: Vec<u8>) -> Self {
        Self::new(200, "image/png", body)
    }

    pub fn status(status: u16) -> Self {
        Self::new(status, "text/plain", b"error".to_vec())
    }

    pub fn empty() -> Self {
        Self::new(200, "application/json", Vec::new())
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    fn unscripted(path: &str) -> Self {
        Self::new(404, "text/plain", format!("nothing queued for {}", path).into_bytes())
    }
}

#[derive(Default)]
struct Script {
    queues: HashMap<&'static str, VecDeque<MockResponse>>,
    seen: Vec<CapturedRequest>,
}

type SharedScript = Arc<Mutex<Script>>;

pub struct MockServer {
    pub addr: SocketAddr,
    script: SharedScript,
    stop: Option<oneshot::Sender<()>>,
}

impl MockServer {
    pub async fn start() -> Self {
        let script = SharedScript::default();
        let app = Router::new()
            .route("/{*path}", any(serve))
            .with_state(Arc::clone(&script));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");

        let (stop, stopped) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stopped.await;
                })
                .await;
        });

        Self {
            addr,
            script,
            stop: Some(stop),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Queue a reply for the search endpoint.
    pub async fn enqueue_response(&self, response: MockResponse) {
        self.enqueue(REST_PATH, response);
    }

    /// Queue a reply for any image download.
    pub async fn enqueue_image(&self, response: MockResponse) {
        self.enqueue(IMAGE_PATH, response);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.script.lock().seen.clone()
    }

    fn enqueue(&self, prefix: &'static str, response: MockResponse) {
        self.script
            .lock()
            .queues
            .entry(prefix)
            .or_default()
            .push_back(response);
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

fn decode_query(raw: Option<&str>) -> Vec<(String, String)> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    reqwest::Url::parse(&format!("http://mock/?{}", raw))
        .map(|url| url.query_pairs().into_owned().collect())
        .unwrap_or_default()
}

async fn serve(State(script): State<SharedScript>, request: Request<Body>) -> Response<Body> {
    let path = request.uri().path().to_string();
    let captured = CapturedRequest {
        method: request.method().to_string(),
        path: path.clone(),
        query: decode_query(request.uri().query()),
    };

    let reply = {
        let mut script = script.lock();
        script.seen.push(captured);
        let prefix = if path.starts_with(IMAGE_PATH) {
            IMAGE_PATH
        } else {
            REST_PATH
        };
        script
            .queues
            .get_mut(prefix)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| MockResponse::unscripted(&path))
    };

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    Response::builder()
        .status(StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR))
        .header(header::CONTENT_TYPE, reply.content_type)
        .body(Body::from(reply.body))
        .expect("valid mock response")
}
