// Mock AI gateway shared by the integration tests.
#![allow(dead_code)]

use std::{
    convert::Infallible,
    sync::{ Arc, Mutex },
    time::Duration,
};

use axum::{
    body::{ Body, Bytes },
    extract::{ Json, State },
    http::{ header::{ AUTHORIZATION, CONTENT_TYPE }, HeaderMap, StatusCode },
    response::{ IntoResponse, Response },
    routing::post,
    Router,
};
use futures::stream::{ self, StreamExt };
use serde_json::Value;
use stacks_chat_relay::{
    config::prompt::SystemPrompt,
    llm::chat::gateway::GatewayChatClient,
    relay::AppState,
    server::api::build_router,
};
use tokio::sync::{ oneshot, Notify };

pub const ROUTE: &str = "/defi-chat";
pub const TEST_PROMPT: &str = "You are a cyberpunk ghost guide to Stacks.";
pub const TEST_MODEL: &str = "test/model";

#[derive(Clone)]
pub enum GatewayBehavior {
    /// 200 event-stream made of these chunks.
    Stream(Vec<&'static str>),
    /// First chunk immediately, second only once the notify fires.
    Gated(&'static str, &'static str, Arc<Notify>),
    /// Non-success status with a body.
    Status(u16, &'static str),
}

#[derive(Clone, Debug)]
pub struct ReceivedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    behavior: GatewayBehavior,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

pub struct MockGateway {
    pub url: String,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl MockGateway {
    pub async fn start(behavior: GatewayBehavior) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = MockState { behavior, received: received.clone() };

        let app = Router::new()
            .route("/v1/chat/completions", post(completions_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = server.await {
                eprintln!("Mock gateway error: {}", e);
            }
        });

        Self {
            url: format!("http://{}/v1/chat/completions", addr),
            received,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }
    }
}

async fn completions_handler(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    state.received.lock().unwrap().push(ReceivedRequest { authorization, body });

    match state.behavior {
        GatewayBehavior::Stream(chunks) => {
            let stream = stream::iter(
                chunks.into_iter().map(|c| Ok::<_, Infallible>(Bytes::from_static(c.as_bytes())))
            );
            event_stream(Body::from_stream(stream))
        }
        GatewayBehavior::Gated(first, second, gate) => {
            let stream = stream::once(async move {
                Ok::<_, Infallible>(Bytes::from_static(first.as_bytes()))
            }).chain(
                stream::once(async move {
                    gate.notified().await;
                    Ok::<_, Infallible>(Bytes::from_static(second.as_bytes()))
                })
            );
            event_stream(Body::from_stream(stream))
        }
        GatewayBehavior::Status(code, body) =>
            (StatusCode::from_u16(code).unwrap(), body).into_response(),
    }
}

fn event_stream(body: Body) -> Response {
    Response::builder()
        .header(CONTENT_TYPE, "text/event-stream")
        .body(body)
        .unwrap()
}

/// Relay router wired to the given gateway url.
pub fn relay_app(gateway_url: &str, api_key: Option<&str>) -> Router {
    let client = GatewayChatClient::new(
        api_key.map(str::to_owned),
        TEST_MODEL.to_string(),
        gateway_url.to_string(),
        Duration::from_secs(2),
    ).unwrap();
    let state = AppState::new(Arc::new(client), SystemPrompt::new(TEST_PROMPT));
    build_router(state, ROUTE, 1024 * 1024)
}
