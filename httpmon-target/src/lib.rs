//! Minimal HTTP server used as a load target for httpmon.
//!
//! | Route        | Response                                   |
//! |--------------|--------------------------------------------|
//! | `/ok`        | 200, plain body                            |
//! | `/recommend` | 200, body containing the marker byte       |
//! | `/fail`      | 500, JSON `ErrorResponse`                  |
//! | `/slow/:ms`  | 200 after sleeping `ms` milliseconds       |

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use httpmon_common::{ErrorResponse, RECOMMENDATION_MARKER};

pub mod config;
use config::{MAX_SLOW_DELAY, PLAIN_BODY};

/// Request counter shared by all handlers.
#[derive(Clone, Default)]
pub struct AppState {
    pub hits: Arc<AtomicU64>,
}

impl AppState {
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }
}

/// Target server configuration
#[derive(Debug, Clone)]
pub struct TargetConfig {
    pub address: SocketAddr,
}

/// Target server
pub struct TargetServer {
    config: TargetConfig,
    state: AppState,
}

impl TargetServer {
    pub fn new(config: TargetConfig) -> Self {
        Self { config, state: AppState::default() }
    }

    /// Shared state; clone before `run` to observe the hit counter.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    pub fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/ok", get(handle_ok))
            .route("/recommend", get(handle_recommend))
            .route("/fail", get(handle_fail))
            .route("/slow/:ms", get(handle_slow))
            .with_state(state)
    }

    /// Run the server, signalling `ready_tx` with the bound address once accepting connections
    pub async fn run(
        self,
        ready_tx: tokio::sync::oneshot::Sender<SocketAddr>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = Self::create_router(self.state);
        let listener = tokio::net::TcpListener::bind(self.config.address).await?;
        let local_addr = listener.local_addr()?;
        tracing::debug!(%local_addr, "target bound");
        ready_tx.send(local_addr).ok();
        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Body for `/recommend`: plain text with the marker byte in the middle.
pub fn recommendation_body() -> Vec<u8> {
    let mut body = b"recommendation:".to_vec();
    body.push(RECOMMENDATION_MARKER);
    body.extend_from_slice(b"\n");
    body
}

/// Handler for GET /ok
pub async fn handle_ok(State(state): State<AppState>) -> Response {
    state.hit();
    (StatusCode::OK, PLAIN_BODY).into_response()
}

pub async fn handle_recommend(State(state): State<AppState>) -> Response {
    state.hit();
    (StatusCode::OK, recommendation_body()).into_response()
}

pub async fn handle_fail(State(state): State<AppState>) -> Response {
    state.hit();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: "Simulated failure".to_string() }),
    )
        .into_response()
}

/// Handler for GET /slow/:ms: sleeps, then answers like `/ok`. Delays above `MAX_SLOW_DELAY` get 400.
pub async fn handle_slow(State(state): State<AppState>, Path(ms): Path<u64>) -> Response {
    state.hit();
    let delay = Duration::from_millis(ms);
    if delay > MAX_SLOW_DELAY {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Delay exceeds maximum of {} ms", MAX_SLOW_DELAY.as_millis()),
            }),
        )
            .into_response();
    }
    tokio::time::sleep(delay).await;
    (StatusCode::OK, PLAIN_BODY).into_response()
}
