// Copyright 2025 polybench Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP front end for `polybench serve`.
//!
//! `GET /api/benchmark` runs the benchmarks and answers with a
//! [`BenchmarkResponse`]. Every other path is served from the static
//! directory (the results frontend).

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use polybench_benchmarks::external::ExternalRunner;
use polybench_benchmarks::{run_all_benchmarks, BenchmarkResponse};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3030";

/// Default static files directory.
pub const DEFAULT_STATIC_DIR: &str = "frontend";

/// Configuration for the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub addr: SocketAddr,
    /// Directory served for non-API paths.
    pub static_dir: PathBuf,
    /// Runners executed after the native workloads on each request.
    pub runners: Vec<ExternalRunner>,
}

/// Shared state for the API handlers.
#[derive(Debug)]
pub struct ServerState {
    runners: Vec<ExternalRunner>,
    // Runs never overlap.
    run_lock: Mutex<()>,
}

impl ServerState {
    /// Create state for the given runners.
    pub fn new(runners: Vec<ExternalRunner>) -> Self {
        Self {
            runners,
            run_lock: Mutex::new(()),
        }
    }
}

/// API error response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "BENCHMARK_FAILED",
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.code,
                "message": self.message,
            },
            "meta": {
                "timestamp": Utc::now().to_rfc3339(),
            }
        }));
        (self.status, body).into_response()
    }
}

/// Build the router: the benchmark API plus the static fallback.
pub fn router(state: Arc<ServerState>, static_dir: impl Into<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/api/benchmark", get(run_benchmark))
        .fallback_service(ServeDir::new(static_dir.into()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn run_benchmark(State(state): State<Arc<ServerState>>) -> Result<Json<BenchmarkResponse>, ApiError> {
    let _guard = state.run_lock.lock().await;

    let runners = state.runners.clone();
    let results = tokio::task::spawn_blocking(move || run_all_benchmarks(&runners))
        .await
        .map_err(|e| {
            error!(error = %e, "benchmark task failed");
            ApiError::internal(e.to_string())
        })?;

    if let Some(bad) = results.iter().find_map(|r| r.validate().err()) {
        return Err(ApiError::internal(bad.to_string()));
    }

    info!(count = results.len(), "benchmark request served");
    Ok(Json(BenchmarkResponse::new(results)))
}

/// Bind `config.addr` and serve until the process is stopped.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(ServerState::new(config.runners));
    let app = router(state, config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %listener.local_addr()?, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
