//! HTTP dataset server.
//!
//! Serves synthetic experiment datasets as JSON. Each `POST /generate/<kind>`
//! body is a parameter object; missing fields take their defaults. Every
//! request builds its own random source, so concurrent requests never share
//! draw order.

use std::sync::Arc;

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde_json::{Value, json};

use qsynth_core::{
    BellParams, DecayParams, Error, ExperimentParameters, RabiParams, generate,
};

/// Server configuration and per-request limits.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted `time_steps`.
    pub max_time_steps: usize,
    /// Largest accepted `shots`.
    pub max_shots: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_time_steps: 100_000,
            max_shots: 10_000_000,
        }
    }
}

impl ServerConfig {
    /// `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn check_limits(&self, params: &ExperimentParameters) -> qsynth_core::Result<()> {
        if params.time_steps().is_some_and(|steps| steps > self.max_time_steps) {
            return Err(Error::Validation {
                field: "time_steps",
                reason: format!("must be at most {}", self.max_time_steps),
            });
        }
        if params.shots() > self.max_shots {
            return Err(Error::Validation {
                field: "shots",
                reason: format!("must be at most {}", self.max_shots),
            });
        }
        Ok(())
    }
}

/// Shared server state.
struct AppState {
    config: ServerConfig,
}

type Reply = (StatusCode, Json<Value>);

trait JsonWithStatus<T> {
    fn with_status(self, status: StatusCode) -> (StatusCode, Json<T>);
}

impl<T> JsonWithStatus<T> for Json<T> {
    fn with_status(self, status: StatusCode) -> (StatusCode, Json<T>) {
        (status, self)
    }
}

fn error_reply(status: StatusCode, detail: impl Into<String>) -> Reply {
    Json(json!({ "status": "error", "detail": detail.into() })).with_status(status)
}

fn run(state: &AppState, params: ExperimentParameters) -> Reply {
    let outcome = state
        .config
        .check_limits(&params)
        .and_then(|()| generate(&params));
    match outcome {
        Ok(result) => Json(json!({ "status": "success", "data": result.to_json() }))
            .with_status(StatusCode::OK),
        Err(e) if e.is_validation() => {
            log::debug!("rejected {} request: {e}", params.kind());
            error_reply(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            log::error!("{} generation failed: {e}", params.kind());
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn body_error(rejection: JsonRejection) -> Reply {
    error_reply(StatusCode::BAD_REQUEST, rejection.body_text())
}

async fn handle_rabi(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RabiParams>, JsonRejection>,
) -> Reply {
    match body {
        Ok(Json(params)) => run(&state, params.into()),
        Err(rejection) => body_error(rejection),
    }
}

async fn handle_decay(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DecayParams>, JsonRejection>,
) -> Reply {
    match body {
        Ok(Json(params)) => run(&state, params.into()),
        Err(rejection) => body_error(rejection),
    }
}

async fn handle_bell(
    State(state): State<Arc<AppState>>,
    body: Result<Json<BellParams>, JsonRejection>,
) -> Reply {
    match body {
        Ok(Json(params)) => run(&state, params.into()),
        Err(rejection) => body_error(rejection),
    }
}

async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": qsynth_core::VERSION,
    }))
}

async fn handle_index(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "name": "qsynth Server",
        "version": qsynth_core::VERSION,
        "limits": {
            "max_time_steps": state.config.max_time_steps,
            "max_shots": state.config.max_shots,
        },
        "endpoints": {
            "/": "This API index",
            "/health": "Health check",
            "/generate/rabi": {
                "method": "POST",
                "description": "Rabi oscillation scan",
                "params": ["omega", "time_max", "time_steps", "noise_rate", "shots", "seed"],
            },
            "/generate/decay": {
                "method": "POST",
                "description": "T1 relaxation and T2 coherence decay",
                "params": ["t1", "t2", "time_max", "time_steps", "noise_rate", "shots", "seed"],
            },
            "/generate/bell": {
                "method": "POST",
                "description": "Bell-state correlations and CHSH value",
                "params": ["theta", "noise_rate", "shots", "seed"],
            },
        },
        "examples": {
            "rabi": RabiParams { seed: Some(42), ..Default::default() },
            "decay": DecayParams::default(),
            "bell": BellParams { theta: 0.5, ..Default::default() },
        }
    }))
}

/// Build the axum router.
pub fn build_router(config: ServerConfig) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/generate/rabi", post(handle_rabi))
        .route("/generate/decay", post(handle_decay))
        .route("/generate/bell", post(handle_bell))
        .with_state(state)
}

/// Run the HTTP dataset server until the listener fails.
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let addr = config.addr();
    let app = build_router(config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("qsynth server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
