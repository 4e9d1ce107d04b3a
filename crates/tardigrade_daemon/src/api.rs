use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tardigrade_core::{WalkHistory, WalkStep};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::service::{ServiceError, WalkService};
use crate::store::TransactionStore;

// Response types
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// Maps a failed computation to an HTTP error; no partial history is sent.
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ServiceError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ServiceError::UpstreamRead(_) | ServiceError::Simulation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

// Handlers
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn get_history<S: TransactionStore>(
    State(service): State<Arc<WalkService<S>>>,
) -> Result<Json<WalkHistory>, ApiError> {
    Ok(Json(service.history().await?))
}

async fn get_latest<S: TransactionStore>(
    State(service): State<Arc<WalkService<S>>>,
) -> Result<Json<WalkStep>, ApiError> {
    Ok(Json(service.latest().await?))
}

pub fn router<S: TransactionStore>(service: Arc<WalkService<S>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/rpc", get(get_history::<S>))
        .route("/api/rpc/latest", get(get_latest::<S>))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(service)
}

pub async fn run_api_server<S: TransactionStore>(
    service: Arc<WalkService<S>>,
    addr: &str,
) -> anyhow::Result<()> {
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "API server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
