use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn,
    response::IntoResponse,
    routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{
    auth, goal, make_rate_limit_layer,
    metrics::{metrics_handler, track_metrics},
    middleware::{cors::create_cors_layer, rate_limit, request_id::request_id_middleware},
    state::ApiState,
    stats, topic,
};

pub const HEALTH_MESSAGE: &str = "MERN Buddy API is running!";

pub fn router() -> Router<ApiState> {
    let resource_routes = Router::new()
        .merge(topic::routes())
        .merge(goal::routes())
        .merge(stats::routes())
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ));

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(auth::routes())
        .merge(resource_routes)
        .fallback(handler_404)
}

/// Full service: API routes, `/metrics` and the cross-cutting layers.
///
/// The request-id layer is outermost so every log line of a request,
/// including the trace layer's, carries the id.
pub fn app(state: ApiState, allowed_origins: Vec<String>, metrics: PrometheusHandle) -> Router {
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    router()
        .with_state(state)
        .merge(metrics_routes)
        .layer(create_cors_layer(allowed_origins))
        .layer(trace_layer)
        .layer(from_fn(track_metrics))
        .layer(from_fn(request_id_middleware))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "message": HEALTH_MESSAGE }))
}

/// Ready once the database answers
async fn readiness(State(state): State<ApiState>) -> impl IntoResponse {
    match mb_db::ping(&state.pool).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "The requested resource was not found" })),
    )
}
