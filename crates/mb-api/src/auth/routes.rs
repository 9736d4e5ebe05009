use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use mb_db::{models::UserProfile, repositories::user as user_repo};

use super::{
    middleware::AuthUser,
    models::{AuthResponse, CredentialsRequest},
    service,
};
use crate::{ApiState, error::ApiError, extract::ApiJson, middleware::rate_limit};

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    // Credential endpoints get the strict limiter
    let credential_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .layer(make_rate_limit_layer!(
            rate_limit::AUTH_REPLENISH_MS,
            rate_limit::AUTH_BURST_SIZE
        ));

    let session_routes = Router::new().route("/auth/me", get(auth_me));

    Router::new().merge(credential_routes).merge(session_routes)
}

async fn register(
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let response =
        service::register(&state.pool, &state.auth, &payload.email, payload.password).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response =
        service::login(&state.pool, &state.auth, &payload.email, payload.password).await?;
    Ok(Json(response))
}

async fn auth_me(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<UserProfile>, ApiError> {
    // A valid token for a deleted account is no longer a session
    let profile = user_repo::find_profile_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::Auth("User not found".to_string()))?;

    Ok(Json(profile))
}
