use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;

use mb_db::repositories::{goal as goal_repo, topic as topic_repo};

use super::model::DashboardStats;
use crate::{ApiState, auth::AuthUser, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/stats", get(dashboard_stats))
}

async fn dashboard_stats(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<DashboardStats>, ApiError> {
    let (topics, goals) = tokio::try_join!(
        topic_repo::list_by_owner(&state.pool, auth_user.user_id),
        goal_repo::list_by_owner(&state.pool, auth_user.user_id),
    )?;

    Ok(Json(DashboardStats::compute(
        &topics,
        &goals,
        Utc::now().date_naive(),
    )))
}
