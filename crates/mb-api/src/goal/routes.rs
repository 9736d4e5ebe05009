use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::Utc;
use serde_json::{Value, json};

use mb_db::{
    models::{Goal, GoalDraft},
    repositories::goal as goal_repo,
};

use super::model::{GoalPayload, upcoming_horizon};
use crate::{
    ApiState, auth::AuthUser, error::ApiError, extract::ApiJson,
    validation::parse_resource_id,
};

/// Create the goal routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/upcoming", get(list_upcoming_goals))
        .route("/goals/{id}", put(update_goal).delete(delete_goal))
}

fn goal_not_found() -> ApiError {
    ApiError::NotFound("Goal not found".to_string())
}

/// All goals of the caller, soonest target date first
async fn list_goals(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    let goals = goal_repo::list_by_owner(&state.pool, auth_user.user_id).await?;
    Ok(Json(goals))
}

/// Open goals due within the next week, overdue ones included
async fn list_upcoming_goals(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    let horizon = upcoming_horizon(Utc::now().date_naive());
    let goals = goal_repo::list_upcoming(&state.pool, auth_user.user_id, horizon).await?;
    Ok(Json(goals))
}

async fn create_goal(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<GoalPayload>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    let draft = payload.into_draft()?;
    let goal = goal_repo::insert(&state.pool, auth_user.user_id, &draft).await?;

    tracing::info!(goal_id = %goal.id, user_id = %auth_user.user_id, "goal created");
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn update_goal(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<GoalPayload>,
) -> Result<Json<Goal>, ApiError> {
    let goal_id = parse_resource_id(&id, "Goal")?;

    let mut tx = state.pool.begin().await?;

    let current = goal_repo::find_for_update(&mut *tx, goal_id, auth_user.user_id)
        .await?
        .ok_or_else(goal_not_found)?;

    let draft = payload.merge_into(GoalDraft::from(current))?;

    let goal = goal_repo::update(&mut *tx, goal_id, auth_user.user_id, &draft)
        .await?
        .ok_or_else(goal_not_found)?;

    tx.commit().await?;

    Ok(Json(goal))
}

async fn delete_goal(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let goal_id = parse_resource_id(&id, "Goal")?;

    let deleted = goal_repo::delete(&state.pool, goal_id, auth_user.user_id).await?;
    if deleted == 0 {
        return Err(goal_not_found());
    }

    tracing::info!(%goal_id, user_id = %auth_user.user_id, "goal deleted");
    Ok(Json(json!({ "message": "Goal deleted successfully" })))
}
