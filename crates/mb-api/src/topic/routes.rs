use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde_json::{Value, json};

use mb_db::{
    models::{Category, Topic, TopicDraft},
    repositories::topic as topic_repo,
};

use super::model::TopicPayload;
use crate::{
    ApiState, auth::AuthUser, error::ApiError, extract::ApiJson,
    validation::parse_resource_id,
};

/// Create the topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topics", get(list_topics).post(create_topic))
        .route("/topics/{id}", put(update_topic).delete(delete_topic))
        .route("/topics/category/{category}", get(list_topics_by_category))
}

fn topic_not_found() -> ApiError {
    ApiError::NotFound("Topic not found".to_string())
}

/// All topics of the caller, newest first
async fn list_topics(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Topic>>, ApiError> {
    let topics = topic_repo::list_by_owner(&state.pool, auth_user.user_id).await?;
    Ok(Json(topics))
}

async fn list_topics_by_category(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Topic>>, ApiError> {
    // Nothing can be stored outside the enum, so an unknown category matches no topic
    let Ok(category) = category.parse::<Category>() else {
        return Ok(Json(Vec::new()));
    };

    let topics =
        topic_repo::list_by_owner_and_category(&state.pool, auth_user.user_id, category).await?;
    Ok(Json(topics))
}

async fn create_topic(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<TopicPayload>,
) -> Result<(StatusCode, Json<Topic>), ApiError> {
    let draft = payload.into_draft()?;
    let topic = topic_repo::insert(&state.pool, auth_user.user_id, &draft).await?;

    tracing::info!(topic_id = %topic.id, user_id = %auth_user.user_id, "topic created");
    Ok((StatusCode::CREATED, Json(topic)))
}

async fn update_topic(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<TopicPayload>,
) -> Result<Json<Topic>, ApiError> {
    let topic_id = parse_resource_id(&id, "Topic")?;

    let mut tx = state.pool.begin().await?;

    let current = topic_repo::find_for_update(&mut *tx, topic_id, auth_user.user_id)
        .await?
        .ok_or_else(topic_not_found)?;

    // Validation happens before the write; dropping tx on error rolls back
    let draft = payload.merge_into(TopicDraft::from(current))?;

    let topic = topic_repo::update(&mut *tx, topic_id, auth_user.user_id, &draft)
        .await?
        .ok_or_else(topic_not_found)?;

    tx.commit().await?;

    Ok(Json(topic))
}

async fn delete_topic(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let topic_id = parse_resource_id(&id, "Topic")?;

    let deleted = topic_repo::delete(&state.pool, topic_id, auth_user.user_id).await?;
    if deleted == 0 {
        return Err(topic_not_found());
    }

    tracing::info!(%topic_id, user_id = %auth_user.user_id, "topic deleted");
    Ok(Json(json!({ "message": "Topic deleted successfully" })))
}
