use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{Goal, GoalDraft};

pub async fn list_by_owner<'e, E>(executor: E, owner_id: Uuid) -> Result<Vec<Goal>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, owner_id, title, description, target_date, completed, priority, created_at, updated_at
            FROM goals
            WHERE owner_id = $1
            ORDER BY target_date ASC, created_at ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(executor)
    .await
}

/// Open goals due on or before `horizon`, overdue ones included.
pub async fn list_upcoming<'e, E>(
    executor: E,
    owner_id: Uuid,
    horizon: NaiveDate,
) -> Result<Vec<Goal>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, owner_id, title, description, target_date, completed, priority, created_at, updated_at
            FROM goals
            WHERE owner_id = $1 AND completed = FALSE AND target_date <= $2
            ORDER BY target_date ASC, created_at ASC
        "#,
    )
    .bind(owner_id)
    .bind(horizon)
    .fetch_all(executor)
    .await
}

/// Fetch a goal and lock its row until the surrounding transaction ends.
pub async fn find_for_update<'e, E>(
    executor: E,
    goal_id: Uuid,
    owner_id: Uuid,
) -> Result<Option<Goal>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, owner_id, title, description, target_date, completed, priority, created_at, updated_at
            FROM goals
            WHERE id = $1 AND owner_id = $2
            FOR UPDATE
        "#,
    )
    .bind(goal_id)
    .bind(owner_id)
    .fetch_optional(executor)
    .await
}

pub async fn insert<'e, E>(executor: E, owner_id: Uuid, draft: &GoalDraft) -> Result<Goal, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO goals (owner_id, title, description, target_date, completed, priority)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, title, description, target_date, completed, priority, created_at, updated_at
        "#,
    )
    .bind(owner_id)
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(draft.target_date)
    .bind(draft.completed)
    .bind(draft.priority)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E>(
    executor: E,
    goal_id: Uuid,
    owner_id: Uuid,
    draft: &GoalDraft,
) -> Result<Option<Goal>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE goals
            SET title = $3,
                description = $4,
                target_date = $5,
                completed = $6,
                priority = $7,
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, description, target_date, completed, priority, created_at, updated_at
        "#,
    )
    .bind(goal_id)
    .bind(owner_id)
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(draft.target_date)
    .bind(draft.completed)
    .bind(draft.priority)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, goal_id: Uuid, owner_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM goals WHERE id = $1 AND owner_id = $2
        "#,
    )
    .bind(goal_id)
    .bind(owner_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
