use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{Category, Topic, TopicDraft};

pub async fn list_by_owner<'e, E>(executor: E, owner_id: Uuid) -> Result<Vec<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, owner_id, name, category, status, progress, notes, code_snippet, created_at, updated_at
            FROM topics
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(executor)
    .await
}

pub async fn list_by_owner_and_category<'e, E>(
    executor: E,
    owner_id: Uuid,
    category: Category,
) -> Result<Vec<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, owner_id, name, category, status, progress, notes, code_snippet, created_at, updated_at
            FROM topics
            WHERE owner_id = $1 AND category = $2
            ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(owner_id)
    .bind(category)
    .fetch_all(executor)
    .await
}

/// Fetch a topic and lock its row until the surrounding transaction ends.
pub async fn find_for_update<'e, E>(
    executor: E,
    topic_id: Uuid,
    owner_id: Uuid,
) -> Result<Option<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, owner_id, name, category, status, progress, notes, code_snippet, created_at, updated_at
            FROM topics
            WHERE id = $1 AND owner_id = $2
            FOR UPDATE
        "#,
    )
    .bind(topic_id)
    .bind(owner_id)
    .fetch_optional(executor)
    .await
}

pub async fn insert<'e, E>(
    executor: E,
    owner_id: Uuid,
    draft: &TopicDraft,
) -> Result<Topic, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO topics (owner_id, name, category, status, progress, notes, code_snippet)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, owner_id, name, category, status, progress, notes, code_snippet, created_at, updated_at
        "#,
    )
    .bind(owner_id)
    .bind(&draft.name)
    .bind(draft.category)
    .bind(draft.status)
    .bind(draft.progress)
    .bind(&draft.notes)
    .bind(&draft.code_snippet)
    .fetch_one(executor)
    .await
}

/// Overwrite every mutable field. Returns `None` when no row matches id and owner.
pub async fn update<'e, E>(
    executor: E,
    topic_id: Uuid,
    owner_id: Uuid,
    draft: &TopicDraft,
) -> Result<Option<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE topics
            SET name = $3,
                category = $4,
                status = $5,
                progress = $6,
                notes = $7,
                code_snippet = $8,
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, name, category, status, progress, notes, code_snippet, created_at, updated_at
        "#,
    )
    .bind(topic_id)
    .bind(owner_id)
    .bind(&draft.name)
    .bind(draft.category)
    .bind(draft.status)
    .bind(draft.progress)
    .bind(&draft.notes)
    .bind(&draft.code_snippet)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, topic_id: Uuid, owner_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM topics WHERE id = $1 AND owner_id = $2
        "#,
    )
    .bind(topic_id)
    .bind(owner_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
