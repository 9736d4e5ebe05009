use mb_api::{ApiConfig, ApiState};

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: sqlx::PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    let config = ApiConfig::from_shuttle_secrets(&secrets)
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    // Shuttle installs its own tracing subscriber
    let metrics_handle = mb_api::metrics::init_metrics()?;

    sqlx::migrate!("../../crates/mb-db/migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration error: {e}"))?;

    let state = ApiState::new(&config, pool);
    let app = mb_api::router::app(state, config.parsed_allowed_origins(), metrics_handle);

    tracing::info!(environment = ?config.env, "MERN Buddy API ready on Shuttle");

    Ok(app.into())
}
