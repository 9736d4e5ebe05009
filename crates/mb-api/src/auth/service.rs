use sqlx::PgPool;

use mb_db::repositories::user as user_repo;

use super::{
    jwt,
    models::{AuthResponse, UserResponse},
    validation,
};
use crate::{error::ApiError, metrics, state::AuthConfig};

/// Hash a password on the blocking pool; bcrypt is deliberately slow.
pub async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ApiError::Internal(format!("password hashing task failed: {e}")))?
        .map_err(ApiError::from)
}

pub async fn verify_password(password: String, password_hash: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| ApiError::Internal(format!("password verification task failed: {e}")))?
        .map_err(ApiError::from)
}

/// Create an account and sign it in.
pub async fn register(
    pool: &PgPool,
    auth: &AuthConfig,
    email: &str,
    password: String,
) -> Result<AuthResponse, ApiError> {
    let email = validation::normalize_email(email);
    validation::validate_email(&email)?;
    validation::validate_password(&password)?;

    let password_hash = hash_password(password, auth.bcrypt_cost).await?;

    let user = match user_repo::create(pool, &email, &password_hash).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(db_err))
            if db_err.constraint() == Some(user_repo::EMAIL_UNIQUE_CONSTRAINT) =>
        {
            metrics::record_auth_event("register", false);
            return Err(ApiError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    metrics::record_auth_event("register", true);
    tracing::info!(user_id = %user.id, "user registered");

    issue_session(auth, user.id, user.email)
}

/// Check credentials and issue a fresh token.
///
/// Unknown emails and wrong passwords are reported identically.
pub async fn login(
    pool: &PgPool,
    auth: &AuthConfig,
    email: &str,
    password: String,
) -> Result<AuthResponse, ApiError> {
    let email = validation::normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let invalid = || ApiError::Auth("Invalid email or password".to_string());

    let Some(credentials) = user_repo::find_credentials_by_email(pool, &email).await? else {
        metrics::record_auth_event("login", false);
        return Err(invalid());
    };

    if !verify_password(password, credentials.password_hash).await? {
        metrics::record_auth_event("login", false);
        tracing::debug!(user_id = %credentials.id, "login rejected: wrong password");
        return Err(invalid());
    }

    metrics::record_auth_event("login", true);
    issue_session(auth, credentials.id, credentials.email)
}

fn issue_session(
    auth: &AuthConfig,
    user_id: uuid::Uuid,
    email: String,
) -> Result<AuthResponse, ApiError> {
    let token = jwt::generate_jwt_token(
        user_id,
        email.clone(),
        &auth.jwt_secret,
        auth.jwt_expiry_hours,
    )?;

    Ok(AuthResponse {
        token,
        user: UserResponse { id: user_id, email },
    })
}
