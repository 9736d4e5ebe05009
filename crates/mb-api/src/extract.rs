//! Request extractors that report failures as [`ApiError`].

use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON body extractor.
///
/// Behaves like [`axum::Json`] but malformed bodies, wrong field types and
/// out-of-set enum values become a 400 with a `message`, like every other
/// validation failure.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
