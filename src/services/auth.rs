//! Authentication endpoints.

use crate::core::error::ApiError;
use crate::models::SessionUser;
use crate::utils::api_get;

/// Fetch the authenticated user with a fresh permission map.
pub async fn current_user() -> Result<SessionUser, ApiError> {
    api_get("/auth/me").await
}
