use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{self, Claims};
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::query::Role;
use crate::services::AdminUserService;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /login - verify credentials and establish the session cookie.
pub async fn login(Json(input): Json<LoginRequest>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let service = AdminUserService::new(pool);

    let user = service
        .find_by_username(input.username.trim())
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username"))?;

    if !auth::verify_password(&input.password, &user.password_digest) {
        return Err(ApiError::unauthorized("Invalid password"));
    }

    // Unknown role strings are a data fault, not a client error.
    let role = user.role().ok_or_else(|| {
        tracing::error!("Admin {} has unrecognized role {:?}", user.id, user.role);
        ApiError::internal_server_error("Account misconfigured")
    })?;

    let claims = Claims::new(user.id, role, user.center_id);
    let token = auth::generate_token(&claims).map_err(|e| {
        tracing::error!("Session token generation failed: {}", e);
        ApiError::internal_server_error("Could not establish session")
    })?;

    let landing = match role {
        Role::Admin => "/admin-manager",
        Role::CenterAdmin => "/dashboard",
    };

    Ok((
        AppendHeaders([(SET_COOKIE, auth::session_cookie(&token))]),
        Json(json!({
            "success": true,
            "data": { "role": role, "redirect": landing }
        })),
    ))
}

/// POST /logout - clear the session cookie.
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, auth::clear_session_cookie())]),
        Json(json!({ "success": true })),
    )
}
