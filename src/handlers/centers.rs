use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::database::manager::DatabaseManager;
use crate::database::models::admin::{NewAdminUser, ResetPassword};
use crate::database::models::center::NewCenter;
use crate::error::ApiError;
use crate::services::{AdminUserService, CenterService};

// All routes in this module sit behind the Admin-only gate.

/// GET /centers
pub async fn list() -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let centers = CenterService::new(pool).list().await?;
    Ok(Json(centers))
}

/// POST /centers/create
pub async fn create(Json(input): Json<NewCenter>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let center = CenterService::new(pool).create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": center })),
    ))
}

/// POST /admin/create-user
pub async fn create_admin(Json(input): Json<NewAdminUser>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let admin = AdminUserService::new(pool).create_center_admin(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": admin })),
    ))
}

/// GET /admin/list
pub async fn list_admins() -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let admins = AdminUserService::new(pool).list_center_admins().await?;
    Ok(Json(admins))
}

/// POST /admin/reset-password
pub async fn reset_password(
    Json(input): Json<ResetPassword>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    AdminUserService::new(pool).reset_password(input).await?;
    Ok(Json(json!({ "success": true })))
}
