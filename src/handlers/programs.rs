use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::database::manager::DatabaseManager;
use crate::database::models::program::NewProgram;
use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::query::Page;
use crate::services::ProgramService;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
}

/// GET /programs?page
pub async fn list(
    Extension(session): Extension<AuthSession>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let page = Page::new(query.page)?;
    let response = ProgramService::new(pool).list(session.scope(), page).await?;
    Ok(Json(response))
}

/// GET /programs-dropdown
pub async fn dropdown(
    Extension(session): Extension<AuthSession>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let options = ProgramService::new(pool).dropdown(session.scope()).await?;
    Ok(Json(options))
}

/// GET /programs/:id
pub async fn get(
    Extension(session): Extension<AuthSession>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let program = ProgramService::new(pool).get(session.scope(), id).await?;
    Ok(Json(program))
}

/// POST /programs/new
pub async fn create(
    Extension(session): Extension<AuthSession>,
    Json(input): Json<NewProgram>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let program = ProgramService::new(pool)
        .create(session.scope(), input)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": program })),
    ))
}

/// PUT /programs/:id
pub async fn update(
    Extension(session): Extension<AuthSession>,
    Path(id): Path<i32>,
    Json(input): Json<NewProgram>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let program = ProgramService::new(pool)
        .update(session.scope(), id, input)
        .await?;
    Ok(Json(json!({ "success": true, "data": program })))
}
