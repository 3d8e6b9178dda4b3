use axum::extract::{Path, Query};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::database::manager::DatabaseManager;
use crate::database::models::expense::NewExpense;
use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::query::Page;
use crate::services::ExpenseService;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub year: Option<String>,
}

/// GET /expenses-list?year&page
pub async fn list(
    Extension(session): Extension<AuthSession>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let page = Page::new(query.page)?;
    let response = ExpenseService::new(pool)
        .list(session.scope(), page, query.year.as_deref())
        .await?;
    Ok(Json(response))
}

/// GET /expenses/:id
pub async fn get(
    Extension(session): Extension<AuthSession>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let expense = ExpenseService::new(pool).get(session.scope(), id).await?;
    Ok(Json(expense))
}

/// POST /expenses/new
pub async fn create(
    Extension(session): Extension<AuthSession>,
    Json(input): Json<NewExpense>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let expense = ExpenseService::new(pool)
        .create(session.scope(), input)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": expense })),
    ))
}

/// POST /expenses/update/:id
pub async fn update(
    Extension(session): Extension<AuthSession>,
    Path(id): Path<i32>,
    Json(input): Json<NewExpense>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let expense = ExpenseService::new(pool)
        .update(session.scope(), id, input)
        .await?;
    Ok(Json(json!({ "success": true, "data": expense })))
}

/// GET /expenses-export?year
pub async fn export(
    Extension(session): Extension<AuthSession>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let csv = ExpenseService::new(pool)
        .export_csv(session.scope(), query.year.as_deref())
        .await?;
    Ok((
        [
            (CONTENT_TYPE, "text/csv"),
            (CONTENT_DISPOSITION, "attachment; filename=expenses.csv"),
        ],
        csv,
    ))
}
