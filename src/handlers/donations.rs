use axum::extract::{Path, Query};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::database::manager::DatabaseManager;
use crate::database::models::donation::NewDonation;
use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::query::Page;
use crate::services::DonationService;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub year: Option<String>,
}

/// GET /donations-list?year&page
pub async fn list(
    Extension(session): Extension<AuthSession>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let page = Page::new(query.page)?;
    let response = DonationService::new(pool)
        .list(session.scope(), page, query.year.as_deref())
        .await?;
    Ok(Json(response))
}

/// GET /donations/:id
pub async fn get(
    Extension(session): Extension<AuthSession>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let donation = DonationService::new(pool).get(session.scope(), id).await?;
    Ok(Json(donation))
}

/// POST /donations/new
pub async fn create(
    Extension(session): Extension<AuthSession>,
    Json(input): Json<NewDonation>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let donation = DonationService::new(pool)
        .create(session.scope(), input)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": donation })),
    ))
}

/// GET /donations-export?year - full CSV under the same scope + year filter
/// as the list.
pub async fn export(
    Extension(session): Extension<AuthSession>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let csv = DonationService::new(pool)
        .export_csv(session.scope(), query.year.as_deref())
        .await?;
    Ok((
        [
            (CONTENT_TYPE, "text/csv"),
            (CONTENT_DISPOSITION, "attachment; filename=donations.csv"),
        ],
        csv,
    ))
}
