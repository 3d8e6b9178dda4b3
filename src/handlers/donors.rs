use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::database::manager::DatabaseManager;
use crate::database::models::donor::{NewDonor, UpdateDonor};
use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::query::Page;
use crate::services::DonorService;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MobileQuery {
    pub mobile: String,
}

/// GET /donors?page&search
pub async fn list(
    Extension(session): Extension<AuthSession>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let page = Page::new(query.page)?;
    let response = DonorService::new(pool)
        .list(session.scope(), page, query.search.as_deref())
        .await?;
    Ok(Json(response))
}

/// GET /donors/search?mobile= - exact-mobile lookup for the donation form
pub async fn search(
    Extension(session): Extension<AuthSession>,
    Query(query): Query<MobileQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let matches = DonorService::new(pool)
        .search_by_mobile(session.scope(), &query.mobile)
        .await?;
    Ok(Json(matches))
}

/// GET /donors/:id
pub async fn get(
    Extension(session): Extension<AuthSession>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let donor = DonorService::new(pool).get(session.scope(), id).await?;
    Ok(Json(donor))
}

/// POST /donors/new
pub async fn create(
    Extension(session): Extension<AuthSession>,
    Json(input): Json<NewDonor>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let donor = DonorService::new(pool).create(session.scope(), input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": donor })),
    ))
}

/// POST /donors/update/:id
pub async fn update(
    Extension(session): Extension<AuthSession>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateDonor>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let donor = DonorService::new(pool)
        .update(session.scope(), id, input)
        .await?;
    Ok(Json(json!({ "success": true, "data": donor })))
}
