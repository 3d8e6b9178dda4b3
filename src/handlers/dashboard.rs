use axum::extract::Query;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::services::{DashboardService, ProfileService};

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub fy: Option<String>,
}

/// GET /dashboard-stats?fy
pub async fn stats(
    Extension(session): Extension<AuthSession>,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let stats = DashboardService::new(pool)
        .stats(session.scope(), query.fy.as_deref())
        .await?;
    Ok(Json(stats))
}

/// GET /profile-data
pub async fn profile(
    Extension(session): Extension<AuthSession>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let card = ProfileService::new(pool).card(&session).await?;
    Ok(Json(card))
}
