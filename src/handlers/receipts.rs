use axum::extract::{Path, Query};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::services::ReceiptService;

#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    pub receipt: String,
    pub mobile: String,
}

/// GET /receipt-validate?receipt&mobile - public verification of a
/// (receipt number, donor mobile) pair.
pub async fn validate(Query(query): Query<ValidateQuery>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let valid = ReceiptService::new(pool)
        .validate(&query.receipt, &query.mobile)
        .await?;
    Ok(Json(json!({ "valid": valid })))
}

/// GET /receipt-pdf/:receipt/:mobile - public receipt printing. The pair is
/// re-validated by the service; a mismatch is a 404, never a blank PDF.
pub async fn pdf(
    Path((receipt, mobile)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let bytes = ReceiptService::new(pool).pdf(&receipt, &mobile).await?;
    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("inline; filename=receipt-{}.pdf", receipt),
            ),
        ],
        bytes,
    ))
}
