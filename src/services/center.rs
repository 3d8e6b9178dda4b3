use sqlx::PgPool;

use crate::database::exec;
use crate::database::manager::{is_unique_violation, DatabaseError};
use crate::database::models::center::{Center, NewCenter};
use crate::error::ApiError;
use crate::query::QueryFragments;

pub struct CenterService {
    pool: PgPool,
}

impl CenterService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All centers, newest first. Admin-only at the routing layer.
    pub async fn list(&self) -> Result<Vec<Center>, ApiError> {
        let frags = QueryFragments::new();
        let sql = frags.select_sql("*", "centers", "id DESC");
        let rows = exec::fetch_all_as(&self.pool, &sql, frags.params()).await?;
        Ok(rows)
    }

    pub async fn create(&self, input: NewCenter) -> Result<Center, ApiError> {
        if input.center_name.trim().is_empty() {
            return Err(ApiError::bad_request("Center name is required"));
        }
        if input.center_code.trim().is_empty() {
            return Err(ApiError::bad_request("Center code is required"));
        }

        let row = sqlx::query_as::<_, Center>(
            "INSERT INTO centers \
             (center_name, center_code, center_legal_name, center_address, \
              center_email, center_phone, center_pan, gst_number, website) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(input.center_name.trim())
        .bind(input.center_code.trim())
        .bind(&input.center_legal_name)
        .bind(&input.center_address)
        .bind(&input.center_email)
        .bind(&input.center_phone)
        .bind(&input.center_pan)
        .bind(&input.gst_number)
        .bind(&input.website)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                ApiError::conflict("A center with this code already exists")
            } else {
                DatabaseError::from(err).into()
            }
        })?;

        Ok(row)
    }
}
