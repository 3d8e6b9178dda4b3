use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::receipt::ReceiptRecord;
use crate::error::ApiError;
use crate::export;

const LOOKUP_SQL: &str = "SELECT d.receipt_number, d.donation_amount, d.donation_date, d.payment_mode, \
            dn.first_name, dn.last_name, dn.email, dn.city, dn.state, \
            c.center_legal_name, c.center_address, c.center_phone, c.website \
     FROM donations d \
     JOIN donors dn ON d.donor_id = dn.id \
     JOIN centers c ON d.center_id = c.id \
     WHERE d.receipt_number = $1 AND dn.mobile = $2";

/// Public receipt verification and printing. These endpoints are
/// unauthenticated; the (receipt number, donor mobile) pair acts as the
/// capability - both values must match a single donation row.
pub struct ReceiptService {
    pool: PgPool,
}

impl ReceiptService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lookup(
        &self,
        receipt: &str,
        mobile: &str,
    ) -> Result<Option<ReceiptRecord>, ApiError> {
        let row = sqlx::query_as::<_, ReceiptRecord>(LOOKUP_SQL)
            .bind(receipt)
            .bind(mobile)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(row)
    }

    pub async fn validate(&self, receipt: &str, mobile: &str) -> Result<bool, ApiError> {
        Ok(self.lookup(receipt, mobile).await?.is_some())
    }

    /// Render the receipt PDF, or 404 when the pair matches no donation.
    pub async fn pdf(&self, receipt: &str, mobile: &str) -> Result<Vec<u8>, ApiError> {
        let record = self
            .lookup(receipt, mobile)
            .await?
            .ok_or_else(|| ApiError::not_found("Invalid receipt"))?;
        Ok(export::render_receipt_pdf(&record)?)
    }
}
