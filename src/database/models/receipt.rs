use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// One donation joined with its donor and issuing center, looked up by the
/// (receipt number, donor mobile) pair. Knowledge of both values is the
/// access credential for the public receipt endpoints.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReceiptRecord {
    pub receipt_number: String,
    pub donation_amount: Decimal,
    pub donation_date: NaiveDate,
    pub payment_mode: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub center_legal_name: Option<String>,
    pub center_address: Option<String>,
    pub center_phone: Option<String>,
    pub website: Option<String>,
}
