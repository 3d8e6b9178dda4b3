use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Donation {
    pub id: i32,
    pub receipt_number: String,
    pub donor_id: i32,
    pub program_id: Option<i32>,
    pub donation_amount: Decimal,
    pub donation_date: NaiveDate,
    pub payment_mode: Option<String>,
    pub remarks: Option<String>,
    pub center_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDonation {
    pub donor_id: i32,
    pub program_id: Option<i32>,
    pub donation_amount: Decimal,
    pub donation_date: NaiveDate,
    pub payment_mode: Option<String>,
    pub remarks: Option<String>,
}

/// Donation joined with its donor and optional program, as shown in the
/// list table and the CSV export.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DonationListRow {
    pub id: i32,
    pub receipt_number: String,
    pub donation_amount: Decimal,
    pub donation_date: NaiveDate,
    pub payment_mode: Option<String>,
    pub remarks: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub program_name: Option<String>,
}
