use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i32,
    pub program_id: Option<i32>,
    pub expense_amount: Decimal,
    pub expense_date: NaiveDate,
    pub expense_description: Option<String>,
    pub submitted_by: String,
    pub status: Option<String>,
    pub remarks: Option<String>,
    pub center_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    pub program_id: Option<i32>,
    pub expense_amount: Decimal,
    pub expense_date: NaiveDate,
    pub expense_description: Option<String>,
    pub submitted_by: String,
    pub status: Option<String>,
    pub remarks: Option<String>,
}

/// Expense joined with its optional program, for the list and the export.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ExpenseListRow {
    pub id: i32,
    pub program_name: Option<String>,
    pub expense_amount: Decimal,
    pub expense_date: NaiveDate,
    pub expense_description: Option<String>,
    pub submitted_by: String,
    pub status: Option<String>,
    pub remarks: Option<String>,
}
