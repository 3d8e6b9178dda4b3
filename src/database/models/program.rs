use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Program {
    pub id: i32,
    pub program_name: String,
    pub description: Option<String>,
    pub program_date: NaiveDate,
    pub center_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProgram {
    pub program_name: String,
    pub description: Option<String>,
    pub program_date: NaiveDate,
}

/// Option row for the program dropdown on entry forms.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProgramOption {
    pub id: i32,
    pub program_name: String,
}
