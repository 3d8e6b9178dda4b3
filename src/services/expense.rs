use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;

use crate::database::exec;
use crate::database::manager::DatabaseError;
use crate::database::models::expense::{Expense, ExpenseListRow, NewExpense};
use crate::error::ApiError;
use crate::export;
use crate::query::{apply_fiscal_year, AccessScope, Page, PagedResponse, QueryFragments};

const FROM: &str = "expenses e LEFT JOIN programs p ON e.program_id = p.id";
const LIST_COLUMNS: &str = "e.id, p.program_name, e.expense_amount, e.expense_date, \
                            e.expense_description, e.submitted_by, e.status, e.remarks";
const ORDER: &str = "e.expense_date DESC, e.id DESC";

const EXPORT_HEADERS: [&str; 7] = [
    "Program",
    "Amount",
    "Expense Date",
    "Description",
    "Submitted By",
    "Status",
    "Remarks",
];

pub struct ExpenseService {
    pool: PgPool,
}

impl ExpenseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        scope: AccessScope,
        page: Page,
        year: Option<&str>,
    ) -> Result<PagedResponse<ExpenseListRow>, ApiError> {
        let mut frags = self.filters(scope, year)?;

        let total = exec::count_with(&self.pool, &frags, FROM).await?;
        let sql = frags.select_page_sql(LIST_COLUMNS, FROM, ORDER, &page);
        let rows: Vec<ExpenseListRow> =
            exec::fetch_all_as(&self.pool, &sql, frags.params()).await?;

        Ok(PagedResponse::new(rows, total, &page))
    }

    pub async fn get(&self, scope: AccessScope, id: i32) -> Result<Expense, ApiError> {
        let mut frags = QueryFragments::new();
        frags.push_eq("id", Value::from(id));
        scope.apply(&mut frags, "center_id");

        let sql = frags.select_sql("*", "expenses", "id DESC");
        let row: Option<Expense> =
            exec::fetch_optional_as(&self.pool, &sql, frags.params()).await?;
        row.ok_or_else(|| ApiError::not_found("Expense not found"))
    }

    pub async fn create(&self, scope: AccessScope, input: NewExpense) -> Result<Expense, ApiError> {
        validate_expense(&input)?;

        let row = sqlx::query_as::<_, Expense>(
            "INSERT INTO expenses \
             (program_id, expense_amount, expense_date, expense_description, \
              submitted_by, status, remarks, center_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(input.program_id)
        .bind(input.expense_amount)
        .bind(input.expense_date)
        .bind(&input.expense_description)
        .bind(input.submitted_by.trim())
        .bind(&input.status)
        .bind(&input.remarks)
        .bind(scope.center_id())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(row)
    }

    pub async fn update(
        &self,
        scope: AccessScope,
        id: i32,
        input: NewExpense,
    ) -> Result<Expense, ApiError> {
        validate_expense(&input)?;

        let row = sqlx::query_as::<_, Expense>(
            "UPDATE expenses SET \
             program_id = $1, expense_amount = $2, expense_date = $3, \
             expense_description = $4, submitted_by = $5, status = $6, remarks = $7 \
             WHERE id = $8 AND ($9::int4 IS NULL OR center_id = $9) RETURNING *",
        )
        .bind(input.program_id)
        .bind(input.expense_amount)
        .bind(input.expense_date)
        .bind(&input.expense_description)
        .bind(input.submitted_by.trim())
        .bind(&input.status)
        .bind(&input.remarks)
        .bind(id)
        .bind(scope.center_id())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        row.ok_or_else(|| ApiError::not_found("Expense not found"))
    }

    pub async fn export_csv(
        &self,
        scope: AccessScope,
        year: Option<&str>,
    ) -> Result<String, ApiError> {
        let frags = self.filters(scope, year)?;
        let sql = frags.select_sql(LIST_COLUMNS, FROM, ORDER);
        let rows: Vec<ExpenseListRow> =
            exec::fetch_all_as(&self.pool, &sql, frags.params()).await?;

        let cells: Vec<Vec<export::csv::Cell>> = rows.iter().map(export_row).collect();
        Ok(export::render_csv(&EXPORT_HEADERS, &cells)?)
    }

    fn filters(&self, scope: AccessScope, year: Option<&str>) -> Result<QueryFragments, ApiError> {
        let mut frags = QueryFragments::new();
        scope.apply(&mut frags, "e.center_id");
        apply_fiscal_year(&mut frags, "e.expense_date", year)?;
        Ok(frags)
    }
}

fn export_row(row: &ExpenseListRow) -> Vec<export::csv::Cell> {
    vec![
        row.program_name.clone(),
        Some(row.expense_amount.to_string()),
        Some(row.expense_date.to_string()),
        row.expense_description.clone(),
        Some(row.submitted_by.clone()),
        row.status.clone(),
        row.remarks.clone(),
    ]
}

fn validate_expense(input: &NewExpense) -> Result<(), ApiError> {
    if input.expense_amount <= Decimal::ZERO {
        return Err(ApiError::bad_request("Expense amount must be greater than zero"));
    }
    if input.submitted_by.trim().is_empty() {
        return Err(ApiError::bad_request("Submitted by is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_expense() -> NewExpense {
        NewExpense {
            program_id: None,
            expense_amount: Decimal::new(10000, 2),
            expense_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            expense_description: Some("Venue rent".to_string()),
            submitted_by: "Ravi".to_string(),
            status: Some("Pending".to_string()),
            remarks: None,
        }
    }

    #[test]
    fn amount_must_be_positive() {
        let mut input = valid_expense();
        assert!(validate_expense(&input).is_ok());
        input.expense_amount = Decimal::ZERO;
        assert!(validate_expense(&input).is_err());
        input.expense_amount = Decimal::new(-500, 2);
        assert!(validate_expense(&input).is_err());
    }

    #[test]
    fn submitted_by_must_be_non_blank() {
        let mut input = valid_expense();
        input.submitted_by = "   ".to_string();
        assert!(validate_expense(&input).is_err());
    }

    #[test]
    fn export_rows_match_header_width() {
        let row = ExpenseListRow {
            id: 1,
            program_name: None,
            expense_amount: Decimal::new(10000, 2),
            expense_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            expense_description: None,
            submitted_by: "Ravi".to_string(),
            status: None,
            remarks: None,
        };
        assert_eq!(export_row(&row).len(), EXPORT_HEADERS.len());
    }
}
