use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgPool, Row};

use crate::database::exec;
use crate::database::manager::DatabaseError;
use crate::error::ApiError;
use crate::query::{apply_fiscal_year, AccessScope, QueryFragments};

/// Aggregate counts and sums for the dashboard, scoped to the caller and
/// optionally restricted to one fiscal year (date-bearing entities only).
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    #[serde(rename = "totalDonations")]
    pub total_donations: i64,
    #[serde(rename = "totalDonors")]
    pub total_donors: i64,
    #[serde(rename = "totalPrograms")]
    pub total_programs: i64,
    #[serde(rename = "totalExpenses")]
    pub total_expenses: i64,
    #[serde(rename = "donationAmount")]
    pub donation_amount: Decimal,
    #[serde(rename = "expenseAmount")]
    pub expense_amount: Decimal,
}

pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn stats(
        &self,
        scope: AccessScope,
        fiscal_year: Option<&str>,
    ) -> Result<DashboardStats, ApiError> {
        let total_donations = self
            .count("donations", scope, Some(("donation_date", fiscal_year)))
            .await?;
        let total_expenses = self
            .count("expenses", scope, Some(("expense_date", fiscal_year)))
            .await?;
        // Donors and programs carry no business date; the year filter does
        // not apply to them.
        let total_donors = self.count("donors", scope, None).await?;
        let total_programs = self.count("programs", scope, None).await?;

        let donation_amount = self
            .sum("donations", "donation_amount", scope, ("donation_date", fiscal_year))
            .await?;
        let expense_amount = self
            .sum("expenses", "expense_amount", scope, ("expense_date", fiscal_year))
            .await?;

        Ok(DashboardStats {
            total_donations,
            total_donors,
            total_programs,
            total_expenses,
            donation_amount,
            expense_amount,
        })
    }

    async fn count(
        &self,
        table: &str,
        scope: AccessScope,
        year_filter: Option<(&str, Option<&str>)>,
    ) -> Result<i64, ApiError> {
        let mut frags = QueryFragments::new();
        scope.apply(&mut frags, "center_id");
        if let Some((column, year)) = year_filter {
            apply_fiscal_year(&mut frags, column, year)?;
        }
        Ok(exec::count_with(&self.pool, &frags, table).await?)
    }

    async fn sum(
        &self,
        table: &str,
        column: &str,
        scope: AccessScope,
        year_filter: (&str, Option<&str>),
    ) -> Result<Decimal, ApiError> {
        let mut frags = QueryFragments::new();
        scope.apply(&mut frags, "center_id");
        let (date_column, year) = year_filter;
        apply_fiscal_year(&mut frags, date_column, year)?;

        let sql = format!(
            "SELECT COALESCE(SUM({}), 0) AS total FROM {}{}",
            column,
            table,
            frags.where_sql()
        );
        let mut q = sqlx::query(&sql);
        for p in frags.params() {
            q = exec::bind_value(q, p);
        }
        let row = q.fetch_one(&self.pool).await.map_err(DatabaseError::from)?;
        let total: Decimal = row.try_get("total").map_err(DatabaseError::from)?;
        Ok(total)
    }
}
