use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;

use crate::database::exec;
use crate::database::manager::DatabaseError;
use crate::database::models::donation::{Donation, DonationListRow, NewDonation};
use crate::error::ApiError;
use crate::export;
use crate::query::{apply_fiscal_year, AccessScope, Page, PagedResponse, QueryFragments};

const FROM: &str = "donations d \
                    JOIN donors dn ON d.donor_id = dn.id \
                    LEFT JOIN programs p ON d.program_id = p.id";
const LIST_COLUMNS: &str = "d.id, d.receipt_number, d.donation_amount, d.donation_date, \
                            d.payment_mode, d.remarks, dn.first_name, dn.last_name, p.program_name";
const ORDER: &str = "d.donation_date DESC, d.id DESC";

const EXPORT_HEADERS: [&str; 8] = [
    "Receipt Number",
    "First Name",
    "Last Name",
    "Program",
    "Amount",
    "Donation Date",
    "Payment Mode",
    "Remarks",
];

pub struct DonationService {
    pool: PgPool,
}

impl DonationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated donation list joined with donor and program, scoped to the
    /// caller and optionally restricted to one fiscal year.
    pub async fn list(
        &self,
        scope: AccessScope,
        page: Page,
        year: Option<&str>,
    ) -> Result<PagedResponse<DonationListRow>, ApiError> {
        let mut frags = self.filters(scope, year)?;

        let total = exec::count_with(&self.pool, &frags, FROM).await?;
        let sql = frags.select_page_sql(LIST_COLUMNS, FROM, ORDER, &page);
        let rows: Vec<DonationListRow> =
            exec::fetch_all_as(&self.pool, &sql, frags.params()).await?;

        Ok(PagedResponse::new(rows, total, &page))
    }

    pub async fn get(&self, scope: AccessScope, id: i32) -> Result<Donation, ApiError> {
        let mut frags = QueryFragments::new();
        frags.push_eq("id", Value::from(id));
        scope.apply(&mut frags, "center_id");

        let sql = frags.select_sql("*", "donations", "id DESC");
        let row: Option<Donation> =
            exec::fetch_optional_as(&self.pool, &sql, frags.params()).await?;
        row.ok_or_else(|| ApiError::not_found("Donation not found"))
    }

    /// Record a donation. The center stamp comes from the acting session,
    /// never from the request body.
    pub async fn create(
        &self,
        scope: AccessScope,
        input: NewDonation,
    ) -> Result<Donation, ApiError> {
        if input.donation_amount <= Decimal::ZERO {
            return Err(ApiError::bad_request("Donation amount must be greater than zero"));
        }

        let receipt_number = generate_receipt_number();
        let row = sqlx::query_as::<_, Donation>(
            "INSERT INTO donations \
             (receipt_number, donor_id, program_id, donation_amount, donation_date, \
              payment_mode, remarks, center_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&receipt_number)
        .bind(input.donor_id)
        .bind(input.program_id)
        .bind(input.donation_amount)
        .bind(input.donation_date)
        .bind(&input.payment_mode)
        .bind(&input.remarks)
        .bind(scope.center_id())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(row)
    }

    /// Full (unpaginated) CSV export under the identical predicates as the
    /// list endpoint.
    pub async fn export_csv(
        &self,
        scope: AccessScope,
        year: Option<&str>,
    ) -> Result<String, ApiError> {
        let frags = self.filters(scope, year)?;
        let sql = frags.select_sql(LIST_COLUMNS, FROM, ORDER);
        let rows: Vec<DonationListRow> =
            exec::fetch_all_as(&self.pool, &sql, frags.params()).await?;

        let cells: Vec<Vec<export::csv::Cell>> = rows.iter().map(export_row).collect();
        Ok(export::render_csv(&EXPORT_HEADERS, &cells)?)
    }

    fn filters(&self, scope: AccessScope, year: Option<&str>) -> Result<QueryFragments, ApiError> {
        let mut frags = QueryFragments::new();
        scope.apply(&mut frags, "d.center_id");
        apply_fiscal_year(&mut frags, "d.donation_date", year)?;
        Ok(frags)
    }
}

fn export_row(row: &DonationListRow) -> Vec<export::csv::Cell> {
    vec![
        Some(row.receipt_number.clone()),
        Some(row.first_name.clone()),
        Some(row.last_name.clone()),
        row.program_name.clone(),
        Some(row.donation_amount.to_string()),
        Some(row.donation_date.to_string()),
        row.payment_mode.clone(),
        row.remarks.clone(),
    ]
}

/// Time-based receipt identifier printed on the donation receipt.
fn generate_receipt_number() -> String {
    format!("RCPT{}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn receipt_numbers_are_time_based_strings() {
        let receipt = generate_receipt_number();
        assert!(receipt.starts_with("RCPT"));
        assert!(receipt[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn export_rows_match_header_width_and_blank_out_nulls() {
        let row = DonationListRow {
            id: 1,
            receipt_number: "RCPT1".to_string(),
            donation_amount: Decimal::new(50000, 2),
            donation_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            payment_mode: None,
            remarks: None,
            first_name: "Asha".to_string(),
            last_name: "Verma".to_string(),
            program_name: None,
        };
        let cells = export_row(&row);
        assert_eq!(cells.len(), EXPORT_HEADERS.len());
        assert_eq!(cells[3], None);
        assert_eq!(cells[4].as_deref(), Some("500.00"));
    }
}
