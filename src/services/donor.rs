use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;

use crate::database::exec;
use crate::database::manager::is_unique_violation;
use crate::database::models::donor::{Donor, DonorMatch, NewDonor, UpdateDonor};
use crate::error::ApiError;
use crate::query::{AccessScope, Page, PagedResponse, QueryFragments};

const TABLE: &str = "donors";
const ORDER: &str = "id DESC";

pub struct DonorService {
    pool: PgPool,
}

impl DonorService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated, scope-filtered donor list with optional free-text search
    /// over mobile, first name and last name. All three matches share one
    /// bound wildcard value.
    pub async fn list(
        &self,
        scope: AccessScope,
        page: Page,
        search: Option<&str>,
    ) -> Result<PagedResponse<Donor>, ApiError> {
        let mut frags = QueryFragments::new();
        scope.apply(&mut frags, "center_id");

        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = frags.bind(Value::from(format!("%{}%", term)));
            frags.push(format!(
                "(mobile ILIKE {p} OR first_name ILIKE {p} OR last_name ILIKE {p})",
                p = pattern
            ));
        }

        let total = exec::count_with(&self.pool, &frags, TABLE).await?;
        let sql = frags.select_page_sql("*", TABLE, ORDER, &page);
        let rows: Vec<Donor> = exec::fetch_all_as(&self.pool, &sql, frags.params()).await?;

        Ok(PagedResponse::new(rows, total, &page))
    }

    /// Scoped detail lookup. The scope predicate is ANDed onto the primary
    /// key so a CenterAdmin cannot read another center's donor by id.
    pub async fn get(&self, scope: AccessScope, id: i32) -> Result<Donor, ApiError> {
        let mut frags = QueryFragments::new();
        frags.push_eq("id", Value::from(id));
        scope.apply(&mut frags, "center_id");

        let sql = frags.select_sql("*", TABLE, ORDER);
        let row: Option<Donor> = exec::fetch_optional_as(&self.pool, &sql, frags.params()).await?;
        row.ok_or_else(|| ApiError::not_found("Donor not found"))
    }

    /// Exact-mobile lookup used by the donation entry form.
    pub async fn search_by_mobile(
        &self,
        scope: AccessScope,
        mobile: &str,
    ) -> Result<Vec<DonorMatch>, ApiError> {
        let mut frags = QueryFragments::new();
        frags.push_eq("mobile", Value::from(mobile));
        scope.apply(&mut frags, "center_id");

        let sql = frags.select_sql("id, first_name, last_name, email, mobile", TABLE, ORDER);
        let rows = exec::fetch_all_as(&self.pool, &sql, frags.params()).await?;
        Ok(rows)
    }

    pub async fn create(&self, scope: AccessScope, input: NewDonor) -> Result<Donor, ApiError> {
        validate_donor_fields(&input.first_name, &input.last_name, &input.mobile, input.email.as_deref())?;

        let donor_id = generate_donor_id();
        let row = sqlx::query_as::<_, Donor>(
            "INSERT INTO donors \
             (donor_id, first_name, last_name, email, mobile, city, state, center_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&donor_id)
        .bind(input.first_name.trim())
        .bind(input.last_name.trim())
        .bind(&input.email)
        .bind(&input.mobile)
        .bind(&input.city)
        .bind(&input.state)
        .bind(scope.center_id())
        .fetch_one(&self.pool)
        .await
        .map_err(map_donor_write_error)?;

        Ok(row)
    }

    /// Update the business-editable fields. The center reference and the
    /// generated donor_id are never touched.
    pub async fn update(
        &self,
        scope: AccessScope,
        id: i32,
        input: UpdateDonor,
    ) -> Result<Donor, ApiError> {
        validate_donor_fields(&input.first_name, &input.last_name, &input.mobile, input.email.as_deref())?;

        let row = sqlx::query_as::<_, Donor>(
            "UPDATE donors SET \
             first_name = $1, last_name = $2, email = $3, mobile = $4, city = $5, state = $6 \
             WHERE id = $7 AND ($8::int4 IS NULL OR center_id = $8) RETURNING *",
        )
        .bind(input.first_name.trim())
        .bind(input.last_name.trim())
        .bind(&input.email)
        .bind(&input.mobile)
        .bind(&input.city)
        .bind(&input.state)
        .bind(id)
        .bind(scope.center_id())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_donor_write_error)?;

        row.ok_or_else(|| ApiError::not_found("Donor not found"))
    }
}

/// Time-based human-facing donor identifier.
fn generate_donor_id() -> String {
    format!("DNR{}", Utc::now().timestamp_millis())
}

fn map_donor_write_error(err: sqlx::Error) -> ApiError {
    if is_unique_violation(&err) {
        ApiError::conflict("A donor with this mobile number already exists for this center")
    } else {
        crate::database::manager::DatabaseError::from(err).into()
    }
}

fn validate_donor_fields(
    first_name: &str,
    last_name: &str,
    mobile: &str,
    email: Option<&str>,
) -> Result<(), ApiError> {
    if first_name.trim().is_empty() {
        return Err(ApiError::bad_request("First name is required"));
    }
    if last_name.trim().is_empty() {
        return Err(ApiError::bad_request("Last name is required"));
    }
    if !is_valid_mobile(mobile) {
        return Err(ApiError::bad_request("Mobile number must be exactly 10 digits"));
    }
    if let Some(email) = email.map(str::trim).filter(|s| !s.is_empty()) {
        if !is_valid_email(email) {
            return Err(ApiError::bad_request("Invalid email address"));
        }
    }
    Ok(())
}

fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == 10 && mobile.chars().all(|c| c.is_ascii_digit())
}

/// Accepts the standard `local@domain.tld` shape: one '@', a non-empty
/// local part, and a domain with a dot-separated TLD.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_must_be_exactly_ten_digits() {
        assert!(is_valid_mobile("9876543210"));
        assert!(!is_valid_mobile("987654321"));
        assert!(!is_valid_mobile("98765432100"));
        assert!(!is_valid_mobile("98765a3210"));
        assert!(!is_valid_mobile("+919876543"));
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("donor@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(!is_valid_email("donor"));
        assert!(!is_valid_email("donor@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("donor@.com"));
        assert!(!is_valid_email("do nor@example.com"));
    }

    #[test]
    fn validation_requires_name_parts_and_mobile() {
        assert!(validate_donor_fields("Asha", "Verma", "9876543210", None).is_ok());
        assert!(validate_donor_fields("  ", "Verma", "9876543210", None).is_err());
        assert!(validate_donor_fields("Asha", "", "9876543210", None).is_err());
        assert!(validate_donor_fields("Asha", "Verma", "12345", None).is_err());
        assert!(validate_donor_fields("Asha", "Verma", "9876543210", Some("bad")).is_err());
        // Blank email is treated as absent
        assert!(validate_donor_fields("Asha", "Verma", "9876543210", Some(" ")).is_ok());
    }

    #[test]
    fn donor_ids_are_time_based_strings() {
        let id = generate_donor_id();
        assert!(id.starts_with("DNR"));
        assert!(id[3..].chars().all(|c| c.is_ascii_digit()));
    }
}
