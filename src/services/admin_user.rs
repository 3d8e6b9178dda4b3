use sqlx::PgPool;

use crate::auth;
use crate::database::exec;
use crate::database::manager::{is_unique_violation, DatabaseError};
use crate::database::models::admin::{AdminListRow, AdminUser, NewAdminUser, ResetPassword};
use crate::error::ApiError;
use crate::query::QueryFragments;

pub struct AdminUserService {
    pool: PgPool,
}

impl AdminUserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, ApiError> {
        let row = sqlx::query_as::<_, AdminUser>("SELECT * FROM admins WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(row)
    }

    /// Create a CenterAdmin account for one center. Global Admin accounts
    /// are provisioned out of band, never through the API.
    pub async fn create_center_admin(&self, input: NewAdminUser) -> Result<AdminUser, ApiError> {
        if input.username.trim().is_empty() {
            return Err(ApiError::bad_request("Username is required"));
        }
        if input.password.is_empty() {
            return Err(ApiError::bad_request("Password is required"));
        }

        let digest = auth::hash_password(&input.password);
        let row = sqlx::query_as::<_, AdminUser>(
            "INSERT INTO admins (username, password_digest, role, center_id) \
             VALUES ($1, $2, 'CenterAdmin', $3) RETURNING *",
        )
        .bind(input.username.trim())
        .bind(&digest)
        .bind(input.center_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                ApiError::conflict("An admin with this username already exists")
            } else {
                DatabaseError::from(err).into()
            }
        })?;

        Ok(row)
    }

    /// All CenterAdmin accounts with their center, newest first.
    pub async fn list_center_admins(&self) -> Result<Vec<AdminListRow>, ApiError> {
        let mut frags = QueryFragments::new();
        frags.push_eq("a.role", serde_json::Value::from("CenterAdmin"));

        let sql = frags.select_sql(
            "a.id, a.username, c.center_name, c.center_code",
            "admins a LEFT JOIN centers c ON a.center_id = c.id",
            "a.id DESC",
        );
        let rows = exec::fetch_all_as(&self.pool, &sql, frags.params()).await?;
        Ok(rows)
    }

    pub async fn reset_password(&self, input: ResetPassword) -> Result<(), ApiError> {
        if input.new_password.is_empty() {
            return Err(ApiError::bad_request("Password is required"));
        }

        let digest = auth::hash_password(&input.new_password);
        let result = sqlx::query("UPDATE admins SET password_digest = $1 WHERE id = $2")
            .bind(&digest)
            .bind(input.admin_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Admin not found"));
        }
        Ok(())
    }
}
