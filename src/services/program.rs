use serde_json::Value;
use sqlx::PgPool;

use crate::database::exec;
use crate::database::manager::DatabaseError;
use crate::database::models::program::{NewProgram, Program, ProgramOption};
use crate::error::ApiError;
use crate::query::{AccessScope, Page, PagedResponse, QueryFragments};

const TABLE: &str = "programs";
const ORDER: &str = "id DESC";

pub struct ProgramService {
    pool: PgPool,
}

impl ProgramService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        scope: AccessScope,
        page: Page,
    ) -> Result<PagedResponse<Program>, ApiError> {
        let mut frags = QueryFragments::new();
        scope.apply(&mut frags, "center_id");

        let total = exec::count_with(&self.pool, &frags, TABLE).await?;
        let sql = frags.select_page_sql("*", TABLE, ORDER, &page);
        let rows: Vec<Program> = exec::fetch_all_as(&self.pool, &sql, frags.params()).await?;

        Ok(PagedResponse::new(rows, total, &page))
    }

    /// Scope-filtered id/name pairs for entry-form dropdowns.
    pub async fn dropdown(&self, scope: AccessScope) -> Result<Vec<ProgramOption>, ApiError> {
        let mut frags = QueryFragments::new();
        scope.apply(&mut frags, "center_id");

        let sql = frags.select_sql("id, program_name", TABLE, "program_name ASC");
        let rows = exec::fetch_all_as(&self.pool, &sql, frags.params()).await?;
        Ok(rows)
    }

    pub async fn get(&self, scope: AccessScope, id: i32) -> Result<Program, ApiError> {
        let mut frags = QueryFragments::new();
        frags.push_eq("id", Value::from(id));
        scope.apply(&mut frags, "center_id");

        let sql = frags.select_sql("*", TABLE, ORDER);
        let row: Option<Program> =
            exec::fetch_optional_as(&self.pool, &sql, frags.params()).await?;
        row.ok_or_else(|| ApiError::not_found("Program not found"))
    }

    pub async fn create(&self, scope: AccessScope, input: NewProgram) -> Result<Program, ApiError> {
        if input.program_name.trim().is_empty() {
            return Err(ApiError::bad_request("Program name is required"));
        }

        let row = sqlx::query_as::<_, Program>(
            "INSERT INTO programs (program_name, description, program_date, center_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(input.program_name.trim())
        .bind(&input.description)
        .bind(input.program_date)
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
        input: NewProgram,
    ) -> Result<Program, ApiError> {
        if input.program_name.trim().is_empty() {
            return Err(ApiError::bad_request("Program name is required"));
        }

        let row = sqlx::query_as::<_, Program>(
            "UPDATE programs SET program_name = $1, description = $2, program_date = $3 \
             WHERE id = $4 AND ($5::int4 IS NULL OR center_id = $5) RETURNING *",
        )
        .bind(input.program_name.trim())
        .bind(&input.description)
        .bind(input.program_date)
        .bind(id)
        .bind(scope.center_id())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        row.ok_or_else(|| ApiError::not_found("Program not found"))
    }
}
