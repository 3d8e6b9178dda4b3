//! Glue between `QueryFragments` and sqlx: positional parameter values are
//! carried as `serde_json::Value` and dispatched onto the right `bind` call
//! here, so the fragment assembly itself stays storage-agnostic and
//! unit-testable.

use serde_json::Value;
use sqlx::{postgres::PgArguments, FromRow, PgPool, Row};

use crate::database::manager::DatabaseError;
use crate::query::QueryFragments;

pub fn bind_value<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                q.bind(u as i64)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        Value::Array(_) | Value::Object(_) => q.bind(v.clone()),
    }
}

pub fn bind_value_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                q.bind(u as i64)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        Value::Array(_) | Value::Object(_) => q.bind(v.clone()),
    }
}

/// Run a COUNT query built by `QueryFragments::count_sql`.
pub async fn fetch_count(
    pool: &PgPool,
    sql: &str,
    params: &[Value],
) -> Result<i64, DatabaseError> {
    let mut q = sqlx::query(sql);
    for p in params {
        q = bind_value(q, p);
    }
    let row = q.fetch_one(pool).await?;
    let count: i64 = row.try_get("count")?;
    Ok(count)
}

/// Fetch every row of a fragment-built SELECT into `T`.
pub async fn fetch_all_as<T>(
    pool: &PgPool,
    sql: &str,
    params: &[Value],
) -> Result<Vec<T>, DatabaseError>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    let mut q = sqlx::query_as::<_, T>(sql);
    for p in params {
        q = bind_value_as(q, p);
    }
    let rows = q.fetch_all(pool).await?;
    Ok(rows)
}

/// Fetch at most one row of a fragment-built SELECT into `T`.
pub async fn fetch_optional_as<T>(
    pool: &PgPool,
    sql: &str,
    params: &[Value],
) -> Result<Option<T>, DatabaseError>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    let mut q = sqlx::query_as::<_, T>(sql);
    for p in params {
        q = bind_value_as(q, p);
    }
    let row = q.fetch_optional(pool).await?;
    Ok(row)
}

/// Run a COUNT for `frags` over `from` using the fragment's own parameters.
pub async fn count_with(
    pool: &PgPool,
    frags: &QueryFragments,
    from: &str,
) -> Result<i64, DatabaseError> {
    let sql = frags.count_sql(from);
    fetch_count(pool, &sql, frags.params()).await
}
