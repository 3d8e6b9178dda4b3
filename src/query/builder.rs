use serde::Serialize;
use serde_json::Value;

use super::error::QueryError;

/// Fixed page size shared by every list endpoint.
pub const PAGE_SIZE: i64 = 5;

/// Ordered list of WHERE-clause fragments and their bound values.
///
/// Placeholders are assigned positionally in the order values are bound, so
/// the generated SQL can be executed with the parameter list as-is. A single
/// bound value may be referenced from more than one clause (donor free-text
/// search reuses one wildcarded value across three columns).
#[derive(Debug, Default)]
pub struct QueryFragments {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl QueryFragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value and return its positional placeholder (`$1`, `$2`, ...).
    pub fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    /// Append a predicate clause. Clauses are joined with AND.
    pub fn push(&mut self, clause: impl Into<String>) {
        self.clauses.push(clause.into());
    }

    /// Convenience for the common `column = value` predicate.
    pub fn push_eq(&mut self, column: &str, value: Value) {
        let placeholder = self.bind(value);
        self.push(format!("{} = {}", column, placeholder));
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Render the WHERE clause, or an empty string when unfiltered.
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// COUNT query over the same predicate set, without LIMIT/OFFSET.
    pub fn count_sql(&self, from: &str) -> String {
        format!("SELECT COUNT(*) AS count FROM {}{}", from, self.where_sql())
    }

    /// Full SELECT over the predicate set, without pagination.
    pub fn select_sql(&self, select: &str, from: &str, order_by: &str) -> String {
        format!(
            "SELECT {} FROM {}{} ORDER BY {}",
            select,
            from,
            self.where_sql(),
            order_by
        )
    }

    /// Paginated SELECT. LIMIT and OFFSET are bound last, after every
    /// predicate value, so run the COUNT query before calling this.
    pub fn select_page_sql(
        &mut self,
        select: &str,
        from: &str,
        order_by: &str,
        page: &Page,
    ) -> String {
        let base = self.select_sql(select, from, order_by);
        let limit = self.bind(Value::from(PAGE_SIZE));
        let offset = self.bind(Value::from(page.offset()));
        format!("{} LIMIT {} OFFSET {}", base, limit, offset)
    }
}

/// 1-indexed page selector.
#[derive(Debug, Clone, Copy)]
pub struct Page(i64);

impl Page {
    pub fn new(page: Option<i64>) -> Result<Self, QueryError> {
        match page {
            None => Ok(Self(1)),
            Some(p) if p >= 1 => Ok(Self(p)),
            Some(p) => Err(QueryError::InvalidPage(p.to_string())),
        }
    }

    pub fn number(&self) -> i64 {
        self.0
    }

    pub fn offset(&self) -> i64 {
        (self.0 - 1) * PAGE_SIZE
    }
}

pub fn total_pages(total: i64) -> i64 {
    (total + PAGE_SIZE - 1) / PAGE_SIZE
}

/// Standard list response envelope: `{ data, total, page, totalPages }`.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl<T: Serialize> PagedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: &Page) -> Self {
        Self {
            data,
            total,
            page: page.number(),
            total_pages: total_pages(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn placeholders_are_sequential_in_append_order() {
        let mut frags = QueryFragments::new();
        frags.push_eq("center_id", json!(3));
        let p = frags.bind(json!("2024-04-01"));
        frags.push(format!("donation_date >= {}::date", p));

        assert_eq!(
            frags.where_sql(),
            " WHERE center_id = $1 AND donation_date >= $2::date"
        );
        assert_eq!(frags.params(), &[json!(3), json!("2024-04-01")]);
    }

    #[test]
    fn empty_fragments_render_no_where_clause() {
        let frags = QueryFragments::new();
        assert_eq!(frags.where_sql(), "");
        assert_eq!(frags.count_sql("donors"), "SELECT COUNT(*) AS count FROM donors");
    }

    #[test]
    fn one_value_reused_across_clauses_binds_once() {
        let mut frags = QueryFragments::new();
        let p = frags.bind(json!("%98%"));
        frags.push(format!(
            "(mobile ILIKE {p} OR first_name ILIKE {p} OR last_name ILIKE {p})",
            p = p
        ));
        assert_eq!(frags.params().len(), 1);
        assert_eq!(
            frags.where_sql(),
            " WHERE (mobile ILIKE $1 OR first_name ILIKE $1 OR last_name ILIKE $1)"
        );
    }

    #[test]
    fn count_uses_same_predicates_as_page() {
        let mut frags = QueryFragments::new();
        frags.push_eq("center_id", json!(7));
        let count = frags.count_sql("expenses e");
        let page = Page::new(Some(2)).unwrap();
        let data = frags.select_page_sql("e.*", "expenses e", "e.expense_date DESC, e.id DESC", &page);

        assert_eq!(count, "SELECT COUNT(*) AS count FROM expenses e WHERE center_id = $1");
        assert_eq!(
            data,
            "SELECT e.* FROM expenses e WHERE center_id = $1 \
             ORDER BY e.expense_date DESC, e.id DESC LIMIT $2 OFFSET $3"
        );
        assert_eq!(frags.params(), &[json!(7), json!(5), json!(5)]);
    }

    #[test]
    fn pages_are_one_indexed_with_fixed_size() {
        assert_eq!(Page::new(None).unwrap().number(), 1);
        assert_eq!(Page::new(Some(1)).unwrap().offset(), 0);
        assert_eq!(Page::new(Some(4)).unwrap().offset(), 15);
        assert!(Page::new(Some(0)).is_err());
        assert!(Page::new(Some(-2)).is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(5), 1);
        assert_eq!(total_pages(6), 2);
        assert_eq!(total_pages(11), 3);
    }
}
