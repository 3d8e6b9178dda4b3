use anyhow::Result;
use donorbook_api::error::ApiError;
use donorbook_api::query::{
    apply_fiscal_year, AccessScope, Page, PagedResponse, QueryFragments, Role, PAGE_SIZE,
};
use serde_json::json;

// The list endpoints all compose the same pipeline: role scope, then the
// optional fiscal-year window, then free-text search, then pagination. These
// tests pin the generated SQL and parameter vectors for the combinations the
// handlers actually produce.

#[test]
fn center_admin_donation_list_composes_scope_year_and_page() -> Result<()> {
    let scope = AccessScope::resolve(Role::CenterAdmin, Some(3));

    let mut frags = QueryFragments::new();
    scope.apply(&mut frags, "d.center_id");
    apply_fiscal_year(&mut frags, "d.donation_date", Some("2024-2025"))
        .map_err(ApiError::from)?;

    let count = frags.count_sql("donations d");
    let page = Page::new(Some(2)).map_err(ApiError::from)?;
    let data = frags.select_page_sql("d.*", "donations d", "d.donation_date DESC, d.id DESC", &page);

    assert_eq!(
        count,
        "SELECT COUNT(*) AS count FROM donations d \
         WHERE d.center_id = $1 AND d.donation_date >= $2::date AND d.donation_date <= $3::date"
    );
    assert_eq!(
        data,
        "SELECT d.* FROM donations d \
         WHERE d.center_id = $1 AND d.donation_date >= $2::date AND d.donation_date <= $3::date \
         ORDER BY d.donation_date DESC, d.id DESC LIMIT $4 OFFSET $5"
    );
    assert_eq!(
        frags.params(),
        &[json!(3), json!("2024-04-01"), json!("2025-03-31"), json!(PAGE_SIZE), json!(PAGE_SIZE)]
    );
    Ok(())
}

#[test]
fn admin_sees_everything_unfiltered() -> Result<()> {
    let scope = AccessScope::resolve(Role::Admin, None);

    let mut frags = QueryFragments::new();
    scope.apply(&mut frags, "center_id");
    apply_fiscal_year(&mut frags, "donation_date", Some("All")).map_err(ApiError::from)?;

    assert_eq!(frags.count_sql("donations"), "SELECT COUNT(*) AS count FROM donations");
    assert!(frags.params().is_empty());
    Ok(())
}

#[test]
fn donor_search_reuses_one_wildcard_across_columns() -> Result<()> {
    let scope = AccessScope::resolve(Role::CenterAdmin, Some(7));

    let mut frags = QueryFragments::new();
    scope.apply(&mut frags, "center_id");
    let p = frags.bind(json!("%98%"));
    frags.push(format!(
        "(mobile ILIKE {p} OR first_name ILIKE {p} OR last_name ILIKE {p})",
        p = p
    ));

    assert_eq!(
        frags.where_sql(),
        " WHERE center_id = $1 AND (mobile ILIKE $2 OR first_name ILIKE $2 OR last_name ILIKE $2)"
    );
    assert_eq!(frags.params(), &[json!(7), json!("%98%")]);
    Ok(())
}

#[test]
fn export_and_list_share_predicates_only_pagination_differs() -> Result<()> {
    let scope = AccessScope::resolve(Role::CenterAdmin, Some(2));
    let build = || -> Result<QueryFragments, ApiError> {
        let mut frags = QueryFragments::new();
        scope.apply(&mut frags, "e.center_id");
        apply_fiscal_year(&mut frags, "e.expense_date", Some("2023-2024"))?;
        Ok(frags)
    };

    let export = build()?;
    let mut list = build()?;
    let page = Page::new(None).map_err(ApiError::from)?;

    let export_sql = export.select_sql("e.*", "expenses e", "e.expense_date DESC");
    let list_sql = list.select_page_sql("e.*", "expenses e", "e.expense_date DESC", &page);

    assert!(list_sql.starts_with(&export_sql));
    assert!(list_sql.ends_with("LIMIT $4 OFFSET $5"));
    assert_eq!(export.params(), &list.params()[..export.params().len()]);
    Ok(())
}

#[test]
fn malformed_year_parameter_maps_to_bad_request() {
    let mut frags = QueryFragments::new();
    let err = apply_fiscal_year(&mut frags, "donation_date", Some("twenty-24")).unwrap_err();
    let api: ApiError = err.into();
    assert_eq!(api.status_code(), 400);
    assert_eq!(api.error_code(), "BAD_REQUEST");
}

#[test]
fn invalid_page_parameter_maps_to_bad_request() {
    let err = Page::new(Some(0)).unwrap_err();
    let api: ApiError = err.into();
    assert_eq!(api.status_code(), 400);
}

#[test]
fn paged_envelope_serializes_camel_case_total_pages() -> Result<()> {
    let page = Page::new(Some(3)).map_err(ApiError::from)?;
    let body = PagedResponse::new(vec!["a", "b"], 12, &page);
    let value = serde_json::to_value(&body)?;

    assert_eq!(value["data"], json!(["a", "b"]));
    assert_eq!(value["total"], json!(12));
    assert_eq!(value["page"], json!(3));
    assert_eq!(value["totalPages"], json!(3));
    assert!(value.get("total_pages").is_none());
    Ok(())
}
