use anyhow::Result;
use chrono::NaiveDate;
use donorbook_api::database::models::receipt::ReceiptRecord;
use donorbook_api::export::csv::Cell;
use donorbook_api::export::{render_csv, render_receipt_pdf};
use rust_decimal::Decimal;

fn cell(s: &str) -> Cell {
    Some(s.to_string())
}

#[test]
fn donation_export_is_quote_always_with_header_row() -> Result<()> {
    let headers = [
        "Receipt Number",
        "First Name",
        "Last Name",
        "Program",
        "Amount",
        "Donation Date",
        "Payment Mode",
        "Remarks",
    ];
    let rows = vec![
        vec![
            cell("RCPT1700000000001"),
            cell("Asha"),
            cell("Verma"),
            cell("Annual Drive"),
            cell("2500.00"),
            cell("2024-07-15"),
            cell("UPI"),
            None,
        ],
        vec![
            cell("RCPT1700000000002"),
            cell("Ravi"),
            cell("Iyer"),
            None,
            cell("500.00"),
            cell("2024-08-01"),
            None,
            cell("in memory of \"Appa\""),
        ],
    ];

    let csv = render_csv(&headers, &rows)?;
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "\"Receipt Number\",\"First Name\",\"Last Name\",\"Program\",\"Amount\",\
         \"Donation Date\",\"Payment Mode\",\"Remarks\""
    );
    // Missing program and remarks render as empty quoted cells, never shift
    // columns.
    assert!(lines[1].ends_with("\"UPI\",\"\""));
    assert!(lines[2].contains("\"Ravi\",\"Iyer\",\"\",\"500.00\""));
    assert!(lines[2].ends_with("\"in memory of \"\"Appa\"\"\""));
    Ok(())
}

#[test]
fn export_of_empty_scope_is_header_only() -> Result<()> {
    // A CenterAdmin with no rows still gets a well-formed file.
    let csv = render_csv(&["Receipt Number", "Amount"], &[])?;
    assert_eq!(csv.lines().count(), 1);
    Ok(())
}

fn sample_receipt() -> ReceiptRecord {
    ReceiptRecord {
        receipt_number: "RCPT1700000000001".to_string(),
        donation_amount: Decimal::new(250000, 2),
        donation_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        payment_mode: Some("UPI".to_string()),
        first_name: "Asha".to_string(),
        last_name: "Verma".to_string(),
        email: Some("asha@example.com".to_string()),
        city: Some("Pune".to_string()),
        state: Some("Maharashtra".to_string()),
        center_legal_name: Some("Hope Foundation Trust".to_string()),
        center_address: Some("12 MG Road, Pune".to_string()),
        center_phone: Some("020-5551234".to_string()),
        website: Some("hope.example.org".to_string()),
    }
}

#[test]
fn receipt_pdf_is_a_valid_single_page_document() -> Result<()> {
    let bytes = render_receipt_pdf(&sample_receipt())?;
    assert!(bytes.starts_with(b"%PDF-1.5"));

    let doc = lopdf::Document::load_mem(&bytes)?;
    assert_eq!(doc.get_pages().len(), 1);
    Ok(())
}

#[test]
fn receipt_pdf_tolerates_sparse_center_profiles() -> Result<()> {
    let mut record = sample_receipt();
    record.email = None;
    record.payment_mode = None;
    record.center_legal_name = None;
    record.center_address = None;
    record.center_phone = None;
    record.website = None;

    let bytes = render_receipt_pdf(&record)?;
    assert!(bytes.starts_with(b"%PDF"));
    Ok(())
}
