use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::ExportError;
use crate::database::models::receipt::ReceiptRecord;

// A4 in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: f32 = 50.0;

/// Render a single-page donation receipt for an already-validated
/// (receipt number, donor mobile) lookup.
pub fn render_receipt_pdf(record: &ReceiptRecord) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => regular, "F2" => bold },
    });

    let content = Content {
        operations: receipt_operations(record),
    };
    let encoded = content
        .encode()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(buffer)
}

fn receipt_operations(record: &ReceiptRecord) -> Vec<Operation> {
    let mut ops = Vec::new();

    text(&mut ops, "F2", 18.0, 230.0, 780.0, "Donation Receipt");

    let mut y = 730.0;
    let right_col = PAGE_WIDTH as f32 / 2.0 + 40.0;

    text(
        &mut ops,
        "F1",
        12.0,
        MARGIN,
        y,
        &format!("Receipt No: {}", record.receipt_number),
    );
    text(
        &mut ops,
        "F1",
        12.0,
        right_col,
        y,
        &format!("Donation Date: {}", record.donation_date.format("%d/%m/%Y")),
    );

    y -= 24.0;
    text(
        &mut ops,
        "F1",
        12.0,
        MARGIN,
        y,
        &format!("Donor Name: {} {}", record.first_name, record.last_name),
    );
    text(
        &mut ops,
        "F1",
        12.0,
        right_col,
        y,
        &format!("Donation Amount: Rs. {}", record.donation_amount),
    );

    y -= 24.0;
    text(
        &mut ops,
        "F1",
        12.0,
        MARGIN,
        y,
        &format!("Donor Email: {}", record.email.as_deref().unwrap_or("-")),
    );

    y -= 18.0;
    let address = format!(
        "Donor Address: {} {}",
        record.city.as_deref().unwrap_or(""),
        record.state.as_deref().unwrap_or("")
    );
    text(&mut ops, "F1", 12.0, MARGIN, y, address.trim_end());

    if let Some(mode) = record.payment_mode.as_deref() {
        y -= 18.0;
        text(&mut ops, "F1", 12.0, MARGIN, y, &format!("Payment Mode: {}", mode));
    }

    // Footer: issuing center identity and disclaimer
    let mut footer_y = 160.0;
    text(
        &mut ops,
        "F1",
        10.0,
        MARGIN,
        footer_y,
        "--------------------------------------------------",
    );
    for line in [
        record.center_legal_name.as_deref().unwrap_or(""),
        record.center_address.as_deref().unwrap_or(""),
    ] {
        footer_y -= 14.0;
        text(&mut ops, "F1", 10.0, MARGIN, footer_y, line);
    }
    footer_y -= 14.0;
    text(
        &mut ops,
        "F1",
        10.0,
        MARGIN,
        footer_y,
        &format!("Phone: {}", record.center_phone.as_deref().unwrap_or("-")),
    );
    footer_y -= 14.0;
    text(
        &mut ops,
        "F1",
        10.0,
        MARGIN,
        footer_y,
        &format!("Website: {}", record.website.as_deref().unwrap_or("-")),
    );
    footer_y -= 24.0;
    text(
        &mut ops,
        "F1",
        10.0,
        MARGIN,
        footer_y,
        "This is a computer generated receipt.",
    );

    ops
}

fn text(ops: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, s: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(s)]));
    ops.push(Operation::new("ET", vec![]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn sample_record() -> ReceiptRecord {
        ReceiptRecord {
            receipt_number: "RCPT-1700000000000".to_string(),
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
    fn renders_a_parseable_single_page_document() {
        let bytes = render_receipt_pdf(&sample_record()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn handles_missing_optional_fields() {
        let mut record = sample_record();
        record.email = None;
        record.city = None;
        record.state = None;
        record.payment_mode = None;
        record.center_legal_name = None;
        record.website = None;

        let bytes = render_receipt_pdf(&record).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
