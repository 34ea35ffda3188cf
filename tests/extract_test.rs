use billwatch::bill::{BillField, extract, format_prompt_payment_date};
use serde_json::{Value, json};

fn fixture_document() -> Value {
    json!({
        "billMonth": "JAN-2024",
        "billAmount": 1480.0,
        "consumptionUnits": 213,
        "billDate": "08-JAN-2024",
        "dueDate": "28-JAN-2024",
        "promptPaymentDate": "Date(1700000000000)"
    })
}

#[test]
fn plain_fields_are_passed_through_unchanged() {
    let doc = fixture_document();
    assert_eq!(extract(&doc, BillField::BillMonth), Some(json!("JAN-2024")));
    assert_eq!(extract(&doc, BillField::BillAmount), Some(json!(1480.0)));
    assert_eq!(extract(&doc, BillField::ConsumptionUnits), Some(json!(213)));
    assert_eq!(extract(&doc, BillField::BillDate), Some(json!("08-JAN-2024")));
    assert_eq!(extract(&doc, BillField::DueDate), Some(json!("28-JAN-2024")));
}

#[test]
fn prompt_payment_date_matches_local_calendar_date() {
    use chrono::TimeZone;

    let doc = fixture_document();
    let expected = chrono::Local
        .timestamp_millis_opt(1_700_000_000_000)
        .single()
        .map(|dt| dt.format("%d-%b-%Y").to_string())
        .map(Value::String);
    let extracted = extract(&doc, BillField::PromptPaymentDate);
    assert_eq!(extracted, expected);

    // Shape check independent of the host timezone: DD-Mon-YYYY
    let text = extracted.and_then(|v| v.as_str().map(str::to_string)).unwrap();
    let parts: Vec<&str> = text.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0].len(), 2);
    assert_eq!(parts[1].len(), 3);
    assert_eq!(parts[2].len(), 4);
}

#[test]
fn missing_key_yields_none_without_panicking() {
    let doc = json!({});
    for field in BillField::ALL {
        assert_eq!(extract(&doc, field), None);
    }
}

#[test]
fn error_sentinel_yields_none_for_every_field() {
    let doc = json!("error");
    for field in BillField::ALL {
        assert_eq!(extract(&doc, field), None);
    }
}

#[test]
fn embedded_timestamp_with_trailing_text_is_accepted() {
    assert!(format_prompt_payment_date("foo(1700000000000)bar").is_some());
    assert!(format_prompt_payment_date("(0)").is_some());
}

#[test]
fn malformed_prompt_payment_shapes_yield_none() {
    assert_eq!(format_prompt_payment_date("05-Jan-2024"), None);
    assert_eq!(format_prompt_payment_date("open(123"), None);
    assert_eq!(format_prompt_payment_date("()"), None);
    assert_eq!(format_prompt_payment_date("(12x3)"), None);
}
