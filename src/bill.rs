//! Bill document fields and value extraction
//!
//! The portal returns one JSON document per fetch cycle. This module names the
//! six recognized fields, carries their static display metadata, and extracts
//! individual values from a document, including the one special-case
//! transformation (embedded epoch timestamp to a calendar date) applied to the
//! prompt payment date.

use serde_json::Value;
use tracing::debug;

/// Sentinel body the portal returns in place of a document when the lookup
/// fails server-side. Treated the same as an absent document.
pub const ERROR_SENTINEL: &str = "error";

/// The six bill figures recognized by the portal response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillField {
    BillMonth,
    BillAmount,
    ConsumptionUnits,
    BillDate,
    DueDate,
    PromptPaymentDate,
}

impl BillField {
    /// All recognized fields, in portal order
    pub const ALL: [BillField; 6] = [
        BillField::BillMonth,
        BillField::BillAmount,
        BillField::ConsumptionUnits,
        BillField::BillDate,
        BillField::DueDate,
        BillField::PromptPaymentDate,
    ];

    /// Key under which the field appears in the portal document
    pub fn key(self) -> &'static str {
        match self {
            BillField::BillMonth => "billMonth",
            BillField::BillAmount => "billAmount",
            BillField::ConsumptionUnits => "consumptionUnits",
            BillField::BillDate => "billDate",
            BillField::DueDate => "dueDate",
            BillField::PromptPaymentDate => "promptPaymentDate",
        }
    }

    /// Parse a configured field name; `None` for anything outside the six keys
    pub fn from_key(key: &str) -> Option<Self> {
        BillField::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Human-readable display label
    pub fn label(self) -> &'static str {
        match self {
            BillField::BillMonth => "Bill Month",
            BillField::BillAmount => "Bill Amount",
            BillField::ConsumptionUnits => "Consumption Units",
            BillField::BillDate => "Bill Date",
            BillField::DueDate => "Due Date",
            BillField::PromptPaymentDate => "Prompt payment date",
        }
    }

    /// Icon identifier for the host display
    pub fn icon(self) -> &'static str {
        match self {
            BillField::BillAmount => "mdi:cash-100",
            BillField::ConsumptionUnits => "mdi:weather-sunny",
            _ => "mdi:calendar",
        }
    }

    /// Unit of measurement, where one applies
    pub fn unit(self) -> Option<&'static str> {
        match self {
            BillField::ConsumptionUnits => Some("kWh"),
            BillField::BillAmount => Some("₹"),
            _ => None,
        }
    }
}

/// Extract one field value from a bill document.
///
/// A document equal to the `"error"` sentinel is treated as absent. Missing
/// keys yield `None` so callers can keep their previous value. The prompt
/// payment date arrives as free text with an embedded parenthesized epoch
/// millisecond value and is reformatted to a calendar date; a malformed shape
/// also yields `None`.
pub fn extract(document: &Value, field: BillField) -> Option<Value> {
    if document.as_str() == Some(ERROR_SENTINEL) {
        return None;
    }
    let raw = document.get(field.key())?;
    if field == BillField::PromptPaymentDate {
        let text = raw.as_str()?;
        return match format_prompt_payment_date(text) {
            Some(date) => Some(Value::String(date)),
            None => {
                debug!("promptPaymentDate has no parenthesized timestamp: {text:?}");
                None
            }
        };
    }
    Some(raw.clone())
}

/// Pull the millisecond epoch out of `text "(" digits ")" text` and format it
/// as `DD-Mon-YYYY` in local time.
pub fn format_prompt_payment_date(raw: &str) -> Option<String> {
    use chrono::TimeZone;

    let open = raw.find('(')?;
    let rest = &raw[open + 1..];
    let close = rest.find(')')?;
    let millis: i64 = rest[..close].trim().parse().ok()?;
    let local = chrono::Local.timestamp_millis_opt(millis).single()?;
    Some(local.format("%d-%b-%Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_keys_round_trip() {
        for field in BillField::ALL {
            assert_eq!(BillField::from_key(field.key()), Some(field));
        }
        assert_eq!(BillField::from_key("notAField"), None);
    }

    #[test]
    fn units_only_for_amount_and_consumption() {
        assert_eq!(BillField::ConsumptionUnits.unit(), Some("kWh"));
        assert_eq!(BillField::BillAmount.unit(), Some("₹"));
        assert_eq!(BillField::DueDate.unit(), None);
        assert_eq!(BillField::BillMonth.unit(), None);
    }

    #[test]
    fn extract_plain_fields() {
        let doc = json!({"billMonth": "JAN-2024", "billAmount": 1234.5});
        assert_eq!(
            extract(&doc, BillField::BillMonth),
            Some(json!("JAN-2024"))
        );
        assert_eq!(extract(&doc, BillField::BillAmount), Some(json!(1234.5)));
    }

    #[test]
    fn extract_missing_key_is_none() {
        let doc = json!({});
        assert_eq!(extract(&doc, BillField::BillMonth), None);
    }

    #[test]
    fn extract_error_sentinel_is_none() {
        let doc = json!("error");
        assert_eq!(extract(&doc, BillField::BillMonth), None);
    }

    #[test]
    fn prompt_payment_date_is_reformatted() {
        let doc = json!({"promptPaymentDate": "foo(1700000000000)bar"});
        let expected = {
            use chrono::TimeZone;
            chrono::Local
                .timestamp_millis_opt(1_700_000_000_000)
                .single()
                .map(|dt| dt.format("%d-%b-%Y").to_string())
        };
        assert_eq!(
            extract(&doc, BillField::PromptPaymentDate),
            expected.map(Value::String)
        );
    }

    #[test]
    fn prompt_payment_date_malformed_is_none() {
        for raw in ["no parens at all", "unclosed (123", "(notdigits)", ""] {
            let doc = json!({ "promptPaymentDate": raw });
            assert_eq!(extract(&doc, BillField::PromptPaymentDate), None);
        }
    }
}
