//! Defensive field extraction from upstream-parsed documents
//!
//! Documents arrive as arbitrary nested JSON produced by the extraction
//! pipeline. Each extractor tries a fixed list of known field paths in
//! priority order and returns `None` when nothing usable is present;
//! absence is a scoring condition, not an error.

use bigdecimal::BigDecimal;
use serde_json::Value;
use std::str::FromStr;

use crate::utils::lookup::{first_of, lookup_path};

/// Field paths searched for the vendor name, in priority order
const VENDOR_NAME_PATHS: &[&[&str]] = &[
    &["documentMetadata", "source", "name"],
    &["partyInformation", "vendor", "name"],
    &["companyName"],
];

/// Field paths searched for the total amount, in priority order
const AMOUNT_PATHS: &[&[&str]] = &[&["financialData", "totalAmount"], &["totalAmount"]];

/// Field paths searched for the document date, in priority order
const DATE_PATHS: &[&[&str]] = &[
    &["documentMetadata", "documentDate"],
    &["documentDate"],
];

/// Extract the vendor name from a document. The first path holding a
/// non-empty string wins.
pub fn extract_vendor_name(document: &Value) -> Option<String> {
    VENDOR_NAME_PATHS.iter().find_map(|path| {
        lookup_path(document, path)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
    })
}

/// Extract the total amount from a document.
///
/// Accepts numbers and strings; string values are cleaned of `$` and `,`
/// before parsing. Returns `None` when no path holds a parsable amount.
pub fn extract_amount(document: &Value) -> Option<BigDecimal> {
    first_of(document, AMOUNT_PATHS).and_then(parse_amount_value)
}

/// Extract the document date (expected as YYYY-MM-DD). The first path
/// holding a non-empty string wins; validity is checked later, at scoring
/// time.
pub fn extract_date(document: &Value) -> Option<String> {
    DATE_PATHS.iter().find_map(|path| {
        lookup_path(document, path)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|date| !date.is_empty())
            .map(str::to_owned)
    })
}

/// Identity used to deduplicate claimed documents within one reconcile
/// call. Falls back to the document's position in the input slice when no
/// `document_id` field is present.
pub(crate) fn document_key(document: &Value, index: usize) -> String {
    match document.get("document_id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => format!("#{index}"),
    }
}

fn parse_amount_value(value: &Value) -> Option<BigDecimal> {
    match value {
        // serde_json renders numbers with their shortest round-trip decimal
        // form, so going through the string keeps 100.01 exactly 100.01.
        Value::Number(number) => BigDecimal::from_str(&number.to_string()).ok(),
        Value::String(text) => {
            let cleaned: String = text
                .chars()
                .filter(|c| *c != ',' && *c != '$')
                .collect();
            BigDecimal::from_str(cleaned.trim()).ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vendor_name_prefers_document_metadata() {
        let document = json!({
            "documentMetadata": { "source": { "name": "Acme Corp" } },
            "partyInformation": { "vendor": { "name": "Other Vendor" } },
            "companyName": "Flat Name"
        });
        assert_eq!(extract_vendor_name(&document), Some("Acme Corp".to_string()));
    }

    #[test]
    fn vendor_name_falls_through_empty_values() {
        let document = json!({
            "documentMetadata": { "source": { "name": "" } },
            "partyInformation": { "vendor": { "name": "Office Depot" } }
        });
        assert_eq!(
            extract_vendor_name(&document),
            Some("Office Depot".to_string())
        );
    }

    #[test]
    fn vendor_name_flat_fallback() {
        let document = json!({ "companyName": "Staples" });
        assert_eq!(extract_vendor_name(&document), Some("Staples".to_string()));
        assert_eq!(extract_vendor_name(&json!({})), None);
    }

    #[test]
    fn amount_from_nested_number() {
        let document = json!({ "financialData": { "totalAmount": 1250.50 } });
        assert_eq!(
            extract_amount(&document),
            Some(BigDecimal::from_str("1250.50").unwrap())
        );
    }

    #[test]
    fn amount_from_cleaned_string() {
        let document = json!({ "totalAmount": "$1,250.50" });
        assert_eq!(
            extract_amount(&document),
            Some(BigDecimal::from_str("1250.50").unwrap())
        );
    }

    #[test]
    fn amount_unparsable_string_is_none() {
        let document = json!({ "totalAmount": "n/a" });
        assert_eq!(extract_amount(&document), None);
        assert_eq!(extract_amount(&json!({})), None);
    }

    #[test]
    fn amount_keeps_exact_decimal() {
        let document = json!({ "financialData": { "totalAmount": 100.01 } });
        assert_eq!(
            extract_amount(&document),
            Some(BigDecimal::from_str("100.01").unwrap())
        );
    }

    #[test]
    fn date_paths_in_priority_order() {
        let document = json!({
            "documentMetadata": { "documentDate": "2024-01-15" },
            "documentDate": "2024-02-20"
        });
        assert_eq!(extract_date(&document), Some("2024-01-15".to_string()));

        let flat = json!({ "documentDate": "2024-02-20" });
        assert_eq!(extract_date(&flat), Some("2024-02-20".to_string()));
        assert_eq!(extract_date(&json!({})), None);
    }

    #[test]
    fn document_key_prefers_document_id() {
        assert_eq!(document_key(&json!({ "document_id": "doc-9" }), 0), "doc-9");
        assert_eq!(document_key(&json!({ "document_id": 42 }), 0), "42");
        assert_eq!(document_key(&json!({}), 7), "#7");
    }
}
