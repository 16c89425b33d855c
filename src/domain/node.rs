// src/domain/node.rs
//
// Every field read from the feed goes through these three. The tree is
// irregular (see feed/tree.rs) so none of them can fail: a missing or
// misshapen node just comes back empty.

use crate::feed::{ATTRS_KEY, TEXT_KEY};
use serde_json::Value;

/// Absent → [], array → its items, anything else → [node].
pub fn as_list(node: Option<&Value>) -> Vec<&Value> {
    match node {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// Trimmed text of a plain string or of an object's text payload.
pub fn text(node: Option<&Value>) -> String {
    match node {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Object(obj)) => obj
            .get(TEXT_KEY)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// An attribute value of an element node, trimmed; "" if missing.
pub fn attr(node: Option<&Value>, name: &str) -> String {
    node.and_then(|n| n.get(ATTRS_KEY))
        .and_then(|attrs| attrs.get(name))
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Child element text, falling back to an attribute of the same name.
pub fn text_or_attr(node: Option<&Value>, name: &str) -> String {
    let from_child = text(node.and_then(|n| n.get(name)));
    if from_child.is_empty() {
        attr(node, name)
    } else {
        from_child
    }
}

/// Numeric value of a node's text with everything but digits, `.` and `-`
/// stripped. `None` when there is no digit at all.
pub fn numeric(node: Option<&Value>) -> Option<f64> {
    parse_number(&text(node))
}

/// `"1,200 sq ft"` → 1200, `"£12.50 psf"` → 12.5, `"n/a"` → None.
///
/// Takes the first number in what's left after stripping, so anything with a
/// digit in it produces a finite value.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let first_digit = cleaned.iter().position(char::is_ascii_digit)?;

    let mut start = first_digit;
    let mut seen_dot = false;
    if start > 0 && cleaned[start - 1] == '.' {
        start -= 1;
        seen_dot = true;
    }
    if start > 0 && cleaned[start - 1] == '-' {
        start -= 1;
    }

    let mut end = first_digit;
    while end < cleaned.len() {
        match cleaned[end] {
            c if c.is_ascii_digit() => end += 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    let candidate: String = cleaned[start..end].iter().collect();
    // too many digits parses as infinity
    candidate
        .parse::<f64>()
        .ok()
        .map(|n| if n.is_finite() { n } else { f64::MAX.copysign(n) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn as_list_normalizes_cardinality() {
        let single = json!("a");
        let many = json!(["a", "b"]);
        assert!(as_list(None).is_empty());
        assert!(as_list(Some(&Value::Null)).is_empty());
        assert_eq!(as_list(Some(&single)), vec![&single]);
        assert_eq!(as_list(Some(&many)).len(), 2);
    }

    #[test]
    fn text_handles_strings_and_objects() {
        assert_eq!(text(Some(&json!("  Leeds "))), "Leeds");
        assert_eq!(text(Some(&json!({ "_": " Office ", "$": { "id": "1" } }))), "Office");
        assert_eq!(text(Some(&json!({ "$": { "id": "1" } }))), "");
        assert_eq!(text(Some(&json!(["a"]))), "");
        assert_eq!(text(None), "");
    }

    #[test]
    fn attr_and_text_or_attr() {
        let node = json!({ "$": { "rating": "C" }, "value": "62" });
        assert_eq!(attr(Some(&node), "rating"), "C");
        assert_eq!(attr(Some(&node), "missing"), "");
        assert_eq!(text_or_attr(Some(&node), "rating"), "C");
        assert_eq!(text_or_attr(Some(&node), "value"), "62");
        assert_eq!(text_or_attr(Some(&json!("plain")), "rating"), "");
    }

    #[test]
    fn parse_number_strips_formatting() {
        assert_eq!(parse_number("1,200 sq ft"), Some(1200.0));
        assert_eq!(parse_number("£12.50 psf"), Some(12.5));
        assert_eq!(parse_number("-1.5"), Some(-1.5));
        assert_eq!(parse_number("53.8008"), Some(53.8008));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("1.2.3"), Some(1.2));
        assert_eq!(parse_number("500 - 1,000"), Some(500.0));
    }

    #[test]
    fn parse_number_without_digits_is_none() {
        for raw in ["", "n/a", "-", ".", "POA", "-.-"] {
            assert_eq!(parse_number(raw), None, "{raw:?}");
        }
    }

    #[test]
    fn parse_number_is_total_and_idempotent() {
        let samples = [
            "1", "12,345", "£1,250,000", "approx 3.5 acres", "--7", "9.", "x.9y", "0",
            "1-2-3", "...4...", "-0.25%",
        ];
        let huge = "9".repeat(400);
        let huge_negative = format!("-{huge}");
        let samples = samples
            .into_iter()
            .chain([huge.as_str(), huge_negative.as_str()]);
        for raw in samples {
            let n = parse_number(raw).unwrap_or_else(|| panic!("{raw:?} has a digit"));
            assert!(n.is_finite());
            assert_eq!(parse_number(&n.to_string()), Some(n), "{raw:?}");
        }
    }

    #[test]
    fn parse_number_clamps_overflow() {
        assert_eq!(parse_number(&"9".repeat(400)), Some(f64::MAX));
        assert_eq!(parse_number(&format!("-{}", "1".repeat(400))), Some(f64::MIN));
    }

    #[test]
    fn numeric_reads_text_payloads() {
        assert_eq!(numeric(Some(&json!({ "_": "2,500", "$": { "unit": "sqft" } }))), Some(2500.0));
        assert_eq!(numeric(Some(&json!(42))), Some(42.0));
        assert_eq!(numeric(None), None);
    }
}
