//! Substitution context construction
//!
//! Turns the discovered placeholder set plus a bag of candidate values into
//! the final name-to-string map handed to the renderer.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::catalog::{self, ValueKind};

/// Substituted when no usable value exists for a placeholder
pub const EMPTY_VALUE: &str = "—";

/// Build the substitution map for a template.
///
/// Every discovered placeholder gets an entry. Supported names take their
/// value from `values`, formatted by the variable's declared kind; absent or
/// blank values become the sentinel. Unsupported names always become the
/// sentinel, even when `values` happens to carry a matching key: stale
/// template remnants must never leak unrelated business data.
pub fn build(
    placeholders: &BTreeMap<String, usize>,
    values: &Map<String, Value>,
) -> BTreeMap<String, String> {
    let mut context = BTreeMap::new();
    for name in placeholders.keys() {
        let rendered = match catalog::kind_of(name) {
            Some(kind) => match raw_value(values, name) {
                Some(raw) if !raw.trim().is_empty() => format_value(kind, &raw),
                _ => EMPTY_VALUE.to_string(),
            },
            None => EMPTY_VALUE.to_string(),
        };
        context.insert(name.clone(), rendered);
    }
    context
}

/// String form of a JSON value; `Null` counts as absent.
fn raw_value(values: &Map<String, Value>, name: &str) -> Option<String> {
    match values.get(name)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Dispatch to the typed formatter for a variable's declared semantics.
fn format_value(kind: ValueKind, raw: &str) -> String {
    match kind {
        ValueKind::Text => raw.to_string(),
        ValueKind::Area => uk_text::format_area(raw),
        ValueKind::Money => uk_text::format_money(raw),
        ValueKind::MoneyWords => match raw.trim().replace(',', ".").parse::<f64>() {
            Ok(n) => uk_text::format_hryvnia_words(n),
            Err(_) => raw.to_string(),
        },
        ValueKind::Share => uk_text::format_share(raw),
        ValueKind::Date => uk_text::format_date_words(raw),
    }
}
