//! Template analysis
//!
//! Classifies every placeholder discovered in a template as filled, missing
//! a value, or unsupported, given the caller-supplied business values.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog;

/// Template vocabulary mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// One lessor per document
    Single,
    /// A block repeated per co-owner; structural loop names are valid
    MultiPayer,
}

/// Structural names valid only in multi-record templates. Not bound to a
/// single scalar value; a repeating-block expander consumes them downstream.
pub const MULTI_RECORD_NAMES: [&str; 5] = [
    "payers",
    "payer.full_name",
    "payer.tax_id",
    "payer.share",
    "loop.index",
];

/// Outcome of one template analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Supported names with no usable value, lexicographically sorted
    pub missing_supported: Vec<String>,
    /// Names absent from both vocabularies, lexicographically sorted
    pub unsupported: Vec<String>,
    /// Sum of all placeholder occurrences
    pub total_occurrences: usize,
    /// Occurrences that will receive a real value
    pub filled_occurrences: usize,
    /// Occurrence count per discovered name
    pub counts: BTreeMap<String, usize>,
}

/// Classify every discovered placeholder against the supported vocabularies
/// and the supplied values.
///
/// A name present in both the supported set and the multi-record list is
/// treated as supported: it needs a value and is reported missing otherwise.
/// Output lists inherit the sorted order of the counts map, so repeated runs
/// over the same input produce identical results.
pub fn analyze(
    counts: &BTreeMap<String, usize>,
    values: &Map<String, Value>,
    kind: TemplateKind,
) -> AnalysisResult {
    let mut result = AnalysisResult {
        missing_supported: Vec::new(),
        unsupported: Vec::new(),
        total_occurrences: 0,
        filled_occurrences: 0,
        counts: counts.clone(),
    };

    for (name, &count) in counts {
        result.total_occurrences += count;
        let structural = kind == TemplateKind::MultiPayer
            && MULTI_RECORD_NAMES.contains(&name.as_str());

        if catalog::is_supported(name) {
            if has_value(values, name) {
                result.filled_occurrences += count;
            } else {
                result.missing_supported.push(name.clone());
            }
        } else if structural {
            result.filled_occurrences += count;
        } else {
            result.unsupported.push(name.clone());
        }
    }

    result
}

/// A value is usable when it is present and not blank after trimming.
fn has_value(values: &Map<String, Value>, name: &str) -> bool {
    match values.get(name) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn counts(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
        pairs.iter().map(|(k, c)| (k.to_string(), *c)).collect()
    }

    fn values(obj: Value) -> Map<String, Value> {
        obj.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_template_yields_empty_result() {
        let result = analyze(&BTreeMap::new(), &Map::new(), TemplateKind::Single);
        assert_eq!(result.total_occurrences, 0);
        assert!(result.missing_supported.is_empty());
        assert!(result.unsupported.is_empty());
    }

    #[test]
    fn classifies_filled_missing_and_unsupported() {
        let counts = counts(&[
            ("payer_full_name", 2),
            ("contract_date", 1),
            ("unknown_field", 1),
        ]);
        let values = values(json!({ "payer_full_name": "Іван Петров" }));

        let result = analyze(&counts, &values, TemplateKind::Single);
        assert_eq!(result.total_occurrences, 4);
        assert_eq!(result.filled_occurrences, 2);
        assert_eq!(result.missing_supported, vec!["contract_date"]);
        assert_eq!(result.unsupported, vec!["unknown_field"]);
    }

    #[test]
    fn blank_values_count_as_missing() {
        let counts = counts(&[("payer_full_name", 1), ("contract_number", 1)]);
        let values = values(json!({ "payer_full_name": "   ", "contract_number": null }));

        let result = analyze(&counts, &values, TemplateKind::Single);
        assert_eq!(result.filled_occurrences, 0);
        assert_eq!(
            result.missing_supported,
            vec!["contract_number", "payer_full_name"]
        );
    }

    #[test]
    fn structural_names_fill_in_multi_record_mode() {
        let counts = counts(&[("payers", 1), ("loop.index", 3)]);

        let single = analyze(&counts, &Map::new(), TemplateKind::Single);
        assert_eq!(single.filled_occurrences, 0);
        assert_eq!(single.unsupported, vec!["loop.index", "payers"]);

        let multi = analyze(&counts, &Map::new(), TemplateKind::MultiPayer);
        assert_eq!(multi.filled_occurrences, 4);
        assert!(multi.unsupported.is_empty());
    }

    #[test]
    fn supported_wins_over_structural() {
        // payer.full_name is both supported and in the multi-record list;
        // without a value it must be reported missing, not auto-filled.
        let counts = counts(&[("payer.full_name", 2)]);
        let result = analyze(&counts, &Map::new(), TemplateKind::MultiPayer);
        assert_eq!(result.filled_occurrences, 0);
        assert_eq!(result.missing_supported, vec!["payer.full_name"]);
    }

    #[test]
    fn analysis_is_deterministic() {
        let counts = counts(&[("z_unknown", 1), ("a_unknown", 1), ("payer_full_name", 1)]);
        let first = analyze(&counts, &Map::new(), TemplateKind::Single);
        let second = analyze(&counts, &Map::new(), TemplateKind::Single);
        assert_eq!(first.unsupported, vec!["a_unknown", "z_unknown"]);
        assert_eq!(first.unsupported, second.unsupported);
        assert_eq!(first.missing_supported, second.missing_supported);
    }
}
