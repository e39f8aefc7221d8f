//! Normalized answer and the field normalization rules applied to raw
//! model payloads.

use super::option_set::OptionSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed-schema answer returned to callers.
///
/// - `choice` is an option label (`"A"`..`"Z"`) or verbatim text when no
///   option matched.
/// - `confidence` is finite and within `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAnswer {
    pub choice: String,
    pub confidence: f64,
    pub explanation: String,
}

impl NormalizedAnswer {
    pub fn new(choice: impl Into<String>, confidence: f64, explanation: impl Into<String>) -> Self {
        Self {
            choice: choice.into(),
            confidence: clamp_confidence(confidence),
            explanation: explanation.into(),
        }
    }

    /// Text of the option whose label is `choice`, if `choice` is a label.
    pub fn chosen_option<'a>(&self, options: &'a OptionSet) -> Option<&'a str> {
        options
            .labelled()
            .find(|(label, _)| self.choice.len() == 1 && self.choice.starts_with(*label))
            .map(|(_, text)| text)
    }
}

/// Normalize a raw `choice` value against the available options.
///
/// Strings longer than one character (after trimming) are matched
/// case-insensitively against the option texts; the first match is replaced
/// by its label. Anything else passes through unchanged. Returns `None` for
/// `null`, which callers treat like a missing key.
pub fn normalize_choice(raw: &Value, options: &OptionSet) -> Option<String> {
    match raw {
        Value::Null => None,
        Value::String(s) => {
            if s.trim().chars().count() > 1
                && let Some(label) = options.find_label(s)
            {
                return Some(label.to_string());
            }
            Some(s.clone())
        }
        other => Some(other.to_string()),
    }
}

/// Coerce a raw `confidence` value into a finite float in `[0.0, 1.0]`.
///
/// Total: absent, `null`, non-numeric strings and structured values all
/// yield `0.0`.
pub fn coerce_confidence(raw: Option<&Value>) -> f64 {
    let value = match raw {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    };
    clamp_confidence(value)
}

/// Render a raw `explanation` value as text (`""` when absent or null).
pub fn coerce_explanation(raw: Option<&Value>) -> String {
    match raw {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn clamp_confidence(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn capitals() -> OptionSet {
        OptionSet::new(vec![
            "Paris".to_string(),
            "London".to_string(),
            "Rome".to_string(),
        ])
        .unwrap()
    }

    // ==================== normalize_choice ====================

    #[test]
    fn test_choice_text_maps_to_label() {
        assert_eq!(normalize_choice(&json!("london"), &capitals()), Some("B".to_string()));
        assert_eq!(normalize_choice(&json!(" Rome "), &capitals()), Some("C".to_string()));
    }

    #[test]
    fn test_single_letter_passes_through() {
        assert_eq!(normalize_choice(&json!("B"), &capitals()), Some("B".to_string()));
        assert_eq!(normalize_choice(&json!("b"), &capitals()), Some("b".to_string()));
    }

    #[test]
    fn test_unmatched_text_is_verbatim() {
        assert_eq!(
            normalize_choice(&json!("Madrid"), &capitals()),
            Some("Madrid".to_string())
        );
        // Untrimmed original is kept when nothing matches
        assert_eq!(
            normalize_choice(&json!(" Madrid "), &capitals()),
            Some(" Madrid ".to_string())
        );
    }

    #[test]
    fn test_free_response_keeps_text() {
        assert_eq!(
            normalize_choice(&json!("Dennis Ritchie"), &OptionSet::empty()),
            Some("Dennis Ritchie".to_string())
        );
    }

    #[test]
    fn test_non_string_choice_is_rendered() {
        assert_eq!(normalize_choice(&json!(3), &capitals()), Some("3".to_string()));
        assert_eq!(normalize_choice(&json!(true), &capitals()), Some("true".to_string()));
        assert_eq!(normalize_choice(&Value::Null, &capitals()), None);
    }

    // ==================== coerce_confidence ====================

    #[test]
    fn test_confidence_is_total() {
        assert_eq!(coerce_confidence(None), 0.0);
        assert_eq!(coerce_confidence(Some(&Value::Null)), 0.0);
        assert_eq!(coerce_confidence(Some(&json!(0.85))), 0.85);
        assert_eq!(coerce_confidence(Some(&json!("0.9"))), 0.9);
        assert_eq!(coerce_confidence(Some(&json!(" 0.25\n"))), 0.25);
        assert_eq!(coerce_confidence(Some(&json!("very sure"))), 0.0);
        assert_eq!(coerce_confidence(Some(&json!({"value": 1}))), 0.0);
        assert_eq!(coerce_confidence(Some(&json!([0.5]))), 0.0);
        assert_eq!(coerce_confidence(Some(&json!(true))), 1.0);
    }

    #[test]
    fn test_confidence_is_finite_and_clamped() {
        assert_eq!(coerce_confidence(Some(&json!("NaN"))), 0.0);
        assert_eq!(coerce_confidence(Some(&json!("inf"))), 0.0);
        assert_eq!(coerce_confidence(Some(&json!(85))), 1.0);
        assert_eq!(coerce_confidence(Some(&json!(-0.2))), 0.0);
        for raw in [json!("1e400"), json!("-inf"), json!(1e300)] {
            let c = coerce_confidence(Some(&raw));
            assert!(c.is_finite());
            assert!((0.0..=1.0).contains(&c));
        }
    }

    // ==================== coerce_explanation ====================

    #[test]
    fn test_explanation_defaults_to_empty() {
        assert_eq!(coerce_explanation(None), "");
        assert_eq!(coerce_explanation(Some(&Value::Null)), "");
        assert_eq!(coerce_explanation(Some(&json!("Because"))), "Because");
        assert_eq!(coerce_explanation(Some(&json!(["a", "b"]))), r#"["a","b"]"#);
    }

    #[test]
    fn test_chosen_option() {
        let options = capitals();
        assert_eq!(NormalizedAnswer::new("B", 0.5, "").chosen_option(&options), Some("London"));
        assert_eq!(NormalizedAnswer::new("D", 0.5, "").chosen_option(&options), None);
        assert_eq!(NormalizedAnswer::new("b", 0.5, "").chosen_option(&options), None);
        assert_eq!(NormalizedAnswer::new("Madrid", 0.5, "").chosen_option(&options), None);
    }
}
