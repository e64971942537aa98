//! Batch input validation.
//!
//! Decides "is this a number", nothing more. Whether a value is compliant
//! with the catalog's limits is solely the evaluator's job, so physical
//! bounds from the catalog never reject a value here.

use serde_json::Value;

use aquaguard_types::{CleanedMeasurement, MeasurementInput};

/// Validate a raw batch before analysis.
///
/// Per-item checks, in order, first failure wins (the item is excluded from
/// `cleaned` and a human-readable message is appended to `errors`):
/// 1. a value is present and non-empty,
/// 2. the value coerces to a real number,
/// 3. the number is finite (NaN/infinity rejected).
///
/// A non-empty error list means the caller must treat the whole batch as
/// rejected; partial analysis over the surviving items is not allowed.
pub fn validate_batch(batch: &[MeasurementInput]) -> (Vec<String>, Vec<CleanedMeasurement>) {
    let mut errors = Vec::new();
    let mut cleaned = Vec::new();

    for item in batch {
        let name = &item.name;

        let raw = match &item.value {
            Some(v) if !is_blank(v) => v,
            _ => {
                errors.push(format!("'{name}': No value entered."));
                continue;
            }
        };

        let value = match coerce_number(raw) {
            Some(v) => v,
            None => {
                errors.push(format!(
                    "'{name}': '{raw}' is not a valid number.",
                    raw = display_raw(raw)
                ));
                continue;
            }
        };

        if !value.is_finite() {
            errors.push(format!("'{name}': Value must be a finite real number."));
            continue;
        }

        cleaned.push(CleanedMeasurement {
            name: name.clone(),
            value,
        });
    }

    (errors, cleaned)
}

/// Null or whitespace-only text counts as "nothing entered".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Coerce a JSON value to f64: numbers directly, strings by parsing.
/// Booleans, arrays and objects are not numbers.
///
/// String parsing intentionally accepts "inf"/"NaN" spellings; the
/// finiteness check rejects them with a clearer message than a parse
/// failure would.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Render the raw value for an error message: bare text for strings, JSON
/// rendering for everything else.
fn display_raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
