//! The validate-then-evaluate pipeline.

use aquaguard_domain::{evaluate_batch, validate_batch};
use aquaguard_types::{AnalysisOutcome, Catalog, MeasurementInput};

/// Run a raw batch through validation and, when it is clean, evaluation.
///
/// Validation is all-or-nothing at the batch level: any per-item error
/// rejects the whole batch and nothing is evaluated. The transport layer
/// maps a non-empty `errors` list to a client input-error response and
/// otherwise forwards `results` and `warnings`.
pub fn validate_then_evaluate(batch: &[MeasurementInput], catalog: &Catalog) -> AnalysisOutcome {
    let (errors, cleaned) = validate_batch(batch);

    if !errors.is_empty() {
        return AnalysisOutcome {
            errors,
            warnings: Vec::new(),
            results: Vec::new(),
        };
    }

    let (results, warnings) = evaluate_batch(&cleaned, catalog);
    AnalysisOutcome {
        errors: Vec::new(),
        warnings,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquaguard_types::{ComplianceStatus, ParameterRecord, StandardEntry};
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog {
            parameters: vec![ParameterRecord {
                name: "pH Level".to_string(),
                unit: "pH".to_string(),
                standards: vec![StandardEntry {
                    authority: "WHO".to_string(),
                    standard_date: "2022".to_string(),
                    min_limit: Some(6.5),
                    max_limit: Some(8.5),
                    consequence: "Corrosion or scaling.".to_string(),
                    solution: "Adjust dosing.".to_string(),
                }],
            }],
            metadata: None,
        }
    }

    fn item(name: &str, value: serde_json::Value) -> MeasurementInput {
        MeasurementInput {
            name: name.to_string(),
            value: Some(value),
        }
    }

    #[test]
    fn clean_batch_is_evaluated() {
        let outcome = validate_then_evaluate(&[item("pH Level", json!(7.2))], &catalog());
        assert!(outcome.errors.is_empty());
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(
            outcome.results[0].overall_status(),
            ComplianceStatus::Pass
        );
    }

    #[test]
    fn any_invalid_item_rejects_the_whole_batch() {
        let outcome = validate_then_evaluate(
            &[item("pH Level", json!(7.2)), item("pH Level", json!("abc"))],
            &catalog(),
        );
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.results.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn unknown_parameters_surface_as_warnings() {
        let outcome = validate_then_evaluate(&[item("Mystery Compound", json!(5))], &catalog());
        assert!(outcome.errors.is_empty());
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("Mystery Compound"));
    }
}
