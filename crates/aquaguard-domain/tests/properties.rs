//! Property-based tests for aquaguard-domain.

use proptest::prelude::*;
use serde_json::json;

use aquaguard_domain::{evaluate_batch, evaluate_standard, validate_batch};
use aquaguard_types::{
    Catalog, CleanedMeasurement, ComplianceStatus, MeasurementInput, ParameterRecord,
    StandardEntry,
};

/// Strategy for finite measurement values.
fn finite_value() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("must be finite", |v| v.is_finite())
}

/// Strategy for an optional finite limit.
fn optional_limit() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(-1.0e6..1.0e6f64)
}

/// Strategy for a standard entry with arbitrary limit configuration.
fn standard_strategy() -> impl Strategy<Value = StandardEntry> {
    (optional_limit(), optional_limit()).prop_map(|(min, max)| StandardEntry {
        authority: "WHO".to_string(),
        standard_date: "2022".to_string(),
        min_limit: min,
        max_limit: max,
        consequence: "Adverse health effects.".to_string(),
        solution: "Treat the supply.".to_string(),
    })
}

/// Strategy for alphabetic strings that do not parse as numbers.
fn non_numeric_string() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z ]{0,15}")
        .expect("valid regex")
        .prop_filter("must not parse as f64", |s| {
            s.trim().parse::<f64>().is_err()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every finite numeric input survives validation unchanged.
    #[test]
    fn property_finite_numbers_validate_cleanly(value in finite_value()) {
        let batch = vec![MeasurementInput {
            name: "Sample".to_string(),
            value: Some(json!(value)),
        }];

        let (errors, cleaned) = validate_batch(&batch);

        prop_assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        prop_assert_eq!(cleaned.len(), 1);
        prop_assert_eq!(cleaned[0].value, value);
    }

    // Non-numeric text always yields an error and never a cleaned item.
    #[test]
    fn property_non_numeric_strings_are_rejected(raw in non_numeric_string()) {
        let batch = vec![MeasurementInput {
            name: "Sample".to_string(),
            value: Some(json!(raw)),
        }];

        let (errors, cleaned) = validate_batch(&batch);

        prop_assert_eq!(errors.len(), 1);
        prop_assert!(cleaned.is_empty());
    }

    // A violation message exists exactly when the entry failed, and
    // consequence/solution travel only with failures.
    #[test]
    fn property_violation_iff_fail(
        standard in standard_strategy(),
        value in finite_value(),
    ) {
        let entry = evaluate_standard(&standard, value);

        prop_assert_eq!(
            entry.violation.is_some(),
            entry.status == ComplianceStatus::Fail
        );
        prop_assert_eq!(
            entry.consequence.is_some(),
            entry.status == ComplianceStatus::Fail
        );
        prop_assert_eq!(
            entry.solution.is_some(),
            entry.status == ComplianceStatus::Fail
        );
    }

    // An entry without numeric limits is informational and can never fail.
    #[test]
    fn property_no_limits_means_info(value in finite_value()) {
        let standard = StandardEntry {
            authority: "WHO".to_string(),
            standard_date: "2022".to_string(),
            min_limit: None,
            max_limit: None,
            consequence: String::new(),
            solution: String::new(),
        };

        let entry = evaluate_standard(&standard, value);
        prop_assert_eq!(entry.status, ComplianceStatus::Info);
    }

    // A min limit of exactly zero applies: non-negative values pass it,
    // negative values fail it with the "< 0" violation.
    #[test]
    fn property_zero_min_limit_applies(value in finite_value()) {
        let standard = StandardEntry {
            authority: "WHO".to_string(),
            standard_date: "2022".to_string(),
            min_limit: Some(0.0),
            max_limit: None,
            consequence: "c".to_string(),
            solution: "s".to_string(),
        };

        let entry = evaluate_standard(&standard, value);
        if value < 0.0 {
            prop_assert_eq!(entry.status, ComplianceStatus::Fail);
            prop_assert_eq!(entry.violation.as_deref(), Some("< 0"));
        } else {
            prop_assert_eq!(entry.status, ComplianceStatus::Pass);
        }
    }

    // Evaluating the same cleaned batch against an unchanged catalog twice
    // yields identical results.
    #[test]
    fn property_evaluation_is_idempotent(
        standards in prop::collection::vec(standard_strategy(), 0..4),
        value in finite_value(),
    ) {
        let catalog = Catalog {
            parameters: vec![ParameterRecord {
                name: "Sample".to_string(),
                unit: "mg/L".to_string(),
                standards,
            }],
            metadata: None,
        };
        let cleaned = vec![CleanedMeasurement {
            name: "Sample".to_string(),
            value,
        }];

        let first = evaluate_batch(&cleaned, &catalog);
        let second = evaluate_batch(&cleaned, &catalog);
        prop_assert_eq!(first, second);
    }
}
