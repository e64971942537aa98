//! Compliance evaluation against the standards catalog.

use aquaguard_types::{
    Catalog, CleanedMeasurement, ComplianceEntry, ComplianceStatus, ParameterResult, StandardEntry,
};

/// Evaluate a cleaned batch against the catalog.
///
/// Each measurement is looked up by exact name. Unknown parameters produce a
/// warning and no result row. Known parameters are classified against every
/// registered authority standard independently, preserving catalog order.
///
/// Evaluating the same batch against an unchanged catalog is idempotent.
pub fn evaluate_batch(
    cleaned: &[CleanedMeasurement],
    catalog: &Catalog,
) -> (Vec<ParameterResult>, Vec<String>) {
    let mut results = Vec::new();
    let mut warnings = Vec::new();

    for measurement in cleaned {
        let record = match catalog.get(&measurement.name) {
            Some(record) => record,
            None => {
                warnings.push(format!(
                    "'{}': Not found in standards database -- skipped. \
                     Check spelling or update the standards source.",
                    measurement.name
                ));
                continue;
            }
        };

        let standards = record
            .standards
            .iter()
            .map(|standard| evaluate_standard(standard, measurement.value))
            .collect();

        results.push(ParameterResult {
            parameter: measurement.name.clone(),
            value: measurement.value,
            unit: record.unit.clone(),
            standards,
        });
    }

    (results, warnings)
}

/// Classify one value against one authority's standard.
pub fn evaluate_standard(standard: &StandardEntry, value: f64) -> ComplianceEntry {
    let mut violation: Option<String> = None;

    if let Some(max) = standard.max_limit {
        if value > max {
            violation = Some(format!("> {max}"));
        }
    }

    // Runs after the max check and overwrites its violation when both
    // limits are exceeded.
    if let Some(min) = standard.min_limit {
        if value < min {
            violation = Some(format!("< {min}"));
        }
    }

    let status = if violation.is_some() {
        ComplianceStatus::Fail
    } else if !standard.has_limit() {
        ComplianceStatus::Info
    } else {
        ComplianceStatus::Pass
    };

    let (consequence, solution) = if status == ComplianceStatus::Fail {
        (
            Some(standard.consequence.clone()),
            Some(standard.solution.clone()),
        )
    } else {
        (None, None)
    };

    ComplianceEntry {
        authority: standard.authority.clone(),
        standard_date: standard.standard_date.clone(),
        status,
        limit: limit_display(standard.min_limit, standard.max_limit),
        violation,
        consequence,
        solution,
        color: status.color(),
        marker: status.marker().to_string(),
    }
}

/// Display form of a standard's limits.
pub fn limit_display(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{min} - {max}"),
        (None, Some(max)) => format!("Max {max}"),
        (Some(min), None) => format!("Min {min}"),
        (None, None) => "No numeric limit".to_string(),
    }
}
