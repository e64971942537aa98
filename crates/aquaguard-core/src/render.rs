//! UI presenter: structured results to an ordered tagged-line sequence.
//!
//! Pure formatting over the evaluation output; the only derivation allowed
//! here is the per-parameter overall status.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use aquaguard_types::{ComplianceStatus, ParameterResult};

/// Styling tag for one display line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UiTag {
    Header,
    Subheader,
    Normal,
    Warning,
    Pass,
    Fail,
    Info,
}

/// One display line for the frontend to render with appropriate styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UiLine {
    pub tag: UiTag,
    pub text: String,
}

impl UiLine {
    fn new(tag: UiTag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }
}

/// Context the transport layer supplies to the presenters. Keeps them pure:
/// no clock or catalog access from inside a renderer.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    /// Catalog version label, or "" when unavailable.
    pub catalog_version: String,
    /// Human-readable generation timestamp.
    pub generated_at: String,
}

/// Convert structured results into the ordered tagged-line sequence for
/// interactive display.
pub fn render_ui(
    results: &[ParameterResult],
    warnings: &[String],
    ctx: &ReportContext,
) -> Vec<UiLine> {
    let mut lines = Vec::new();

    lines.push(UiLine::new(UiTag::Header, "COMPREHENSIVE ANALYSIS REPORT"));
    lines.push(UiLine::new(
        UiTag::Normal,
        format!("Date: {}", ctx.generated_at),
    ));
    lines.push(UiLine::new(
        UiTag::Normal,
        format!("Standards database: {}", ctx.catalog_version),
    ));
    lines.push(UiLine::new(UiTag::Normal, "=".repeat(60)));

    for warning in warnings {
        lines.push(UiLine::new(UiTag::Warning, format!("WARNING: {warning}")));
    }

    for result in results {
        lines.push(UiLine::new(
            UiTag::Subheader,
            format!(
                ">> {}  ({} {})",
                result.parameter, result.value, result.unit
            ),
        ));

        for entry in &result.standards {
            let date_label = format!(" [standard dated {}]", entry.standard_date);
            match entry.status {
                ComplianceStatus::Fail => {
                    lines.push(UiLine::new(
                        UiTag::Fail,
                        format!(
                            "   FAIL  [{}{}]  {}  (Limit: {})",
                            entry.authority,
                            date_label,
                            entry.violation.as_deref().unwrap_or(""),
                            entry.limit
                        ),
                    ));
                    lines.push(UiLine::new(
                        UiTag::Normal,
                        format!(
                            "         Consequence: {}",
                            entry.consequence.as_deref().unwrap_or("")
                        ),
                    ));
                    lines.push(UiLine::new(
                        UiTag::Normal,
                        format!(
                            "         Solution:    {}",
                            entry.solution.as_deref().unwrap_or("")
                        ),
                    ));
                }
                ComplianceStatus::Info => {
                    lines.push(UiLine::new(
                        UiTag::Info,
                        format!(
                            "   INFO  [{}{}]  {}",
                            entry.authority, date_label, entry.limit
                        ),
                    ));
                }
                ComplianceStatus::Pass => {
                    lines.push(UiLine::new(
                        UiTag::Pass,
                        format!(
                            "   PASS  [{}{}]  (Limit: {})",
                            entry.authority, date_label, entry.limit
                        ),
                    ));
                }
            }
        }

        lines.push(UiLine::new(UiTag::Normal, "-".repeat(40)));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquaguard_types::ComplianceEntry;

    fn ctx() -> ReportContext {
        ReportContext {
            catalog_version: "v2.1 (updated 2024-03-01)".to_string(),
            generated_at: "2024-03-05 10:00".to_string(),
        }
    }

    fn entry(status: ComplianceStatus) -> ComplianceEntry {
        ComplianceEntry {
            authority: "WHO".to_string(),
            standard_date: "2022".to_string(),
            status,
            limit: "Max 0.01".to_string(),
            violation: (status == ComplianceStatus::Fail).then(|| "> 0.01".to_string()),
            consequence: (status == ComplianceStatus::Fail)
                .then(|| "Neurological damage.".to_string()),
            solution: (status == ComplianceStatus::Fail)
                .then(|| "Replace lead service lines.".to_string()),
            color: status.color(),
            marker: status.marker().to_string(),
        }
    }

    fn result(status: ComplianceStatus) -> ParameterResult {
        ParameterResult {
            parameter: "Lead".to_string(),
            value: 0.02,
            unit: "mg/L".to_string(),
            standards: vec![entry(status)],
        }
    }

    #[test]
    fn header_block_comes_first() {
        let lines = render_ui(&[], &[], &ctx());
        assert_eq!(lines[0].tag, UiTag::Header);
        assert_eq!(lines[0].text, "COMPREHENSIVE ANALYSIS REPORT");
        assert_eq!(lines[1].text, "Date: 2024-03-05 10:00");
        assert!(lines[2].text.contains("v2.1"));
    }

    #[test]
    fn missing_version_renders_as_empty_suffix() {
        let lines = render_ui(&[], &[], &ReportContext::default());
        assert_eq!(lines[2].text, "Standards database: ");
    }

    #[test]
    fn warnings_are_tagged() {
        let warnings = vec!["'X': Not found".to_string()];
        let lines = render_ui(&[], &warnings, &ctx());
        let warning_lines: Vec<&UiLine> =
            lines.iter().filter(|l| l.tag == UiTag::Warning).collect();
        assert_eq!(warning_lines.len(), 1);
        assert_eq!(warning_lines[0].text, "WARNING: 'X': Not found");
    }

    #[test]
    fn fail_entry_emits_consequence_and_solution() {
        let lines = render_ui(&[result(ComplianceStatus::Fail)], &[], &ctx());

        let fail_idx = lines
            .iter()
            .position(|l| l.tag == UiTag::Fail)
            .expect("fail line");
        assert!(lines[fail_idx].text.contains("> 0.01"));
        assert!(lines[fail_idx].text.contains("standard dated 2022"));
        assert!(lines[fail_idx + 1].text.contains("Consequence: Neurological"));
        assert!(lines[fail_idx + 2].text.contains("Solution:"));
    }

    #[test]
    fn pass_entry_is_single_line() {
        let lines = render_ui(&[result(ComplianceStatus::Pass)], &[], &ctx());
        assert!(lines.iter().any(|l| l.tag == UiTag::Pass));
        assert!(!lines.iter().any(|l| l.text.contains("Consequence")));
    }

    #[test]
    fn each_parameter_gets_a_subheader() {
        let lines = render_ui(
            &[result(ComplianceStatus::Pass), result(ComplianceStatus::Fail)],
            &[],
            &ctx(),
        );
        let subheaders = lines.iter().filter(|l| l.tag == UiTag::Subheader).count();
        assert_eq!(subheaders, 2);
        assert!(lines
            .iter()
            .any(|l| l.tag == UiTag::Subheader && l.text.contains("(0.02 mg/L)")));
    }
}
