//! Data types (catalog + compliance results) for aquaguard.
//!
//! This crate is intentionally "dumb": pure DTOs with serde + schemars.
//! Decision logic lives in `aquaguard-domain`; loading and presentation in
//! `aquaguard-core`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Frozen Vocabulary ──────────────────────────────────────────
/// Citation date used when a standard entry does not carry one.
pub const DATE_UNKNOWN: &str = "date unknown";

/// Name substituted for batch items submitted without one.
pub const UNKNOWN_PARAMETER: &str = "Unknown Parameter";

/// Classification of a measurement against a single authority's standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Pass,
    Fail,
    /// The standard defines no numeric limit; the entry is informational
    /// and can never fail.
    Info,
}

impl ComplianceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplianceStatus::Pass => "PASS",
            ComplianceStatus::Fail => "FAIL",
            ComplianceStatus::Info => "INFO",
        }
    }

    /// Fixed severity color, a presentation hint only.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            ComplianceStatus::Pass => (0, 150, 0),
            ComplianceStatus::Fail => (200, 0, 0),
            ComplianceStatus::Info => (0, 0, 200),
        }
    }

    /// Fixed marker symbol, a presentation hint only.
    pub fn marker(self) -> &'static str {
        match self {
            ComplianceStatus::Pass => "\u{2713}",
            ComplianceStatus::Fail => "\u{2717}",
            ComplianceStatus::Info => "i",
        }
    }
}

/// One authority's limit rule for a parameter, as loaded from the catalog
/// source. Immutable once loaded.
///
/// At most one of `min_limit`/`max_limit` may be absent for a rule that can
/// fail; an entry with neither is informational-only. Presence is always
/// tested with `is_some()` so a limit of exactly 0 still applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StandardEntry {
    pub authority: String,

    /// Citation date of the standard, e.g. "2022". Defaults to
    /// [`DATE_UNKNOWN`] when the source omits it.
    #[serde(default = "default_standard_date")]
    pub standard_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_limit: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_limit: Option<f64>,

    /// Health consequence of a violation. Required in practice only for
    /// entries that can fail.
    #[serde(default)]
    pub consequence: String,

    /// Remediation advice for a violation.
    #[serde(default)]
    pub solution: String,
}

fn default_standard_date() -> String {
    DATE_UNKNOWN.to_string()
}

impl StandardEntry {
    /// Whether this entry defines at least one numeric limit.
    pub fn has_limit(&self) -> bool {
        self.min_limit.is_some() || self.max_limit.is_some()
    }
}

/// A measurable parameter and its per-authority standards, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParameterRecord {
    /// Unique, non-empty key.
    pub name: String,
    /// Physical unit the value is reported in, e.g. "mg/L".
    pub unit: String,
    pub standards: Vec<StandardEntry>,
}

/// Optional catalog provenance metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CatalogMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// The full set of parameters and their per-authority standards.
///
/// Loaded once and shared read-only; replaced wholesale on reload rather
/// than mutated in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    pub parameters: Vec<ParameterRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CatalogMetadata>,
}

impl Catalog {
    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&ParameterRecord> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Sorted parameter names, for selector UIs.
    pub fn parameter_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.parameters.iter().map(|p| p.name.clone()).collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Human-readable version label, e.g. "v2.1 (updated 2024-03-01)".
    ///
    /// Returns a label only when both metadata fields are present; partial
    /// metadata is treated as absent, never partially shown.
    pub fn version_label(&self) -> String {
        match &self.metadata {
            Some(CatalogMetadata {
                db_version: Some(version),
                last_updated: Some(updated),
            }) => format!("v{version} (updated {updated})"),
            _ => String::new(),
        }
    }
}

/// The catalog source document: either a bare list of parameter records or
/// an envelope with `_metadata` and a `parameters` list.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CatalogDocument {
    Flat(Vec<ParameterRecord>),
    Versioned {
        #[serde(default, rename = "_metadata")]
        metadata: Option<CatalogMetadata>,
        parameters: Vec<ParameterRecord>,
    },
}

impl From<CatalogDocument> for Catalog {
    fn from(doc: CatalogDocument) -> Self {
        match doc {
            CatalogDocument::Flat(parameters) => Catalog {
                parameters,
                metadata: None,
            },
            CatalogDocument::Versioned {
                metadata,
                parameters,
            } => Catalog {
                parameters,
                metadata,
            },
        }
    }
}

/// One raw batch item as submitted. Transient, one per request item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MeasurementInput {
    #[serde(default = "default_parameter_name")]
    pub name: String,

    /// The raw value, any JSON shape. Validation decides what it means.
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

fn default_parameter_name() -> String {
    UNKNOWN_PARAMETER.to_string()
}

/// A batch item that passed validation: coerced to numeric and confirmed
/// finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CleanedMeasurement {
    pub name: String,
    pub value: f64,
}

/// A measurement's classification against one authority's standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceEntry {
    pub authority: String,
    pub standard_date: String,
    pub status: ComplianceStatus,

    /// Display form of the applicable limits, e.g. "6.5 - 8.5" or "Max 0.01".
    pub limit: String,

    /// Which bound was violated, e.g. "> 0.01". Fail entries only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,

    /// Severity color for this entry's status.
    pub color: (u8, u8, u8),

    /// Marker symbol for this entry's status.
    pub marker: String,
}

/// Full compliance detail for one measured parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParameterResult {
    pub parameter: String,
    pub value: f64,
    pub unit: String,
    /// One entry per registered authority standard, in catalog order.
    pub standards: Vec<ComplianceEntry>,
}

impl ParameterResult {
    /// Overall status: Fail if any authority's check failed, else Pass.
    /// Always recomputed, never stored.
    pub fn overall_status(&self) -> ComplianceStatus {
        if self
            .standards
            .iter()
            .any(|s| s.status == ComplianceStatus::Fail)
        {
            ComplianceStatus::Fail
        } else {
            ComplianceStatus::Pass
        }
    }
}

/// What the pipeline hands the transport layer.
///
/// `errors` non-empty means the whole batch was rejected and `warnings` and
/// `results` are empty (validation is all-or-nothing at the batch level).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisOutcome {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub results: Vec<ParameterResult>,
}
