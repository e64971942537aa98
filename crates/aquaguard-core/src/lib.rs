//! Core engine: catalog access + the analysis pipeline + result presenters.

mod analyze;
mod catalog;
mod render;
mod report;
mod sanitize;

pub use analyze::validate_then_evaluate;
pub use catalog::{lint_catalog, read_document, CatalogStore};
pub use render::{render_ui, ReportContext, UiLine, UiTag};
pub use report::{render_document, DocumentOptions, RenderError};
pub use sanitize::{encode_latin1, sanitize, UNICODE_MAP};
