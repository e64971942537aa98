//! Domain logic: input validation + compliance evaluation.
//!
//! This crate is designed to be I/O-free and highly testable.

pub mod evaluate;
pub mod validate;

pub use evaluate::{evaluate_batch, evaluate_standard, limit_display};
pub use validate::validate_batch;
