//! # sqlreview-semantic
//!
//! Model-backed semantic review for sqlreview.
//!
//! This crate is the external collaborator of the review pipeline: it
//! sends each changed file to the Anthropic Messages API and maps the
//! structured response into the same [`Finding`](sqlreview_core::Finding)
//! shape the deterministic checks produce. The core never depends on this
//! crate; the CLI merges its output into the shared aggregation step.
//!
//! Failure isolation is the central contract: a file whose review times
//! out, errors, or returns garbage contributes zero findings and a
//! warning. There is no retry or backoff.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod parse;
mod prompt;

pub use client::{
    SemanticConfig, SemanticError, SemanticReviewer, API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
pub use parse::findings_from_response;
pub use prompt::build_prompt;
