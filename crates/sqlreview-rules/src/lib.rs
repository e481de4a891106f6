//! # sqlreview-rules
//!
//! Built-in deterministic checks for sqlreview.
//!
//! Every check is a pure, stateless pattern rule over a single
//! [`FileChange`]; severity is baked into each check and rule names are
//! stable UPPER_SNAKE identifiers.
//!
//! ## Available Checks
//!
//! | Name | Severity | Scope | Description |
//! |------|----------|-------|-------------|
//! | `SELECT_STAR` | error | line | Flags `SELECT *` in changed model SQL |
//! | `HARDCODED_SCHEMA` | error | line | Flags `schema.table` outside `ref()`/`source()` |
//! | `MISSING_REF` | warning | line | Flags bare dbt model names in `FROM`/`JOIN` |
//! | `SELECT_DISTINCT` | warning | line | Flags `SELECT DISTINCT` |
//! | `CARTESIAN_JOIN` | error | line | Flags `JOIN` with no `ON`/`USING` in a one-line window |
//! | `TOO_MANY_COLUMNS` | info | file | Flags select lists above a column threshold |
//!
//! ## Usage
//!
//! ```ignore
//! use sqlreview_core::Engine;
//! use sqlreview_rules::all_checks;
//!
//! let engine = Engine::builder()
//!     .check_boxes(all_checks())
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cartesian_join;
mod hardcoded_schema;
mod missing_ref;
mod pattern;
mod presets;
mod select_distinct;
mod select_star;
mod wide_select;

pub use cartesian_join::CartesianJoin;
pub use hardcoded_schema::HardcodedSchema;
pub use missing_ref::MissingRef;
pub use pattern::{mask_templating, LinePattern};
pub use presets::{all_checks, configured_checks};
pub use select_distinct::SelectDistinct;
pub use select_star::SelectStar;
pub use wide_select::WideSelect;

/// Re-export core types for convenience.
pub use sqlreview_core::{Check, FileChange, Finding, Severity};
