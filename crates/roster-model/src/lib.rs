//! Data model shared by the roster crates.
//!
//! - [`cell`]: untyped rows and their lazy coercion rules
//! - [`dataset`]: the clients/workers/tasks schemas
//! - [`finding`]: validation findings and per-dataset results
//! - [`rule`]: the business rule sum type and its invariants

pub mod cell;
pub mod dataset;
pub mod error;
pub mod finding;
pub mod rule;

pub use cell::{CellKey, CellValue, Row, list_tokens, number_of, parse_number, text_of};
pub use dataset::{CLIENT_COLUMNS, DatasetKind, DatasetSet, TASK_COLUMNS, WORKER_COLUMNS, columns};
pub use error::{Result, RuleError};
pub use finding::{DatasetResults, Finding, Severity, ValidationResult};
pub use rule::{
    CoRunRule, LoadLimitRule, PatternMatchRule, PhaseWindowRule, PrecedenceOverrideRule, Rule,
    RuleKind, SlotRestrictionRule,
};
