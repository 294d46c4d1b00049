use thiserror::Error;

use crate::rule::RuleKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The rule breaks one or more of its variant's invariants.
    #[error("invalid {kind} rule: {}", .violations.join("; "))]
    Invalid {
        kind: RuleKind,
        violations: Vec<String>,
    },
}

impl RuleError {
    pub fn violations(&self) -> &[String] {
        match self {
            RuleError::Invalid { violations, .. } => violations,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuleError>;
