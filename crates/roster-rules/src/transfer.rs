//! JSON export/import format.
//!
//! ```text
//! {
//!   "rules": [ { "type": "coRun", "tasks": ["T1", "T2"] }, ... ],
//!   "metadata": { "generatedAt": "...", "ruleCount": 1, "ruleTypes": ["coRun"] }
//! }
//! ```
//!
//! Imports accept that document or a bare array of rules.

use chrono::{DateTime, Utc};
use roster_model::{Rule, RuleKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub generated_at: DateTime<Utc>,
    pub rule_count: usize,
    /// Distinct rule types, in order of first appearance.
    pub rule_types: Vec<RuleKind>,
}

/// Snapshot of a rule collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleExport {
    pub rules: Vec<Rule>,
    pub metadata: ExportMetadata,
}

impl RuleExport {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self::generated_at(rules, Utc::now())
    }

    pub fn generated_at(rules: Vec<Rule>, generated_at: DateTime<Utc>) -> Self {
        let mut rule_types: Vec<RuleKind> = Vec::new();
        for rule in &rules {
            let kind = rule.kind();
            if !rule_types.contains(&kind) {
                rule_types.push(kind);
            }
        }
        let metadata = ExportMetadata {
            generated_at,
            rule_count: rules.len(),
            rule_types,
        };
        Self { rules, metadata }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Parse an import payload into rules, without validating them.
///
/// Unknown rule types and missing fields are parse errors.
pub fn parse_import(text: &str) -> serde_json::Result<Vec<Rule>> {
    let value: Value = serde_json::from_str(text)?;
    let rules = match value {
        Value::Object(mut document) => match document.remove("rules") {
            Some(rules) => rules,
            None => Value::Object(document),
        },
        other => other,
    };
    serde_json::from_value(rules)
}
