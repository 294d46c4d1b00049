//! Business rules constraining how tasks are scheduled against workers.
//!
//! A [`Rule`] is one of six closed variants. Each variant carries its own
//! construction invariants, checked by [`Rule::validate`] before the rule may
//! be stored anywhere. Rules are only checked against themselves; two rules
//! that contradict each other are both accepted.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleError};

/// Discriminant of a [`Rule`], serialized as its `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    CoRun,
    SlotRestriction,
    LoadLimit,
    PhaseWindow,
    PatternMatch,
    PrecedenceOverride,
}

impl RuleKind {
    pub const ALL: [RuleKind; 6] = [
        Self::CoRun,
        Self::SlotRestriction,
        Self::LoadLimit,
        Self::PhaseWindow,
        Self::PatternMatch,
        Self::PrecedenceOverride,
    ];

    /// Wire tag (`coRun`, `slotRestriction`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CoRun => "coRun",
            Self::SlotRestriction => "slotRestriction",
            Self::LoadLimit => "loadLimit",
            Self::PhaseWindow => "phaseWindow",
            Self::PatternMatch => "patternMatch",
            Self::PrecedenceOverride => "precedenceOverride",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::CoRun => "Co-run",
            Self::SlotRestriction => "Slot restriction",
            Self::LoadLimit => "Load limit",
            Self::PhaseWindow => "Phase window",
            Self::PatternMatch => "Pattern match",
            Self::PrecedenceOverride => "Precedence override",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown rule type: {trimmed}"))
    }
}

/// Tasks that must run together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoRunRule {
    pub tasks: Vec<String>,
}

/// A group whose members must share at least `min_common_slots` slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRestrictionRule {
    pub group: String,
    pub min_common_slots: i64,
}

/// Caps the slots a worker group may take in one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadLimitRule {
    pub group: String,
    pub max_slots_per_phase: i64,
}

/// Phases in which a task may be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseWindowRule {
    pub task: String,
    pub allowed_phases: Vec<i64>,
}

/// Regex-driven rule template with free-form parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatchRule {
    pub regex: String,
    pub template: String,
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

/// Orders specific rules ahead of global ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecedenceOverrideRule {
    pub global: Vec<String>,
    pub specific: Vec<String>,
    pub priority: i64,
}

/// A business rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Rule {
    CoRun(CoRunRule),
    SlotRestriction(SlotRestrictionRule),
    LoadLimit(LoadLimitRule),
    PhaseWindow(PhaseWindowRule),
    PatternMatch(PatternMatchRule),
    PrecedenceOverride(PrecedenceOverrideRule),
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::CoRun(_) => RuleKind::CoRun,
            Rule::SlotRestriction(_) => RuleKind::SlotRestriction,
            Rule::LoadLimit(_) => RuleKind::LoadLimit,
            Rule::PhaseWindow(_) => RuleKind::PhaseWindow,
            Rule::PatternMatch(_) => RuleKind::PatternMatch,
            Rule::PrecedenceOverride(_) => RuleKind::PrecedenceOverride,
        }
    }

    /// Every invariant this rule violates, in a stable order.
    pub fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        match self {
            Rule::CoRun(rule) => {
                if rule.tasks.len() < 2 {
                    violations.push("Co-run rule requires at least 2 tasks".to_string());
                }
                if rule.tasks.iter().any(|task| is_blank(task)) {
                    violations.push("Task names cannot be empty".to_string());
                }
            }
            Rule::SlotRestriction(rule) => {
                if is_blank(&rule.group) {
                    violations.push("Group is required".to_string());
                }
                if rule.min_common_slots < 1 {
                    violations.push("Minimum common slots must be at least 1".to_string());
                }
            }
            Rule::LoadLimit(rule) => {
                if is_blank(&rule.group) {
                    violations.push("Group is required".to_string());
                }
                if rule.max_slots_per_phase < 1 {
                    violations.push("Max slots per phase must be at least 1".to_string());
                }
            }
            Rule::PhaseWindow(rule) => {
                if is_blank(&rule.task) {
                    violations.push("Task is required".to_string());
                }
                if rule.allowed_phases.is_empty() {
                    violations.push("At least one allowed phase is required".to_string());
                }
                if rule.allowed_phases.iter().any(|phase| *phase < 1) {
                    violations.push("All phases must be at least 1".to_string());
                }
            }
            Rule::PatternMatch(rule) => {
                if is_blank(&rule.regex) {
                    violations.push("Regex pattern is required".to_string());
                } else if let Err(error) = Regex::new(&rule.regex) {
                    violations.push(format!("Invalid regex pattern: {}", first_line(&error)));
                }
                if is_blank(&rule.template) {
                    violations.push("Template is required".to_string());
                }
            }
            Rule::PrecedenceOverride(rule) => {
                if rule.global.is_empty() {
                    violations.push("At least one global rule is required".to_string());
                }
                if rule.specific.is_empty() {
                    violations.push("At least one specific rule is required".to_string());
                }
                if rule.priority < 1 {
                    violations.push("Priority must be at least 1".to_string());
                }
            }
        }
        violations
    }

    /// Check the variant's invariants, reporting all of them at once.
    pub fn validate(&self) -> Result<()> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(RuleError::Invalid {
                kind: self.kind(),
                violations,
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }

    /// One-line human summary, used by listings.
    pub fn describe(&self) -> String {
        match self {
            Rule::CoRun(rule) => format!("run together: {}", rule.tasks.join(", ")),
            Rule::SlotRestriction(rule) => format!(
                "group {} shares at least {} slot(s)",
                rule.group, rule.min_common_slots
            ),
            Rule::LoadLimit(rule) => format!(
                "group {} takes at most {} slot(s) per phase",
                rule.group, rule.max_slots_per_phase
            ),
            Rule::PhaseWindow(rule) => {
                let phases: Vec<String> = rule
                    .allowed_phases
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                format!("task {} only in phase(s) {}", rule.task, phases.join(", "))
            }
            Rule::PatternMatch(rule) => {
                format!("/{}/ applies template {}", rule.regex, rule.template)
            }
            Rule::PrecedenceOverride(rule) => format!(
                "[{}] over [{}] at priority {}",
                rule.specific.join(", "),
                rule.global.join(", "),
                rule.priority
            ),
        }
    }
}

impl From<CoRunRule> for Rule {
    fn from(rule: CoRunRule) -> Self {
        Rule::CoRun(rule)
    }
}

impl From<SlotRestrictionRule> for Rule {
    fn from(rule: SlotRestrictionRule) -> Self {
        Rule::SlotRestriction(rule)
    }
}

impl From<LoadLimitRule> for Rule {
    fn from(rule: LoadLimitRule) -> Self {
        Rule::LoadLimit(rule)
    }
}

impl From<PhaseWindowRule> for Rule {
    fn from(rule: PhaseWindowRule) -> Self {
        Rule::PhaseWindow(rule)
    }
}

impl From<PatternMatchRule> for Rule {
    fn from(rule: PatternMatchRule) -> Self {
        Rule::PatternMatch(rule)
    }
}

impl From<PrecedenceOverrideRule> for Rule {
    fn from(rule: PrecedenceOverrideRule) -> Self {
        Rule::PrecedenceOverride(rule)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// regex errors render multi-line diagrams; keep the summary line.
fn first_line(error: &regex::Error) -> String {
    let text = error.to_string();
    text.lines()
        .rev()
        .find(|line| line.starts_with("error:"))
        .map(|line| line.trim_start_matches("error:").trim().to_string())
        .unwrap_or(text)
}
