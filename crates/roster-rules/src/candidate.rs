//! Candidate rules and the external suggestion boundary.
//!
//! Rules reach the repository either from manual entry or from an external
//! service (rule recommendations, natural-language parsing). The service is an
//! async capability injected by the caller; whatever it returns is only a
//! candidate and goes through the same validation gate as a hand-written rule.

use std::future::Future;

use roster_model::{DatasetSet, Rule};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a candidate rule came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleOrigin {
    #[default]
    Manual,
    Suggestion,
    NaturalLanguage,
}

impl RuleOrigin {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Suggestion => "suggestion",
            Self::NaturalLanguage => "natural language",
        }
    }
}

/// A rule awaiting validation, tagged with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCandidate {
    pub rule: Rule,
    pub origin: RuleOrigin,
}

impl RuleCandidate {
    pub fn manual(rule: Rule) -> Self {
        Self {
            rule,
            origin: RuleOrigin::Manual,
        }
    }

    pub fn suggested(rule: Rule) -> Self {
        Self {
            rule,
            origin: RuleOrigin::Suggestion,
        }
    }

    pub fn from_natural_language(rule: Rule) -> Self {
        Self {
            rule,
            origin: RuleOrigin::NaturalLanguage,
        }
    }
}

/// Structured failure from a suggestion service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    #[error("suggestion service unavailable: {0}")]
    Unavailable(String),

    #[error("could not interpret request: {reason}")]
    Unrecognized { reason: String },

    #[error("suggestion service returned a malformed rule: {0}")]
    Malformed(String),
}

/// External rule suggestion/parsing capability.
pub trait RuleSuggester {
    /// Interpret a free-text request as a single rule.
    fn parse(&self, request: &str) -> impl Future<Output = Result<Rule, SuggestionError>> + Send;

    /// Propose rules that fit the loaded datasets.
    fn recommend(
        &self,
        datasets: &DatasetSet,
    ) -> impl Future<Output = Result<Vec<Rule>, SuggestionError>> + Send;
}

/// Ask `suggester` to parse `request` and wrap the result as a candidate.
pub async fn candidate_from_text<S: RuleSuggester>(
    suggester: &S,
    request: &str,
) -> Result<RuleCandidate, SuggestionError> {
    let rule = suggester.parse(request).await?;
    tracing::debug!(kind = %rule.kind(), "Parsed candidate rule");
    Ok(RuleCandidate::from_natural_language(rule))
}

/// Ask `suggester` for recommendations and wrap each as a candidate.
pub async fn recommended_candidates<S: RuleSuggester>(
    suggester: &S,
    datasets: &DatasetSet,
) -> Result<Vec<RuleCandidate>, SuggestionError> {
    let rules = suggester.recommend(datasets).await?;
    tracing::debug!(count = rules.len(), "Received rule recommendations");
    Ok(rules.into_iter().map(RuleCandidate::suggested).collect())
}
