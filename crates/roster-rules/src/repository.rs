//! The rule repository.
//!
//! Owns the ordered rule sequence and writes it to its store slot after every
//! successful mutation. The new sequence is persisted before it replaces the
//! in-memory one, so a failed write leaves both sides unchanged.

use roster_model::Rule;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::candidate::RuleCandidate;
use crate::error::{ImportFailure, RepositoryError, Result, StoreError};
use crate::store::KeyValueStore;
use crate::transfer::{RuleExport, parse_import};

/// Default store slot for the rule collection.
pub const RULES_SLOT: &str = "roster.rules";

/// Current schema version of the stored slot.
pub const SLOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct StoredRulesRef<'a> {
    version: u32,
    rules: &'a [Rule],
}

#[derive(Deserialize)]
struct StoredRules {
    version: u32,
    #[serde(default)]
    rules: Vec<Value>,
}

/// Ordered collection of valid rules backed by a key-value store.
#[derive(Debug)]
pub struct RuleRepository<S> {
    rules: Vec<Rule>,
    store: S,
    slot: String,
}

impl<S: KeyValueStore> RuleRepository<S> {
    /// Open the repository on the default slot, loading what it holds.
    pub fn open(store: S) -> Result<Self> {
        Self::open_slot(store, RULES_SLOT)
    }

    /// Open the repository on a named slot.
    ///
    /// Stored entries that no longer parse or validate are dropped with a
    /// warning; an unreadable slot is an error.
    pub fn open_slot(store: S, slot: impl Into<String>) -> Result<Self> {
        let slot = slot.into();
        let rules = match store.get(&slot)? {
            Some(content) => decode_slot(&slot, &content)?,
            None => Vec::new(),
        };
        tracing::debug!(slot = %slot, count = rules.len(), "Loaded rules");
        Ok(Self { rules, store, slot })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Validate `rule` and append it.
    pub fn add(&mut self, rule: Rule) -> Result<()> {
        rule.validate()?;
        let kind = rule.kind();
        let mut next = self.rules.clone();
        next.push(rule);
        self.commit(next)?;
        tracing::info!(kind = %kind, index = self.rules.len() - 1, "Added rule");
        Ok(())
    }

    /// Add a rule produced by manual entry or an external service.
    pub fn accept_candidate(&mut self, candidate: RuleCandidate) -> Result<()> {
        let origin = candidate.origin;
        let kind = candidate.rule.kind();
        if let Err(error) = self.add(candidate.rule) {
            tracing::warn!(origin = origin.label(), kind = %kind, "Rejected candidate rule: {error}");
            return Err(error);
        }
        Ok(())
    }

    /// Validate `rule` and put it at `index`, returning the rule it replaced.
    pub fn update(&mut self, index: usize, rule: Rule) -> Result<Rule> {
        self.check_index(index)?;
        rule.validate()?;
        let mut next = self.rules.clone();
        let previous = std::mem::replace(&mut next[index], rule);
        self.commit(next)?;
        tracing::info!(index, kind = %self.rules[index].kind(), "Updated rule");
        Ok(previous)
    }

    /// Remove the rule at `index`. Remaining rules are not re-validated.
    pub fn delete(&mut self, index: usize) -> Result<Rule> {
        self.check_index(index)?;
        let mut next = self.rules.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        tracing::info!(index, kind = %removed.kind(), "Deleted rule");
        Ok(removed)
    }

    /// Remove every rule, returning how many were removed.
    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.rules.len();
        self.commit(Vec::new())?;
        tracing::info!(removed, "Cleared rules");
        Ok(removed)
    }

    /// Append a batch of rules, all or nothing.
    ///
    /// Every rule is validated before any is applied; one invalid rule rejects
    /// the whole batch.
    pub fn import_rules(&mut self, rules: Vec<Rule>) -> Result<usize> {
        let failures: Vec<ImportFailure> = rules
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| {
                let violations = rule.violations();
                (!violations.is_empty()).then(|| ImportFailure {
                    index,
                    kind: rule.kind(),
                    violations,
                })
            })
            .collect();

        if !failures.is_empty() {
            tracing::warn!(
                failed = failures.len(),
                total = rules.len(),
                "Rejected rule import"
            );
            return Err(RepositoryError::ImportRejected {
                failed: failures.len(),
                total: rules.len(),
                failures,
            });
        }

        let imported = rules.len();
        let mut next = self.rules.clone();
        next.extend(rules);
        self.commit(next)?;
        tracing::info!(imported, "Imported rules");
        Ok(imported)
    }

    /// Import from JSON: an export document or a bare array of rules.
    pub fn import_json(&mut self, text: &str) -> Result<usize> {
        let rules = parse_import(text).map_err(|source| RepositoryError::MalformedImport { source })?;
        self.import_rules(rules)
    }

    /// Snapshot the current rules with export metadata.
    pub fn export_rules(&self) -> RuleExport {
        RuleExport::new(self.rules.clone())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.rules.len() {
            return Err(RepositoryError::IndexOutOfRange {
                index,
                len: self.rules.len(),
            });
        }
        Ok(())
    }

    fn commit(&mut self, next: Vec<Rule>) -> Result<()> {
        let content = serde_json::to_string(&StoredRulesRef {
            version: SLOT_VERSION,
            rules: &next,
        })
        .map_err(|source| StoreError::Serialization { source })?;
        self.store.set(&self.slot, &content)?;
        self.rules = next;
        Ok(())
    }
}

fn decode_slot(slot: &str, content: &str) -> std::result::Result<Vec<Rule>, StoreError> {
    let stored: StoredRules = serde_json::from_str(content).map_err(|source| StoreError::Corrupt {
        key: slot.to_string(),
        source,
    })?;

    if stored.version > SLOT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: stored.version,
            max_supported: SLOT_VERSION,
        });
    }

    let mut rules = Vec::with_capacity(stored.rules.len());
    for (index, value) in stored.rules.into_iter().enumerate() {
        match serde_json::from_value::<Rule>(value) {
            Ok(rule) => match rule.validate() {
                Ok(()) => rules.push(rule),
                Err(error) => {
                    tracing::warn!(slot, index, "Dropping stored rule: {error}");
                }
            },
            Err(error) => {
                tracing::warn!(slot, index, "Dropping unreadable stored rule: {error}");
            }
        }
    }
    Ok(rules)
}
