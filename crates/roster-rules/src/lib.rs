//! Business rule repository.
//!
//! [`RuleRepository`] keeps an ordered list of rules that all pass their
//! variant invariants. It writes the list to a [`KeyValueStore`] slot after
//! every change and reloads it on open.
//!
//! # Example
//!
//! ```ignore
//! use roster_model::{CoRunRule, Rule};
//! use roster_rules::{MemoryStore, RuleRepository};
//!
//! let mut repo = RuleRepository::open(MemoryStore::new())?;
//! repo.add(Rule::CoRun(CoRunRule { tasks: vec!["T1".into(), "T2".into()] }))?;
//! let json = repo.export_rules().to_json_pretty()?;
//! ```

pub mod candidate;
pub mod error;
pub mod repository;
pub mod store;
pub mod transfer;

pub use candidate::{
    RuleCandidate, RuleOrigin, RuleSuggester, SuggestionError, candidate_from_text,
    recommended_candidates,
};
pub use error::{ImportFailure, RepositoryError, Result, StoreError};
pub use repository::{RULES_SLOT, RuleRepository, SLOT_VERSION};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use transfer::{ExportMetadata, RuleExport, parse_import};
