//! Response Validator: the gate between the generator and the customer.
//!
//! Every generated reply is checked against the catalog, the turn's
//! recommendations, and the conversation so far. A reply that fails never goes out; the pipeline swaps
//! in a safe fallback and, for critical findings, escalates.

pub mod mentions;
pub mod types;
pub mod validator;

use thiserror::Error;

pub use mentions::{extract_mentions, ProductMention};
pub use types::{IssueKind, IssueSeverity, ValidationIssue, ValidationResult};
pub use validator::ResponseValidator;

/// Internal mention-scan failures. Callers never see these; the validator
/// converts them into a critical, escalating verdict.
#[derive(Debug, Error)]
pub enum MentionError {
    #[error("unparseable price expression '{0}'")]
    Price(String),
}
