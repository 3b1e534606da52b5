use serde::{Deserialize, Serialize};

use crate::config::VALIDATION_PASS_CONFIDENCE;

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// Severity of a validation finding. Each tier carries a fixed confidence
/// deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IssueSeverity {
    pub fn deduction(&self) -> f32 {
        match self {
            Self::Low => 0.05,
            Self::Medium => 0.10,
            Self::High => 0.20,
            Self::Critical => 0.30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Reply recommends a real product that was not among the scored
    /// recommendations for this complaint.
    WrongProduct,
    /// Query and reply name non-empty product sets that disagree on the
    /// primary product.
    ProductMismatch,
    /// Reply opens with a greeting although the conversation is well past
    /// its opening turns.
    ConversationRestart,
    /// Reply shares almost no content words with the customer's message.
    IrrelevantResponse,
    /// Stated price matches no catalog price for the mentioned product.
    PriceInconsistency,
    /// The off-recommendation product sits in a different category than the
    /// top recommendation.
    CategoryMismatch,
    /// Reply names too many products, or drifts off the conversation's
    /// dominant product without the customer asking for a switch.
    ContextBleeding,
    /// Reply quotes a price but names no catalog product at all.
    UnknownProduct,
    /// Reply pushes a product the catalog says is out of stock.
    OutOfStockRecommended,
    /// Reply shape does not match what the customer asked for.
    IntentMismatch,
    /// Reply makes a curative or guaranteed-outcome claim.
    OverClaim,
    /// The validator itself failed; the reply is unverified.
    ValidatorFault,
}

impl IssueKind {
    /// Kinds whose critical findings force escalation on their own.
    fn escalates_alone(&self) -> bool {
        matches!(
            self,
            Self::WrongProduct | Self::ProductMismatch | Self::ConversationRestart | Self::ValidatorFault
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub detail: String,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, severity: IssueSeverity, detail: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            detail: detail.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Verdict on one generated reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// 1.0 minus the summed deductions, floored at 0.
    pub confidence: f32,
    pub issues: Vec<ValidationIssue>,
    pub should_escalate: bool,
}

impl ValidationResult {
    /// Fold a list of findings into a verdict. Escalation fires on a
    /// critical product/restart finding, on two critical findings of any
    /// kind, or on three high-severity findings.
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let deduction: f32 = issues.iter().map(|i| i.severity.deduction()).sum();
        let confidence = (1.0 - deduction).max(0.0);

        let criticals = issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Critical)
            .count();
        let highs = issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::High)
            .count();
        let critical_product_or_restart = issues.iter().any(|i| {
            i.severity == IssueSeverity::Critical && i.kind.escalates_alone()
        });

        let should_escalate = critical_product_or_restart || criticals >= 2 || highs >= 3;
        Self {
            is_valid: confidence > VALIDATION_PASS_CONFIDENCE && !should_escalate,
            confidence,
            issues,
            should_escalate,
        }
    }

    /// Verdict for a reply the validator could not examine. Always invalid
    /// and always escalated; unverified text never reaches the customer.
    pub fn fault(detail: impl Into<String>) -> Self {
        Self::from_issues(vec![ValidationIssue::new(
            IssueKind::ValidatorFault,
            IssueSeverity::Critical,
            detail,
        )])
    }

    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    /// One-line renderings of the issues, for escalation records.
    pub fn issue_summaries(&self) -> Vec<String> {
        self.issues
            .iter()
            .map(|i| format!("{:?}/{:?}: {}", i.severity, i.kind, i.detail))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_reply_is_valid() {
        let result = ValidationResult::from_issues(vec![]);
        assert!(result.is_valid);
        assert_eq!(result.confidence, 1.0);
        assert!(!result.should_escalate);
    }

    #[test]
    fn critical_issue_deducts_exactly_thirty_points() {
        let result = ValidationResult::from_issues(vec![ValidationIssue::new(
            IssueKind::WrongProduct,
            IssueSeverity::Critical,
            "x",
        )]);
        assert!((result.confidence - 0.7).abs() < 1e-6);
        assert!(!result.is_valid);
        assert!(result.should_escalate);
    }

    #[test]
    fn single_critical_of_other_kind_fails_but_does_not_escalate() {
        let result = ValidationResult::from_issues(vec![ValidationIssue::new(
            IssueKind::OverClaim,
            IssueSeverity::Critical,
            "x",
        )]);
        assert!(!result.is_valid);
        assert!(!result.should_escalate);
    }

    #[test]
    fn two_criticals_escalate() {
        let issues = vec![
            ValidationIssue::new(IssueKind::OverClaim, IssueSeverity::Critical, "a"),
            ValidationIssue::new(IssueKind::OutOfStockRecommended, IssueSeverity::Critical, "b"),
        ];
        assert!(ValidationResult::from_issues(issues).should_escalate);
    }

    #[test]
    fn three_highs_escalate() {
        let issues = (0..3)
            .map(|i| {
                ValidationIssue::new(IssueKind::IrrelevantResponse, IssueSeverity::High, format!("{i}"))
            })
            .collect();
        assert!(ValidationResult::from_issues(issues).should_escalate);
    }

    #[test]
    fn stacked_minor_issues_fail_below_threshold_without_escalating() {
        let issues = (0..6)
            .map(|i| {
                ValidationIssue::new(IssueKind::IntentMismatch, IssueSeverity::Medium, format!("{i}"))
            })
            .collect();
        let result = ValidationResult::from_issues(issues);
        assert!((result.confidence - 0.4).abs() < 1e-6);
        assert!(!result.is_valid);
        assert!(!result.should_escalate);
    }

    #[test]
    fn confidence_never_goes_negative() {
        let issues = (0..10)
            .map(|_| ValidationIssue::new(IssueKind::OverClaim, IssueSeverity::High, "x"))
            .collect();
        let result = ValidationResult::from_issues(issues);
        assert_eq!(result.confidence, 0.0);
        assert!(result.should_escalate);
    }

    #[test]
    fn fault_is_critical_and_escalated() {
        let result = ValidationResult::fault("regex");
        assert!(!result.is_valid);
        assert!(result.should_escalate);
        assert!(result.has_issue(IssueKind::ValidatorFault));
    }

    #[test]
    fn critical_restart_escalates_alone() {
        let result = ValidationResult::from_issues(vec![ValidationIssue::new(
            IssueKind::ConversationRestart,
            IssueSeverity::Critical,
            "x",
        )]);
        assert!(result.should_escalate);
    }
}
