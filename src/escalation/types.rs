use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::ValidationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationReason {
    /// A generated reply failed validation with a critical finding.
    ValidationFailure,
    /// The customer explicitly asked for a human.
    HumanRequested,
    /// Severe, worsening complaint beyond supplement advice.
    SevereComplaint,
    /// The customer sounds frustrated across multiple turns.
    RepeatedFrustration,
    /// The customer wants to start over after an invested conversation.
    ConversationRestart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Queue lifecycle of an escalation. Records always enter as `Pending`;
/// `Sent` and `Resolved` are set by whoever drains the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationStatus {
    Pending,
    Sent,
    Resolved,
}

/// One hand-off to a human agent, with enough context to pick the
/// conversation up cold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationRecord {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub customer_id: String,
    pub reason: EscalationReason,
    pub severity: EscalationSeverity,
    /// The customer message that triggered the hand-off.
    pub user_query: String,
    /// The generated reply that was withheld, when one exists.
    pub ai_response: Option<String>,
    /// Validator confidence for the withheld reply.
    pub validation_confidence: Option<f32>,
    /// One line per validation finding.
    pub validation_issues: Vec<String>,
    /// Last few turns, oldest first, rendered for the agent.
    pub recent_history: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub status: EscalationStatus,
    /// Stamped by the router when the record is enqueued.
    pub within_business_hours: bool,
}

impl EscalationRecord {
    pub fn new(
        conversation_id: Uuid,
        customer_id: impl Into<String>,
        reason: EscalationReason,
        severity: EscalationSeverity,
        user_query: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            customer_id: customer_id.into(),
            reason,
            severity,
            user_query: user_query.into(),
            ai_response: None,
            validation_confidence: None,
            validation_issues: Vec::new(),
            recent_history: Vec::new(),
            created_at: Utc::now(),
            status: EscalationStatus::Pending,
            within_business_hours: false,
        }
    }

    /// Attach the withheld reply and its validation verdict.
    pub fn with_rejected_reply(mut self, reply: impl Into<String>, validation: &ValidationResult) -> Self {
        self.ai_response = Some(reply.into());
        self.validation_confidence = Some(validation.confidence);
        self.validation_issues = validation.issue_summaries();
        self
    }

    pub fn with_history(mut self, recent_history: Vec<String>) -> Self {
        self.recent_history = recent_history;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{IssueKind, IssueSeverity, ValidationIssue};

    #[test]
    fn new_records_start_pending() {
        let record = EscalationRecord::new(
            Uuid::new_v4(),
            "cust-1",
            EscalationReason::HumanRequested,
            EscalationSeverity::High,
            "mau bicara dengan orang",
        );
        assert_eq!(record.status, EscalationStatus::Pending);
        assert!(record.ai_response.is_none());
    }

    #[test]
    fn rejected_reply_carries_validation_detail() {
        let verdict = ValidationResult::from_issues(vec![ValidationIssue::new(
            IssueKind::WrongProduct,
            IssueSeverity::Critical,
            "off-recommendation product",
        )]);
        let record = EscalationRecord::new(
            Uuid::new_v4(),
            "cust-1",
            EscalationReason::ValidationFailure,
            EscalationSeverity::Critical,
            "diabetes saya kambuh",
        )
        .with_rejected_reply("coba superfood", &verdict);
        assert_eq!(record.ai_response.as_deref(), Some("coba superfood"));
        assert!((record.validation_confidence.unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(record.validation_issues.len(), 1);
    }

    #[test]
    fn severity_ordering() {
        assert!(EscalationSeverity::High < EscalationSeverity::Critical);
    }
}
