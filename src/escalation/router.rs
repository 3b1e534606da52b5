use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::conversation::ConversationContext;
use crate::extraction::{contains_phrase, normalize_text, ExtractedHealthData};
use crate::scoring::{derive_urgency, UrgencyLevel};

use super::hours::BusinessHoursOracle;
use super::types::{EscalationReason, EscalationRecord, EscalationSeverity};
use super::EscalationError;

/// What the router did with an escalation: the stored record, plus the next
/// desk opening when the record landed outside business hours.
#[derive(Debug, Clone)]
pub struct RoutedEscalation {
    pub record: EscalationRecord,
    pub next_open: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// Prior customer turns above which a restart request means losing an
/// invested conversation.
const RESTART_INVESTED_TURNS: usize = 6;

const HUMAN_MARKERS: &[&str] = &[
    "customer service",
    "bicara dengan orang",
    "bicara sama orang",
    "dengan admin",
    "sama admin",
    "sama manusia",
    "komplain",
];

const FRUSTRATION_MARKERS: &[&str] = &[
    "kesal",
    "kecewa",
    "tidak membantu",
    "gak membantu",
    "tidak nyambung",
    "gak nyambung",
    "percuma",
    "muter muter",
];

const RESTART_MARKERS: &[&str] = &["dari awal", "mulai ulang", "ulang dari awal", "reset"];

// ---------------------------------------------------------------------------
// Trigger detection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscalationTrigger {
    pub reason: EscalationReason,
    pub severity: EscalationSeverity,
}

/// Decide whether this customer message must go to a human, before any
/// reply is generated. Returns the strongest applicable trigger.
pub fn detect_trigger(
    message: &str,
    extracted: &ExtractedHealthData,
    context: &ConversationContext,
) -> Option<EscalationTrigger> {
    let normalized = normalize_text(message);
    let has = |markers: &[&str]| markers.iter().any(|m| contains_phrase(&normalized, m));

    match derive_urgency(extracted) {
        UrgencyLevel::Emergency => {
            return Some(EscalationTrigger {
                reason: EscalationReason::SevereComplaint,
                severity: EscalationSeverity::Critical,
            });
        }
        UrgencyLevel::Urgent => {
            return Some(EscalationTrigger {
                reason: EscalationReason::SevereComplaint,
                severity: EscalationSeverity::High,
            });
        }
        _ => {}
    }

    if has(HUMAN_MARKERS) {
        return Some(EscalationTrigger {
            reason: EscalationReason::HumanRequested,
            severity: EscalationSeverity::High,
        });
    }

    if has(RESTART_MARKERS) {
        let severity = if context.customer_turn_count() > RESTART_INVESTED_TURNS {
            EscalationSeverity::Critical
        } else {
            EscalationSeverity::High
        };
        return Some(EscalationTrigger {
            reason: EscalationReason::ConversationRestart,
            severity,
        });
    }

    if has(FRUSTRATION_MARKERS) {
        let prior_frustration = context
            .recent_customer_texts(10)
            .iter()
            .any(|t| {
                let n = normalize_text(t);
                FRUSTRATION_MARKERS.iter().any(|m| contains_phrase(&n, m))
            });
        if prior_frustration {
            return Some(EscalationTrigger {
                reason: EscalationReason::RepeatedFrustration,
                severity: EscalationSeverity::High,
            });
        }
    }

    None
}

// ---------------------------------------------------------------------------
// Queue and notification seams
// ---------------------------------------------------------------------------

pub trait EscalationQueue: Send + Sync {
    fn enqueue(&self, record: EscalationRecord) -> Result<(), EscalationError>;
}

pub trait NotificationChannel: Send + Sync {
    fn notify(&self, record: &EscalationRecord) -> Result<(), EscalationError>;
}

/// Mutex-guarded queue, the default for single-process deployments and
/// for tests.
#[derive(Debug, Default)]
pub struct InMemoryEscalationQueue {
    inner: Mutex<Vec<EscalationRecord>>,
}

impl InMemoryEscalationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Vec<EscalationRecord> {
        self.inner.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl EscalationQueue for InMemoryEscalationQueue {
    fn enqueue(&self, record: EscalationRecord) -> Result<(), EscalationError> {
        let mut queue = self
            .inner
            .lock()
            .map_err(|e| EscalationError::Queue(e.to_string()))?;
        queue.push(record);
        Ok(())
    }
}

/// Notification backend that only writes to the log. Stands in when no
/// agent channel is wired up.
#[derive(Debug, Default)]
pub struct LogNotificationChannel;

impl NotificationChannel for LogNotificationChannel {
    fn notify(&self, record: &EscalationRecord) -> Result<(), EscalationError> {
        info!(
            escalation = %record.id,
            customer = %record.customer_id,
            reason = ?record.reason,
            severity = ?record.severity,
            "agent notification"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Hands conversations to humans. Every escalation is queued; the agent
/// ping only goes out during business hours and never delays the customer
/// reply or fails the turn.
pub struct EscalationRouter {
    queue: Arc<dyn EscalationQueue>,
    channel: Arc<dyn NotificationChannel>,
    hours: Arc<dyn BusinessHoursOracle + Send + Sync>,
}

impl EscalationRouter {
    pub fn new(
        queue: Arc<dyn EscalationQueue>,
        channel: Arc<dyn NotificationChannel>,
        hours: Arc<dyn BusinessHoursOracle + Send + Sync>,
    ) -> Self {
        Self { queue, channel, hours }
    }

    pub fn escalate(&self, record: EscalationRecord) -> Result<RoutedEscalation, EscalationError> {
        self.escalate_at(record, Utc::now())
    }

    /// Queue the record and, when agents are on shift at `now`, ping them
    /// from a detached thread.
    pub fn escalate_at(
        &self,
        mut record: EscalationRecord,
        now: DateTime<Utc>,
    ) -> Result<RoutedEscalation, EscalationError> {
        let hours = self.hours.status(now);
        record.within_business_hours = hours.is_open;

        self.queue.enqueue(record.clone())?;
        info!(
            escalation = %record.id,
            conversation = %record.conversation_id,
            reason = ?record.reason,
            severity = ?record.severity,
            within_hours = record.within_business_hours,
            "escalation queued"
        );

        if hours.is_open {
            let channel = Arc::clone(&self.channel);
            let pending = record.clone();
            std::thread::spawn(move || {
                if let Err(e) = channel.notify(&pending) {
                    warn!(escalation = %pending.id, error = %e, "agent notification failed");
                }
            });
        }

        Ok(RoutedEscalation {
            record,
            next_open: hours.next_open,
        })
    }
}
