//! Escalation Router: hands conversations to human agents.
//!
//! Every escalation lands in the queue immediately; agent pings are
//! best-effort, business-hours only, and never block the customer reply.

pub mod fallback;
pub mod hours;
pub mod router;
pub mod types;

use thiserror::Error;

pub use fallback::{escalation_reply, fallback_reply, FallbackKind};
pub use hours::{BusinessHoursOracle, FixedBusinessHours, HoursStatus};
pub use router::{
    detect_trigger, EscalationQueue, EscalationRouter, EscalationTrigger, InMemoryEscalationQueue,
    LogNotificationChannel, NotificationChannel, RoutedEscalation,
};
pub use types::{EscalationReason, EscalationRecord, EscalationSeverity, EscalationStatus};

#[derive(Debug, Error)]
pub enum EscalationError {
    #[error("escalation queue unavailable: {0}")]
    Queue(String),

    #[error("agent notification failed: {0}")]
    Notify(String),
}
