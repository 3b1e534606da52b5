//! Tokosehat: conversational commerce core for an Indonesian health shop.
//!
//! One customer message goes through extraction (free text to canonical
//! health terms), scoring (catalog products against the complaint),
//! generation (draft reply from an LLM backend), validation (the draft
//! against the catalog), and either goes out, falls back, or is escalated
//! to a human agent. See [`pipeline::ConversationPipeline`].

pub mod config;
pub mod conversation;
pub mod escalation;
pub mod extraction;
pub mod generation;
pub mod lexicon;
pub mod models;
pub mod pipeline;
pub mod scoring;
pub mod validation;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from RUST_LOG, falling back to the crate default.
/// Call once at process start; embedding hosts that own their subscriber
/// should skip this.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
