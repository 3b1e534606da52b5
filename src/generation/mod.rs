//! Generative text backend: trait seam plus a blocking HTTP client for an
//! Ollama-compatible endpoint.

pub mod client;
pub mod prompt;

use thiserror::Error;

pub use client::HttpGenerationClient;
pub use prompt::{build_turn_prompt, system_prompt};

/// One draft reply from the backend. Token usage is reported when the
/// backend exposes it, for cost logging only.
#[derive(Debug, Clone)]
pub struct GeneratedReply {
    pub text: String,
    pub tokens_used: Option<u32>,
}

impl GeneratedReply {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens_used: None,
        }
    }
}

/// Produces the draft reply text for a turn. The pipeline only ever sees
/// this trait; tests substitute a canned implementation.
pub trait GenerativeTextService {
    fn generate(&self, system: &str, prompt: &str) -> Result<GeneratedReply, GenerationError>;
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("cannot reach generation backend at {0}")]
    Connection(String),

    #[error("generation request timed out after {0}s")]
    Timeout(u64),

    #[error("generation backend is rate limiting requests")]
    RateLimited,

    #[error("generation backend rejected our credentials")]
    Auth,

    #[error("generation backend returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("cannot parse generation response: {0}")]
    ResponseParsing(String),
}

impl GenerationError {
    /// Transient failures are worth a "try again shortly" reply; the rest
    /// indicate misconfiguration and should surface as errors.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Timeout(_) | Self::RateLimited | Self::Api { .. }
        )
    }
}
