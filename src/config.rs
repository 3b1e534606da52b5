use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Tokosehat";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Extraction ──────────────────────────────────────────────

/// Minimum word length considered by the fuzzy pass.
pub const FUZZY_MIN_WORD_LEN: usize = 4;
/// Normalized edit-distance similarity gate for fuzzy matches.
pub const FUZZY_MIN_SIMILARITY: f32 = 0.7;

// ── Scoring ─────────────────────────────────────────────────

/// Recommendations below this relevance are dropped before ranking.
pub const MIN_RELEVANCE_THRESHOLD: f32 = 0.2;
/// Out-of-stock products keep a tenth of their score so "notify when back
/// in stock" flows keep a stable ranking.
pub const OUT_OF_STOCK_PENALTY: f32 = 0.1;
/// How many recommendations are fed to the generator and kept on the
/// conversation for "that product" reference resolution.
pub const TOP_K_RECOMMENDATIONS: usize = 5;

// ── Validation ──────────────────────────────────────────────

/// Query/reply content-word overlap below this flags an irrelevant reply.
pub const MIN_QUERY_OVERLAP: f32 = 0.2;
/// A reply passes only above this post-deduction confidence.
pub const VALIDATION_PASS_CONFIDENCE: f32 = 0.5;
/// Replies naming more than this many products indicate context bleeding.
pub const MAX_PRODUCTS_PER_REPLY: usize = 2;
/// A reply greeting the customer after this many prior turns reads as the
/// assistant losing the thread.
pub const RESTART_GREETING_TURNS: usize = 2;

// ── Conversation ────────────────────────────────────────────

/// Idle conversations expire from the store after this long.
pub const CONVERSATION_TTL: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

// ── Environment ─────────────────────────────────────────────

pub const ENV_GENERATION_URL: &str = "TOKOSEHAT_GENERATION_URL";
pub const ENV_GENERATION_MODEL: &str = "TOKOSEHAT_GENERATION_MODEL";
pub const ENV_GENERATION_KEY: &str = "TOKOSEHAT_GENERATION_KEY";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "info,tokosehat=debug".to_string()
}

/// Application data directory (~/Tokosehat/), holds the optional lexicon
/// override file.
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Optional user lexicon override (merged over the built-in data at startup).
pub fn lexicon_override_path() -> PathBuf {
    app_data_dir().join("lexicon.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with(APP_NAME));
    }

    #[test]
    fn lexicon_override_under_app_data() {
        assert!(lexicon_override_path().starts_with(app_data_dir()));
    }

    #[test]
    fn thresholds_are_fractions() {
        assert!((0.0..=1.0).contains(&MIN_RELEVANCE_THRESHOLD));
        assert!((0.0..=1.0).contains(&FUZZY_MIN_SIMILARITY));
        assert!((0.0..=1.0).contains(&VALIDATION_PASS_CONFIDENCE));
    }
}
