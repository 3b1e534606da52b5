//! Temporal context: three independent keyword-family scans over the
//! normalized message. First match wins per family; default Unknown.

use super::types::{SymptomDuration, SymptomFrequency, SymptomProgression, TemporalContext};

static ACUTE_KEYWORDS: &[&str] = &[
    "baru saja", "barusan", "tadi", "hari ini", "mendadak", "tiba tiba",
    "semalam", "just started", "suddenly", "since this morning",
];

static SUBACUTE_KEYWORDS: &[&str] = &[
    "beberapa hari", "seminggu", "minggu ini", "sejak kemarin",
    "few days", "this week", "past week",
];

static CHRONIC_KEYWORDS: &[&str] = &[
    "sudah lama", "bertahun", "berbulan", "kronis", "menahun", "dari dulu",
    "chronic", "for years", "for months",
];

static OCCASIONAL_KEYWORDS: &[&str] = &[
    "kadang", "kadang kadang", "sesekali", "sometimes", "occasionally",
];

static FREQUENT_KEYWORDS: &[&str] = &["sering", "kerap", "often", "frequently"];

static CONSTANT_KEYWORDS: &[&str] = &[
    "terus", "terus menerus", "setiap hari", "tiap hari", "selalu", "nonstop",
    "constant", "every day", "all the time",
];

static IMPROVING_KEYWORDS: &[&str] = &[
    "membaik", "mendingan", "sudah enakan", "berkurang", "better", "improving",
];

static WORSENING_KEYWORDS: &[&str] = &[
    "memburuk", "makin parah", "tambah parah", "makin sakit", "kambuh",
    "worse", "getting worse",
];

static STABLE_KEYWORDS: &[&str] = &["stabil", "sama saja", "begitu begitu", "stable", "no change"];

fn first_match<T: Copy>(text: &str, families: &[(&[&str], T)], default: T) -> T {
    for (keywords, value) in families {
        if keywords.iter().any(|k| text.contains(k)) {
            return *value;
        }
    }
    default
}

/// Scan the normalized message for temporal signals.
pub fn extract_temporal(normalized: &str) -> TemporalContext {
    TemporalContext {
        duration: first_match(
            normalized,
            &[
                (ACUTE_KEYWORDS, SymptomDuration::Acute),
                (SUBACUTE_KEYWORDS, SymptomDuration::Subacute),
                (CHRONIC_KEYWORDS, SymptomDuration::Chronic),
            ],
            SymptomDuration::Unknown,
        ),
        frequency: first_match(
            normalized,
            &[
                // Constant before frequent: "terus menerus" contains "terus".
                (CONSTANT_KEYWORDS, SymptomFrequency::Constant),
                (FREQUENT_KEYWORDS, SymptomFrequency::Frequent),
                (OCCASIONAL_KEYWORDS, SymptomFrequency::Occasional),
            ],
            SymptomFrequency::Unknown,
        ),
        progression: first_match(
            normalized,
            &[
                (WORSENING_KEYWORDS, SymptomProgression::Worsening),
                (IMPROVING_KEYWORDS, SymptomProgression::Improving),
                (STABLE_KEYWORDS, SymptomProgression::Stable),
            ],
            SymptomProgression::Unknown,
        ),
    }
}
