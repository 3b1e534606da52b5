//! Fuzzy word matching against lexicon keys.
//!
//! Similarity is normalized edit distance: `1 - d / max(len_a, len_b)`.
//! Single-word keys are compared word-to-word; multi-word keys are skipped
//! by the fuzzy pass (the exact containment pass handles phrases).

/// Levenshtein edit distance, two-row variant.
pub fn edit_distance(a: &str, b: &str) -> u32 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n as u32;
    }
    if n == 0 {
        return m as u32;
    }

    let mut prev: Vec<u32> = (0..=n as u32).collect();
    let mut curr = vec![0u32; n + 1];

    for (i, &a_ch) in a_chars.iter().enumerate() {
        curr[0] = (i + 1) as u32;
        for (j, &b_ch) in b_chars.iter().enumerate() {
            let cost = if a_ch == b_ch { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized similarity in [0,1]; 1.0 means identical.
pub fn similarity(a: &str, b: &str) -> f32 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f32 / max_len as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_distance_basic() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", "abc"), 0);
        assert_eq!(edit_distance("kolestrol", "kolesterol"), 1);
    }

    #[test]
    fn similarity_single_edit_long_word() {
        // One edit on a 10-char word stays well above the 0.7 gate.
        assert!(similarity("kolesteril", "kolesterol") >= 0.9);
    }

    #[test]
    fn similarity_unrelated_words_low() {
        assert!(similarity("harga", "diabetes") < 0.5);
    }

    #[test]
    fn similarity_identical_is_one() {
        assert_eq!(similarity("maag", "maag"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }
}
