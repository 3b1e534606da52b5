//! Text normalization shared by the extractor and validator.

/// Lowercase, strip punctuation to spaces, collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Words of the normalized text.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|w| !w.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize_text("Diabates saya KAMBUH, kolestrol juga tinggi!"),
            "diabates saya kambuh kolestrol juga tinggi"
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_text("  halo   kak  "), "halo kak");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   ?!  "), "");
    }

    #[test]
    fn tokenize_splits_words() {
        let normalized = normalize_text("perut kembung terus");
        assert_eq!(tokenize(&normalized), vec!["perut", "kembung", "terus"]);
    }
}
