use std::sync::LazyLock;

use regex::Regex;

use crate::models::Product;
use crate::validation::MentionError;

/// A catalog product named in a generated reply, with any price the reply
/// stated near the mention.
#[derive(Debug, Clone)]
pub struct ProductMention<'a> {
    pub product: &'a Product,
    pub stated_price: Option<u64>,
}

/// How far past a product name to look for a stated price, in characters.
const PRICE_WINDOW_CHARS: usize = 80;

static RP_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rp\s*\.?\s*([0-9][0-9.,]*)").expect("invalid rupiah price pattern")
});
static SHORTHAND_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([0-9]+)\s*(rb|ribu|jt|juta)\b").expect("invalid shorthand price pattern")
});
static GROUPED_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9]{1,3}(?:\.[0-9]{3})+)\b").expect("invalid grouped price pattern")
});
static BARE_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{4,})\b").expect("invalid bare price pattern"));
static PRICE_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(harga\w*|seharga|biaya|tarif|total\w*)\b").expect("invalid price cue pattern")
});

/// Scan `reply` for catalog products, alias-aware and case-insensitive.
/// Mentions are returned in order of first appearance, one per product.
pub fn extract_mentions<'a>(
    reply: &str,
    catalog: &'a [Product],
) -> Result<Vec<ProductMention<'a>>, MentionError> {
    let lower = reply.to_lowercase();
    let mut found: Vec<(usize, ProductMention<'a>)> = Vec::new();

    for product in catalog {
        let mut earliest: Option<usize> = None;
        for name in product.known_names() {
            if let Some(pos) = find_on_boundary(&lower, &name) {
                earliest = Some(earliest.map_or(pos, |e| e.min(pos)));
            }
        }
        if let Some(pos) = earliest {
            let window: String = lower[pos..].chars().take(PRICE_WINDOW_CHARS).collect();
            let stated_price = first_price_in(&window)?;
            found.push((pos, ProductMention { product, stated_price }));
        }
    }

    found.sort_by_key(|(pos, _)| *pos);
    Ok(found.into_iter().map(|(_, m)| m).collect())
}

/// Parse the first price expression in `text` as whole rupiah.
/// Understands "Rp 150.000", "150rb" / "150 ribu", "2jt", and thousands-
/// grouped digit runs. A bare ungrouped run only counts when a price cue
/// word is nearby, so order numbers and years stay out.
pub fn first_price_in(text: &str) -> Result<Option<u64>, MentionError> {
    if let Some(caps) = RP_PRICE.captures(text) {
        let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
        return parse_rupiah(&digits).map(Some);
    }
    if let Some(caps) = SHORTHAND_PRICE.captures(text) {
        let base = parse_rupiah(&caps[1])?;
        let multiplier = match caps[2].to_lowercase().as_str() {
            "rb" | "ribu" => 1_000,
            _ => 1_000_000,
        };
        return base
            .checked_mul(multiplier)
            .map(Some)
            .ok_or_else(|| MentionError::Price(text.to_string()));
    }
    if let Some(caps) = GROUPED_PRICE.captures(text) {
        let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
        return parse_rupiah(&digits).map(Some);
    }
    if PRICE_CUE.is_match(text) {
        if let Some(caps) = BARE_PRICE.captures(text) {
            return parse_rupiah(&caps[1]).map(Some);
        }
    }
    Ok(None)
}

fn parse_rupiah(digits: &str) -> Result<u64, MentionError> {
    digits
        .parse::<u64>()
        .map_err(|_| MentionError::Price(digits.to_string()))
}

/// Substring search that only accepts matches on word boundaries, so the
/// product alias "mag" never matches inside "magang".
fn find_on_boundary(haystack: &str, needle: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(rel) = haystack[from..].find(needle) {
        let pos = from + rel;
        let before_ok = haystack[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[pos + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return Some(pos);
        }
        from = pos + needle.len();
    }
    None
}
