use crate::extraction::{contains_phrase, normalize_text, ExtractedHealthData};

/// What the customer is trying to do this turn. Drives both the state
/// machine and the reply-intent check in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageIntent {
    Greeting,
    HealthComplaint,
    ProductInquiry,
    PriceInquiry,
    OrderRequest,
    Confirmation,
    Other,
}

const GREETING_MARKERS: &[&str] = &[
    "halo",
    "hai",
    "selamat pagi",
    "selamat siang",
    "selamat sore",
    "selamat malam",
    "assalamualaikum",
    "permisi",
];

const ORDER_MARKERS: &[&str] = &[
    "pesan",
    "mau pesan",
    "order",
    "beli",
    "mau beli",
    "ambil",
    "checkout",
    "kirim ke",
];

const CONFIRM_MARKERS: &[&str] = &["ya", "iya", "betul", "benar", "oke", "ok", "setuju", "jadi"];

const PRICE_MARKERS: &[&str] = &["harga", "berapa", "biaya", "diskon", "promo", "ongkir"];

const PRODUCT_MARKERS: &[&str] = &[
    "produk",
    "stok",
    "tersedia",
    "ready",
    "rekomendasi",
    "rasa",
    "varian",
    "kandungan",
    "komposisi",
    "aturan pakai",
];

/// Classify a customer message. Order markers outrank health signal so
/// "mau pesan yang tadi" places an order instead of reopening the inquiry;
/// health signal outranks product and price markers so a complaint that
/// also asks about price stays a complaint.
pub fn classify_intent(message: &str, extracted: &ExtractedHealthData) -> MessageIntent {
    let normalized = normalize_text(message);
    let has = |markers: &[&str]| markers.iter().any(|m| contains_phrase(&normalized, m));

    if has(ORDER_MARKERS) {
        return MessageIntent::OrderRequest;
    }
    if has(CONFIRM_MARKERS) && normalized.split_whitespace().count() <= 4 {
        return MessageIntent::Confirmation;
    }
    if !extracted.is_empty() {
        return MessageIntent::HealthComplaint;
    }
    if has(PRICE_MARKERS) {
        return MessageIntent::PriceInquiry;
    }
    if has(PRODUCT_MARKERS) {
        return MessageIntent::ProductInquiry;
    }
    if has(GREETING_MARKERS) {
        return MessageIntent::Greeting;
    }
    MessageIntent::Other
}
