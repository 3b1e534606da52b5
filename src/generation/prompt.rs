use std::fmt::Write;

use crate::config::MAX_PRODUCTS_PER_REPLY;
use crate::conversation::{ConversationContext, TurnRole};
use crate::models::Product;
use crate::scoring::ContextualRecommendation;

/// How many recent turns of history are quoted back to the generator.
const HISTORY_TURNS: usize = 6;

/// Persona and hard rules for the shop assistant. The rules mirror what
/// the validator enforces, so a well-behaved model rarely trips it.
pub fn system_prompt() -> String {
    format!(
        "Kamu adalah asisten toko kesehatan Tokosehat di WhatsApp. \
         Balas dalam bahasa Indonesia yang ramah dan singkat.\n\
         Aturan:\n\
         - Hanya sebutkan produk yang ada di daftar PRODUK, dengan harga persis seperti tertulis.\n\
         - Sebutkan paling banyak {MAX_PRODUCTS_PER_REPLY} produk dalam satu balasan.\n\
         - Jangan pernah mengklaim produk menyembuhkan penyakit; produk hanya membantu menjaga kesehatan.\n\
         - Untuk keluhan berat, sarankan pelanggan menemui dokter.\n\
         - Jangan sebutkan produk yang stoknya habis."
    )
}

/// Assemble the turn prompt: scored products, recent history, and the new
/// customer message.
pub fn build_turn_prompt(
    message: &str,
    context: &ConversationContext,
    recommendations: &[ContextualRecommendation],
    catalog: &[Product],
) -> String {
    let mut prompt = String::new();

    if recommendations.is_empty() {
        prompt.push_str("PRODUK: (tidak ada produk yang cocok untuk keluhan ini)\n");
    } else {
        prompt.push_str("PRODUK:\n");
        for rec in recommendations {
            if let Some(product) = catalog.iter().find(|p| p.id == rec.product_id) {
                let _ = writeln!(
                    prompt,
                    "- {} | Rp {} | {}",
                    product.name,
                    format_rupiah(product.price_idr),
                    product.benefits.join(", "),
                );
            }
        }
    }

    let recent: Vec<_> = context
        .history
        .iter()
        .rev()
        .take(HISTORY_TURNS)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if !recent.is_empty() {
        prompt.push_str("\nPERCAKAPAN:\n");
        for turn in recent {
            let who = match turn.role {
                TurnRole::Customer => "Pelanggan",
                TurnRole::Assistant => "Asisten",
            };
            let _ = writeln!(prompt, "{who}: {}", turn.text);
        }
    }

    let _ = write!(prompt, "\nPelanggan: {message}\nAsisten:");
    prompt
}

/// Thousands-dotted rupiah amount, "150.000" style.
fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::UrgencyLevel;

    fn product(id: &str, name: &str, price: u64) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            aliases: vec![],
            category: crate::models::ProductCategory::GeneralWellness,
            price_idr: price,
            in_stock: true,
            benefits: vec!["membantu daya tahan".into()],
            warnings: vec![],
            suitable_for: vec![],
            health: None,
        }
    }

    #[test]
    fn rupiah_formatting() {
        assert_eq!(format_rupiah(950), "950");
        assert_eq!(format_rupiah(95_000), "95.000");
        assert_eq!(format_rupiah(1_250_000), "1.250.000");
    }

    #[test]
    fn prompt_quotes_products_with_exact_prices() {
        let catalog = vec![product("madu", "Madu Hitam", 95_000)];
        let recs = vec![ContextualRecommendation {
            product_id: "madu".into(),
            product_name: "Madu Hitam".into(),
            relevance_score: 0.8,
            reasons: vec![],
            urgency: UrgencyLevel::Routine,
        }];
        let ctx = ConversationContext::new("cust-1");
        let prompt = build_turn_prompt("ada madu?", &ctx, &recs, &catalog);
        assert!(prompt.contains("Madu Hitam | Rp 95.000"));
        assert!(prompt.ends_with("Asisten:"));
    }

    #[test]
    fn prompt_includes_recent_history() {
        let ctx = ConversationContext::new("cust-1")
            .with_turn(TurnRole::Customer, "halo")
            .with_turn(TurnRole::Assistant, "halo kak");
        let prompt = build_turn_prompt("mau tanya", &ctx, &[], &[]);
        assert!(prompt.contains("Pelanggan: halo"));
        assert!(prompt.contains("Asisten: halo kak"));
    }
}
