use chrono::{DateTime, FixedOffset};

/// Canned replies used when the generated one cannot be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// The generated reply failed validation.
    ValidationFailed,
    /// The turn was handed to a human agent.
    Escalated,
    /// An order turn was handed to a human agent.
    OrderHandoff,
    /// The generation backend is overloaded or unreachable.
    GeneratorBusy,
    /// The message carried no usable signal; ask for more detail.
    Clarify,
    /// Severe complaint beyond supplement advice; point at a doctor.
    SeekDoctor,
}

pub fn fallback_reply(kind: FallbackKind) -> &'static str {
    match kind {
        FallbackKind::ValidationFailed => {
            "Mohon maaf kak, kami cek dulu jawabannya supaya tidak keliru. \
             Tim kami akan segera membalas ya."
        }
        FallbackKind::Escalated => {
            "Baik kak, keluhan ini kami teruskan ke tim kami ya. \
             Admin kami akan segera menghubungi kakak."
        }
        FallbackKind::OrderHandoff => {
            "Pesanan kakak sudah kami catat ya. \
             Admin kami akan konfirmasi detailnya secepatnya."
        }
        FallbackKind::GeneratorBusy => {
            "Mohon maaf kak, sistem kami sedang sibuk. \
             Silakan coba lagi beberapa saat ya."
        }
        FallbackKind::Clarify => {
            "Boleh diceritakan lebih detail keluhan yang kakak rasakan? \
             Supaya kami bisa bantu cari yang paling pas."
        }
        FallbackKind::SeekDoctor => {
            "Keluhan seperti ini sebaiknya segera diperiksakan ke dokter ya kak. \
             Kami juga teruskan ke tim kami supaya bisa membantu lebih lanjut."
        }
    }
}

/// Escalation reply for the customer. When the hand-off lands outside
/// business hours the next desk opening is appended, in local time.
pub fn escalation_reply(kind: FallbackKind, next_open: Option<DateTime<FixedOffset>>) -> String {
    let base = fallback_reply(kind);
    match next_open {
        Some(t) => format!(
            "{base} Tim kami kembali online pukul {} ya kak.",
            t.format("%H.%M")
        ),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn every_fallback_has_text() {
        for kind in [
            FallbackKind::ValidationFailed,
            FallbackKind::Escalated,
            FallbackKind::OrderHandoff,
            FallbackKind::GeneratorBusy,
            FallbackKind::Clarify,
            FallbackKind::SeekDoctor,
        ] {
            assert!(!fallback_reply(kind).is_empty());
        }
    }

    #[test]
    fn after_hours_reply_names_the_next_opening() {
        let wib = FixedOffset::east_opt(7 * 3600).unwrap();
        let next = wib.with_ymd_and_hms(2026, 3, 11, 9, 0, 0).unwrap();
        let reply = escalation_reply(FallbackKind::Escalated, Some(next));
        assert!(reply.contains("09.00"));
    }
}
