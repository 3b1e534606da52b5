//! Built-in lexicon: the health complaints customers actually type,
//! in colloquial Indonesian with common misspellings, plus English
//! equivalents used for catalog search.

use super::types::{HealthCategory, HealthLexiconEntry, Severity, TermKind};

#[allow(clippy::too_many_arguments)]
fn entry(
    term: &str,
    variations: &[&str],
    english: &[&str],
    category: HealthCategory,
    default_severity: Severity,
    context_clues: &[&str],
    base_confidence: f32,
    kind_override: Option<TermKind>,
) -> HealthLexiconEntry {
    HealthLexiconEntry {
        term: term.into(),
        variations: variations.iter().map(|v| v.to_string()).collect(),
        english_equivalents: english.iter().map(|e| e.to_string()).collect(),
        category,
        default_severity,
        context_clues: context_clues.iter().map(|c| c.to_string()).collect(),
        base_confidence,
        kind_override,
    }
}

/// The built-in entries. Regional spellings and misspellings are listed as
/// variations so the exact pass catches them without fuzzy matching.
pub fn builtin_entries() -> Vec<HealthLexiconEntry> {
    use HealthCategory::*;
    use Severity::*;

    vec![
        entry(
            "diabetes",
            &["diabates", "diabet", "kencing manis", "gula darah tinggi", "gula tinggi"],
            &["diabetes", "blood sugar"],
            Metabolic,
            Moderate,
            &["gula darah", "insulin", "kambuh", "cek gula"],
            0.95,
            None,
        ),
        entry(
            "kolesterol",
            &["kolestrol", "kolesterol tinggi", "kolestrol tinggi", "lemak darah"],
            &["cholesterol"],
            Metabolic,
            Moderate,
            &["gorengan", "lemak", "cek darah"],
            0.9,
            None,
        ),
        entry(
            "asam urat",
            &["asam urat tinggi", "encok", "gout"],
            &["gout", "uric acid"],
            Metabolic,
            Moderate,
            &["jempol kaki", "bengkak", "kambuh"],
            0.9,
            None,
        ),
        entry(
            "hipertensi",
            &["darah tinggi", "tensi tinggi", "tekanan darah tinggi", "hipertensi"],
            &["hypertension", "high blood pressure"],
            Cardiovascular,
            Moderate,
            &["tensi", "tekanan darah"],
            0.9,
            None,
        ),
        entry(
            "maag",
            &["sakit maag", "magh", "mag", "gastritis"],
            &["gastritis"],
            Digestive,
            Moderate,
            &["telat makan", "perih", "kambuh"],
            0.9,
            Some(TermKind::Condition),
        ),
        entry(
            "asam lambung",
            &["gerd", "lambung naik", "refluks", "lambung"],
            &["acid reflux", "gerd"],
            Digestive,
            Moderate,
            &["dada panas", "sendawa", "kambuh"],
            0.9,
            Some(TermKind::Condition),
        ),
        entry(
            "diare",
            &["mencret", "bab cair", "diare terus"],
            &["diarrhea"],
            Digestive,
            Moderate,
            &["bolak balik kamar mandi", "perut mules"],
            0.85,
            None,
        ),
        entry(
            "sembelit",
            &["susah bab", "konstipasi", "bab keras"],
            &["constipation"],
            Digestive,
            Mild,
            &["serat", "jarang bab"],
            0.85,
            None,
        ),
        entry(
            "kembung",
            &["perut kembung", "begah", "masuk angin"],
            &["bloating"],
            Digestive,
            Mild,
            &["habis makan", "sendawa"],
            0.8,
            None,
        ),
        entry(
            "mual",
            &["eneg", "pengen muntah", "mual mual"],
            &["nausea"],
            Digestive,
            Mild,
            &["muntah", "perjalanan"],
            0.85,
            None,
        ),
        entry(
            "batuk",
            &["batuk kering", "batuk berdahak", "batuk batuk"],
            &["cough"],
            Respiratory,
            Mild,
            &["tenggorokan", "dahak", "malam hari"],
            0.9,
            None,
        ),
        entry(
            "pilek",
            &["flu", "meler", "hidung tersumbat", "ingusan"],
            &["cold", "flu"],
            Respiratory,
            Mild,
            &["bersin", "ingus"],
            0.85,
            None,
        ),
        entry(
            "demam",
            &["meriang", "badan panas", "panas dingin"],
            &["fever"],
            General,
            Moderate,
            &["termometer", "menggigil"],
            0.85,
            None,
        ),
        entry(
            "sakit tenggorokan",
            &["radang tenggorokan", "tenggorokan sakit", "tenggorokan perih"],
            &["sore throat"],
            Respiratory,
            Mild,
            &["menelan", "serak"],
            0.85,
            None,
        ),
        entry(
            "sakit kepala",
            &["pusing", "pusing kepala", "migrain", "nyeri kepala"],
            &["headache", "migraine"],
            Pain,
            Moderate,
            &["kepala berat", "cekot cekot"],
            0.85,
            None,
        ),
        entry(
            "pegal linu",
            &["pegal", "pegel", "linu", "badan pegal"],
            &["muscle ache"],
            Pain,
            Mild,
            &["habis kerja", "angkat berat"],
            0.8,
            None,
        ),
        entry(
            "nyeri sendi",
            &["sakit sendi", "sendi nyeri", "rematik"],
            &["joint pain"],
            Pain,
            Moderate,
            &["lutut", "naik tangga"],
            0.85,
            None,
        ),
        entry(
            "sakit pinggang",
            &["nyeri pinggang", "pinggang sakit", "pinggang pegal"],
            &["back pain"],
            Pain,
            Moderate,
            &["duduk lama", "angkat barang"],
            0.85,
            None,
        ),
        entry(
            "susah tidur",
            &["insomnia", "tidak bisa tidur", "sulit tidur", "begadang terus"],
            &["insomnia"],
            Sleep,
            Mild,
            &["malam", "kepikiran"],
            0.85,
            None,
        ),
        entry(
            "lemas",
            &["badan lemas", "gampang capek", "mudah lelah", "kurang tenaga"],
            &["fatigue", "low energy"],
            General,
            Mild,
            &["stamina", "energi"],
            0.8,
            None,
        ),
        entry(
            "daya tahan tubuh",
            &["imun lemah", "imunitas", "sering sakit", "gampang sakit"],
            &["weak immunity", "immune support"],
            General,
            Mild,
            &["musim hujan", "vitamin"],
            0.75,
            None,
        ),
        entry(
            "alergi",
            &["gatal gatal", "biduran", "alergi kambuh"],
            &["allergy"],
            General,
            Mild,
            &["makanan laut", "debu"],
            0.8,
            Some(TermKind::Condition),
        ),
    ]
}
