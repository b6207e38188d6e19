// Normalizer: case folding and diacritic stripping.
//
// "Škoda", "SKODA" and "škoda" all fold to "skoda". Compatibility
// decomposition also flattens ligatures and width variants ("ﬁ" -> "fi",
// "ＫＷ" -> "kw"), which matters for OCR output.

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Fold text for keyword comparison.
///
/// Applies NFKD and drops every character with a non-zero canonical
/// combining class, lower-cases the whole string, then strips once more:
/// lower-casing can itself emit a combining mark ("İ" -> "i" + U+0307).
/// Lower-casing the full string keeps context-sensitive rules such as the
/// Greek final sigma.
pub fn normalize(text: &str) -> String {
    strip_marks(&strip_marks(text).to_lowercase())
}

fn strip_marks(text: &str) -> String {
    text.nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_slovak_diacritics() {
        assert_eq!(normalize("Škoda Žilina ďalšia"), "skoda zilina dalsia");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn compatibility_forms_flatten() {
        assert_eq!(normalize("ﬁle ＫＷ"), "file kw");
    }

    #[test]
    fn dotted_capital_i_loses_its_dot() {
        // U+0130 decomposes to "I" + combining dot above
        assert_eq!(normalize("\u{0130}"), "i");
    }

    #[test]
    fn greek_word_ends_in_final_sigma() {
        assert_eq!(normalize("ΟΔΟΣ"), "οδος");
        assert_eq!(normalize("ΟΔΟΣ ΣΤΟ"), "οδος στο");
        assert_eq!(normalize("Ὀδός"), "οδος");
    }

    #[test]
    fn idempotent_on_mixed_input() {
        let once = normalize("Výkon 90 kW, objem 1968 cm³ — ℌello ΟΔΟΣ \u{0130}");
        assert_eq!(normalize(&once), once);
    }
}
