// Unit tests for text preparation.
//
// Normalization and tokenization are pure functions; these tests pin down
// their folding rules and check the properties the scorer relies on:
// normalize is idempotent and tokenize is deterministic.

use doclabel::text::{normalize, tokenize, tokenize_document};
use proptest::prelude::*;

// ============================================================
// normalize: folding rules
// ============================================================

#[test]
fn normalize_folds_case_and_diacritics() {
    assert_eq!(normalize("Škoda"), "skoda");
    assert_eq!(normalize("SKODA"), "skoda");
    assert_eq!(normalize("škoda"), "skoda");
}

#[test]
fn normalize_handles_slovak_and_czech_letters() {
    assert_eq!(
        normalize("Ľubovoľný ŕ ô ä ů ř ě"),
        "lubovolny r o a u r e"
    );
}

#[test]
fn normalize_keeps_digits_and_punctuation() {
    assert_eq!(normalize("Spotreba 5.5 l/100km"), "spotreba 5.5 l/100km");
}

#[test]
fn normalize_flattens_superscripts() {
    // cm³ and cm3 must compare equal after folding
    assert_eq!(normalize("cm³"), "cm3");
}

#[test]
fn normalize_empty_input() {
    assert_eq!(normalize(""), "");
}

// ============================================================
// tokenize: word boundaries and positions
// ============================================================

#[test]
fn tokenize_assigns_sequential_positions() {
    let tokens = tokenize("motor 150 kw motor");
    let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);
    assert_eq!(texts, vec!["motor", "150", "kw", "motor"]);
}

#[test]
fn tokenize_splits_on_punctuation() {
    let texts: Vec<String> = tokenize("5.5 l/100km, vin:wauzzz")
        .into_iter()
        .map(|t| t.text)
        .collect();
    assert_eq!(texts, vec!["5", "5", "l", "100km", "vin", "wauzzz"]);
}

#[test]
fn tokenize_keeps_underscores_inside_words() {
    let tokens = tokenize("snake_case word");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text, "snake_case");
}

#[test]
fn tokenize_empty_and_separator_only() {
    assert!(tokenize("").is_empty());
    assert!(tokenize(" ,.;- \n\t").is_empty());
}

#[test]
fn tokenize_document_normalizes_first() {
    let texts: Vec<String> = tokenize_document("Výkon 90 kW")
        .into_iter()
        .map(|t| t.text)
        .collect();
    assert_eq!(texts, vec!["vykon", "90", "kw"]);
}

// ============================================================
// Properties
// ============================================================

proptest! {
    #[test]
    fn normalize_is_idempotent(s in "[a-zA-Z0-9 áäčďéíĺľňóôŕšťúýžÁÄČĎÉÍĹĽŇÓÔŔŠŤÚÝŽ³.,;:/-]{0,64}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_output_has_no_uppercase(s in "[a-zA-ZáčďéíľňóšťúýžÁČĎÉÍĽŇÓŠŤÚÝŽ ]{0,64}") {
        let folded = normalize(&s);
        prop_assert!(!folded.chars().any(char::is_uppercase));
    }

    #[test]
    fn tokenize_is_deterministic(s in ".{0,200}") {
        prop_assert_eq!(tokenize(&s), tokenize(&s));
    }

    #[test]
    fn token_positions_are_dense(s in "[a-z0-9 ,.]{0,100}") {
        let tokens = tokenize(&s);
        for (i, token) in tokens.iter().enumerate() {
            prop_assert_eq!(token.position, i);
            prop_assert!(!token.text.is_empty());
        }
    }
}
