//! Canonical player identities: one spelling per person regardless of case
//! or accents.

use crate::store::AnnualRanking;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fixed roster. These players always appear in the annual ranking, even
/// with zero points, and seed the presence checkboxes.
pub const INITIAL_PLAYERS: &[&str] = &[
    "Rodrigo", "Italo", "MB", "Claudino", "Bené", "Samuel", "Vitim", "Marcílio", "Pedro",
    "Wagner", "Lucas", "Diêgo", "Rudson", "Léo", "Marcão",
];

/// Normalized lookup key: trimmed, lowercased, accents stripped.
/// "Diêgo", "diego" and " DIEGO " all produce the same key.
pub fn normalize_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Resolve free-text input to a player's canonical spelling.
///
/// Empty input resolves to the empty string (no player). A spelling already
/// in the annual ranking wins over the fixed roster's; input matching
/// neither becomes its own canonical spelling, trimmed.
pub fn resolve_name(input: &str, annual: &AnnualRanking) -> String {
    let raw = input.trim();
    if raw.is_empty() {
        return String::new();
    }
    let key = normalize_key(raw);
    for existing in annual.keys() {
        if normalize_key(existing) == key {
            return existing.clone();
        }
    }
    for p in INITIAL_PLAYERS {
        if normalize_key(p) == key {
            return (*p).to_string();
        }
    }
    raw.to_string()
}
