//! Clause segmentation on coordinating connectives.

use crate::lexicon;

/// Split normalized text into independent clauses.
///
/// Connectives match on word boundaries only, so "command" never splits on
/// the embedded "and". Empty fragments are dropped; with no connective the
/// whole input comes back as a single clause.
pub fn segment(text: &str) -> Vec<&str> {
    // With no connective present, split yields the whole input as the one
    // fragment; input that is nothing but connectives yields no clauses.
    lexicon::connective_regex()
        .split(text)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}
