//! Keyword suggestions for text-based image searches.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

/// Most keywords returned by [`generate_keywords`].
pub const MAX_KEYWORDS: usize = 20;

/// Shortest token that is kept.
const MIN_TOKEN_LEN: usize = 3;

/// Common English function words that do not help a search.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they", "what", "which", "who", "whom",
    "whose", "where", "when", "why", "how", "all", "each", "every", "both", "few", "more", "most",
    "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too",
    "very", "just", "about", "into", "through", "during", "before", "after", "above", "below",
    "up", "down", "out", "off", "over", "under", "again", "further", "then", "once", "here",
    "there", "any", "now",
];

// ASCII word characters and whitespace survive; everything else splits tokens.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("valid regex"));

static STOP_WORD_SET: LazyLock<BTreeSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// The description given to [`generate_keywords`] was blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Please enter an image description")]
pub struct EmptyDescription;

/// Whether `word` is one of the [`STOP_WORDS`].
#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Turn an image description into search keywords.
///
/// The text is lower-cased and split on anything that is not an ASCII word
/// character. Short tokens and stop words are dropped, and the rest is
/// deduplicated, sorted and cut to [`MAX_KEYWORDS`].
///
/// # Errors
/// Returns `EmptyDescription` if the description is blank. Its message is meant
/// to be shown to the user as-is.
pub fn generate_keywords(description: &str) -> Result<Vec<String>, EmptyDescription> {
    if description.trim().is_empty() {
        return Err(EmptyDescription);
    }

    let lowered = description.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, " ");
    let unique: BTreeSet<&str> = cleaned
        .split_whitespace()
        .filter(|word| word.len() >= MIN_TOKEN_LEN)
        .filter(|word| !is_stop_word(word))
        .collect();

    Ok(unique
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(ToString::to_string)
        .collect())
}
