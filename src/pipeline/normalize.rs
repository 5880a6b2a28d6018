use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Characters that survive punctuation stripping. Exclamation and question
/// marks feed the scorer's emphasis heuristics; apostrophes keep contractions
/// (and with them the negation cues) intact.
pub const RETAINED_PUNCTUATION: [char; 3] = ['!', '?', '\''];

/// Filler words dropped during normalization.
///
/// The table deliberately leaves out every word the scorer keys on: the
/// negators ("no", "nor", "not" and the n't contractions) and the degree
/// words ("very", "so", "more", "most"). Dropping those here would silence
/// the modifier window before the scorer ever saw them.
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "other", "some", "such", "only", "own", "same", "than", "too",
    "can", "will", "just", "now",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOPWORDS.iter().copied().collect());

/// Output of text normalization: the filtered token stream plus the original
/// text, which the scorer still needs for capitalization and punctuation
/// emphasis.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedText {
    /// Lowercased, punctuation-stripped, stopword-filtered tokens, in order
    pub tokens: Vec<String>,
    /// The text exactly as it appeared on the record
    pub original: String,
}

/// Trait for the normalization stage.
pub trait Normalizer {
    fn normalize(&self, text: &str) -> NormalizedText;
}

/// Default normalizer: lowercase, strip ASCII punctuation outside the
/// retained set, split on whitespace, drop stopwords.
///
/// Tokens that kept emphasis punctuation ("love!!!") are compared against the
/// stopword table as-is, so an emphasized stopword survives. The scorer trims
/// the emphasis characters again when it builds lexicon lookup keys.
pub struct TextNormalizer {
    stopwords: &'static HashSet<&'static str>,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            stopwords: &STOPWORD_SET,
        }
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer for TextNormalizer {
    fn normalize(&self, text: &str) -> NormalizedText {
        let lowered = text.to_lowercase();
        let tokens = lowered
            .split_whitespace()
            .map(clean_word)
            .filter(|token| !token.is_empty() && !self.stopwords.contains(token.as_str()))
            .collect();

        NormalizedText {
            tokens,
            original: text.to_string(),
        }
    }
}

/// Strip ASCII punctuation from a single word, keeping the retained set.
/// Removing punctuation never adds whitespace, so cleaning after splitting
/// matches cleaning the whole text first.
pub(crate) fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| !c.is_ascii_punctuation() || RETAINED_PUNCTUATION.contains(c))
        .collect()
}
