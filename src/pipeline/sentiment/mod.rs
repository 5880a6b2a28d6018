use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::ingest::RawRecord;
use crate::pipeline::normalize::{clean_word, NormalizedText, RETAINED_PUNCTUATION};

pub mod lexicon;

pub use lexicon::Lexicon;

/// Compound score at or above this labels a record Positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Compound score at or below this labels a record Negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

// Published heuristic constants for negation, emphasis, and normalization.
const NEGATION_SCALAR: f64 = -0.74;
const CAPS_EMPHASIS: f64 = 0.733;
const EXCLAMATION_BOOST: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_BOOST: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;
const NORMALIZATION_ALPHA: f64 = 15.0;

// Modifier influence decays the further it sits from the word it modifies.
const SECOND_TOKEN_DECAY: f64 = 0.95;
const THIRD_TOKEN_DECAY: f64 = 0.9;

/// Sentiment label derived from the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Fixed-threshold labeling: >= 0.05 Positive, <= -0.05 Negative,
    /// Neutral in between. Both boundary values belong to the polar labels.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four scores produced for every record. `neg`, `neu`, and `pos` are
/// shares that sum to one; `compound` is the normalized overall valence in
/// [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl SentimentScores {
    /// Fallback for text with no tokens left after normalization. Keeps the
    /// share invariant intact where an all-zero result would not.
    pub fn neutral() -> Self {
        Self {
            neg: 0.0,
            neu: 1.0,
            pos: 0.0,
            compound: 0.0,
        }
    }
}

/// A record that made it through the whole pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    /// 1-based input line the record came from
    pub line: usize,
    /// Producer-supplied identifier, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// When the feedback was recorded, if the producer supplied it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// The original feedback text
    pub text: String,
    /// Scores assigned by the scorer
    pub scores: SentimentScores,
    /// Label derived from the compound score
    pub label: Sentiment,
}

impl ScoredRecord {
    pub fn new(record: RawRecord, scores: SentimentScores) -> Self {
        let label = Sentiment::from_compound(scores.compound);
        Self {
            line: record.line,
            id: record.id,
            timestamp: record.timestamp,
            text: record.text,
            scores,
            label,
        }
    }
}

/// Trait for the scoring stage.
pub trait Scorer {
    fn score(&self, text: &NormalizedText) -> SentimentScores;
}

/// Lexicon-driven scorer.
///
/// Implements the published heuristics over the normalized token stream: a
/// three-token modifier window with distance decay, negation flip, ALL-CAPS
/// emphasis read from the original text, and `!`/`?` amplification folded
/// into the normalized compound.
pub struct SentimentScorer {
    lexicon: &'static Lexicon,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::shared(),
        }
    }

    /// Valence of the token at `index`, after applying the modifier window.
    fn token_valence(&self, keys: &[String], index: usize, caps: &CapsProfile) -> f64 {
        let key = keys[index].as_str();

        // Modifier words never score on their own.
        if self.lexicon.booster_scalar(key).is_some() || self.lexicon.is_negation(key) {
            return 0.0;
        }
        let Some(mut valence) = self.lexicon.valence(key) else {
            return 0.0;
        };

        if caps.mixed && caps.emphasized.contains(key) {
            valence += CAPS_EMPHASIS.copysign(valence);
        }

        for distance in 0..3usize {
            if index <= distance {
                break;
            }
            let prev = keys[index - distance - 1].as_str();
            // A word that carries its own polarity is not treated as a
            // modifier for this one.
            if self.lexicon.contains(prev) {
                continue;
            }

            let mut scalar = self.modifier_scalar(prev, valence, caps);
            if distance == 1 {
                scalar *= SECOND_TOKEN_DECAY;
            } else if distance == 2 {
                scalar *= THIRD_TOKEN_DECAY;
            }
            valence += scalar;

            if self.lexicon.is_negation(prev) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence
    }

    /// Scalar a degree modifier contributes toward `valence`, sign-matched
    /// and amplified when the modifier itself was shouted.
    fn modifier_scalar(&self, word: &str, valence: f64, caps: &CapsProfile) -> f64 {
        let Some(mut scalar) = self.lexicon.booster_scalar(word) else {
            return 0.0;
        };
        if valence < 0.0 {
            scalar = -scalar;
        }
        if caps.mixed && caps.emphasized.contains(word) {
            scalar += CAPS_EMPHASIS.copysign(valence);
        }
        scalar
    }

    /// Fold per-token valences and punctuation emphasis into the final four
    /// scores.
    fn assemble(&self, valences: &[f64], original: &str) -> SentimentScores {
        let punct_emphasis = punctuation_emphasis(original);

        let mut total_valence: f64 = valences.iter().sum();
        if total_valence > 0.0 {
            total_valence += punct_emphasis;
        } else if total_valence < 0.0 {
            total_valence -= punct_emphasis;
        }
        let compound = normalize_compound(total_valence);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for valence in valences {
            // Each polar token also contributes one unit of weight, so a
            // weakly polar word still outweighs a neutral one.
            if *valence > 0.0 {
                pos_sum += valence + 1.0;
            } else if *valence < 0.0 {
                neg_sum += valence - 1.0;
            } else {
                neu_count += 1.0;
            }
        }

        if pos_sum > neg_sum.abs() {
            pos_sum += punct_emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= punct_emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        SentimentScores {
            neg: (neg_sum / total).abs(),
            neu: (neu_count / total).abs(),
            pos: (pos_sum / total).abs(),
            compound,
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for SentimentScorer {
    fn score(&self, text: &NormalizedText) -> SentimentScores {
        if text.tokens.is_empty() {
            return SentimentScores::neutral();
        }

        let caps = CapsProfile::of(&text.original);
        let keys: Vec<String> = text
            .tokens
            .iter()
            .map(|token| lookup_key(token).to_string())
            .collect();

        let valences: Vec<f64> = (0..keys.len())
            .map(|index| self.token_valence(&keys, index, &caps))
            .collect();

        self.assemble(&valences, &text.original)
    }
}

/// Capitalization profile of the original text. Emphasis only applies when
/// casing is mixed: a fully shouted message carries no contrast.
struct CapsProfile {
    mixed: bool,
    emphasized: HashSet<String>,
}

impl CapsProfile {
    fn of(original: &str) -> Self {
        let mut emphasized = HashSet::new();
        let mut total = 0usize;
        let mut shouted = 0usize;

        for word in original.split_whitespace() {
            total += 1;
            if is_allcaps(word) {
                shouted += 1;
                let key = clean_word(&word.to_lowercase());
                let key = lookup_key(&key);
                if !key.is_empty() {
                    emphasized.insert(key.to_string());
                }
            }
        }

        Self {
            mixed: shouted > 0 && shouted < total,
            emphasized,
        }
    }
}

/// A word counts as shouted when it has letters and all of them are upper.
fn is_allcaps(word: &str) -> bool {
    let mut has_alpha = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            has_alpha = true;
            if !c.is_uppercase() {
                return false;
            }
        }
    }
    has_alpha
}

/// Normalized tokens keep emphasis punctuation ("great!!!"); lexicon keys do
/// not. Interior apostrophes survive, so contractions stay whole.
fn lookup_key(token: &str) -> &str {
    token.trim_matches(|c| RETAINED_PUNCTUATION.contains(&c))
}

/// Map an unbounded valence sum into [-1, 1].
fn normalize_compound(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn punctuation_emphasis(text: &str) -> f64 {
    exclamation_emphasis(text) + question_emphasis(text)
}

/// Each `!` adds a fixed boost, up to four of them.
fn exclamation_emphasis(text: &str) -> f64 {
    let count = text.matches('!').count().min(MAX_EXCLAMATIONS);
    count as f64 * EXCLAMATION_BOOST
}

/// Question marks only start to matter in numbers: two or three scale
/// per-mark, more than three flattens at a cap.
fn question_emphasis(text: &str) -> f64 {
    let count = text.matches('?').count();
    match count {
        0 | 1 => 0.0,
        2 | 3 => count as f64 * QUESTION_BOOST,
        _ => QUESTION_CAP,
    }
}
