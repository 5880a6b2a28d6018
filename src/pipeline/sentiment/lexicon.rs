//! Polarity lexicon and modifier tables for rule-based sentiment scoring.
//!
//! Valences sit on the published -4..+4 scale. Coverage is curated for
//! product and service feedback rather than exhaustive; words outside the
//! table simply contribute nothing.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Scalar added by an intensifying degree modifier ("very", "extremely").
pub(crate) const BOOST_INCREMENT: f64 = 0.293;

/// Scalar added by a dampening degree modifier ("slightly", "barely").
pub(crate) const BOOST_DECREMENT: f64 = -0.293;

/// Word polarity table, alphabetical. Common words carry their published
/// valences (good 1.9, love 3.2, worst -3.1); the rest are curated on the
/// same scale.
const LEXICON_WORDS: &[(&str, f64)] = &[
    ("agree", 1.5), ("amazing", 2.8), ("angry", -2.3), ("annoyed", -1.9),
    ("annoying", -1.8), ("appalling", -2.7), ("appreciate", 2.0), ("appreciated", 2.1),
    ("atrocious", -2.8), ("avoid", -1.3), ("awesome", 3.1), ("awful", -2.0),
    ("awkward", -1.2), ("bad", -2.5), ("beautiful", 2.9), ("best", 3.2),
    ("better", 1.9), ("boring", -1.3), ("breaks", -1.4), ("brilliant", 2.8),
    ("broke", -1.6), ("broken", -1.7), ("bug", -1.3), ("buggy", -1.9),
    ("careless", -1.5), ("charming", 2.2), ("clean", 1.7), ("clear", 1.2),
    ("clunky", -1.4), ("comfortable", 1.9), ("complain", -1.6), ("complaint", -1.5),
    ("confused", -1.4), ("confusing", -1.3), ("convenient", 1.6), ("cool", 1.3),
    ("correct", 1.4), ("crap", -2.0), ("crash", -1.4), ("crashed", -1.5),
    ("crashes", -1.4), ("cumbersome", -1.2), ("damaged", -1.7), ("defective", -1.9),
    ("delayed", -1.1), ("delight", 2.9), ("delighted", 2.9), ("delightful", 2.8),
    ("dependable", 1.8), ("difficult", -1.5), ("dirty", -1.8), ("disagree", -1.3),
    ("disappointed", -2.0), ("disappointing", -2.2), ("disappointment", -2.3),
    ("disaster", -3.1), ("disgusting", -2.4), ("dislike", -1.6), ("dreadful", -2.7),
    ("easy", 1.9), ("effective", 1.8), ("efficient", 1.5), ("elegant", 2.1),
    ("enjoy", 2.2), ("enjoyable", 2.2), ("enjoyed", 2.3), ("error", -1.7),
    ("errors", -1.7), ("excellent", 2.7), ("excited", 2.2), ("exciting", 2.2),
    ("expensive", -0.9), ("fabulous", 2.6), ("fail", -2.5), ("failed", -2.3),
    ("fails", -2.2), ("failure", -2.3), ("fair", 1.4), ("fantastic", 2.6),
    ("faulty", -1.9), ("fear", -2.2), ("fine", 0.8), ("flaw", -1.5),
    ("flawed", -1.8), ("flawless", 2.5), ("fraud", -2.8), ("fresh", 1.3),
    ("friendly", 2.2), ("frustrated", -2.1), ("frustrating", -2.1), ("frustration", -2.1),
    ("fun", 2.3), ("garbage", -2.1), ("generous", 2.3), ("glad", 2.0),
    ("glitch", -1.3), ("glitchy", -1.6), ("good", 1.9), ("gorgeous", 2.7),
    ("grateful", 2.4), ("great", 3.1), ("greatest", 3.2), ("gross", -2.1),
    ("handy", 1.4), ("happy", 2.7), ("hate", -2.7), ("hated", -2.5),
    ("hates", -2.3), ("helpful", 1.9), ("honest", 2.3), ("hope", 1.9),
    ("horrible", -2.5), ("horrid", -2.6), ("ignored", -1.4), ("impressed", 2.2),
    ("impressive", 2.3), ("incredible", 2.6), ("inferior", -1.6), ("infuriating", -2.5),
    ("innovative", 1.9), ("intuitive", 1.8), ("issue", -1.1), ("issues", -1.1),
    ("joy", 2.8), ("junk", -1.8), ("keen", 1.5), ("kind", 2.4),
    ("lag", -1.0), ("laggy", -1.4), ("like", 1.5), ("liked", 1.9),
    ("likes", 1.6), ("lousy", -2.0), ("love", 3.2),
    ("loved", 2.9), ("lovely", 2.8), ("loves", 2.7), ("mad", -2.2),
    ("magnificent", 2.9), ("marvelous", 2.7), ("mediocre", -0.7), ("mess", -1.4),
    ("miserable", -2.6), ("missing", -1.2), ("mistake", -1.6), ("nasty", -2.4),
    ("neat", 1.6), ("negative", -1.9), ("nice", 1.8), ("nightmare", -2.8),
    ("noisy", -1.2), ("ok", 0.9), ("okay", 0.9), ("outdated", -1.1),
    ("outstanding", 2.9), ("overpriced", -1.6), ("pain", -2.0), ("painful", -2.1),
    ("pathetic", -2.3), ("perfect", 2.7), ("perfectly", 2.8), ("pleasant", 2.3),
    ("pleased", 2.1), ("pleasure", 2.5), ("polished", 1.5), ("poor", -1.9),
    ("poorly", -1.8), ("positive", 2.3), ("powerful", 1.7), ("praise", 2.4),
    ("pretty", 1.6), ("problem", -1.7), ("problems", -1.7), ("quick", 1.0),
    ("recommend", 1.6), ("recommended", 1.6), ("refreshing", 1.9), ("regret", -1.9),
    ("reliable", 1.9), ("remarkable", 2.2), ("responsive", 1.5), ("right", 1.5),
    ("ripoff", -2.2), ("robust", 1.4), ("rude", -2.0), ("sad", -2.1),
    ("satisfied", 1.7), ("satisfying", 1.9), ("scam", -2.6), ("seamless", 1.8),
    ("secure", 1.5), ("shame", -1.9), ("shoddy", -1.9), ("sleek", 1.6),
    ("slow", -0.9), ("sluggish", -1.3), ("smart", 1.7), ("smooth", 1.3),
    ("solid", 1.4), ("sorry", -0.3), ("spectacular", 2.7), ("splendid", 2.6),
    ("stable", 1.2), ("stunning", 2.6), ("stupid", -2.4), ("sturdy", 1.4),
    ("stylish", 1.7), ("suck", -2.0), ("sucks", -2.2), ("super", 2.9),
    ("superb", 3.0), ("superior", 1.9), ("sweet", 2.0), ("terrible", -2.1),
    ("terrific", 2.6), ("thank", 1.9), ("thanks", 1.9), ("thrilled", 2.7),
    ("trash", -1.8), ("trouble", -1.8), ("trust", 2.0), ("trustworthy", 2.2),
    ("ugly", -2.3), ("unacceptable", -2.1), ("unhappy", -1.8), ("unreliable", -1.8),
    ("unstable", -1.3), ("unusable", -2.0), ("upset", -1.9), ("useful", 1.9),
    ("useless", -1.8), ("valuable", 2.1), ("value", 1.3), ("waste", -1.8),
    ("wasted", -1.9), ("weak", -1.3), ("wonderful", 2.7), ("worse", -2.1),
    ("worst", -3.1), ("worth", 1.2), ("worthless", -1.9), ("wow", 2.8),
    ("wrong", -2.1), ("yes", 1.7), ("yuck", -1.8),
];

/// Degree modifiers and the scalar each contributes to the following word.
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOST_INCREMENT), ("amazingly", BOOST_INCREMENT),
    ("awfully", BOOST_INCREMENT), ("completely", BOOST_INCREMENT),
    ("considerably", BOOST_INCREMENT), ("decidedly", BOOST_INCREMENT),
    ("deeply", BOOST_INCREMENT), ("enormously", BOOST_INCREMENT),
    ("entirely", BOOST_INCREMENT), ("especially", BOOST_INCREMENT),
    ("exceptionally", BOOST_INCREMENT), ("extremely", BOOST_INCREMENT),
    ("fabulously", BOOST_INCREMENT), ("fully", BOOST_INCREMENT),
    ("greatly", BOOST_INCREMENT), ("hella", BOOST_INCREMENT),
    ("highly", BOOST_INCREMENT), ("hugely", BOOST_INCREMENT),
    ("incredibly", BOOST_INCREMENT), ("intensely", BOOST_INCREMENT),
    ("majorly", BOOST_INCREMENT), ("more", BOOST_INCREMENT),
    ("most", BOOST_INCREMENT), ("purely", BOOST_INCREMENT),
    ("quite", BOOST_INCREMENT), ("really", BOOST_INCREMENT),
    ("remarkably", BOOST_INCREMENT), ("so", BOOST_INCREMENT),
    ("substantially", BOOST_INCREMENT), ("thoroughly", BOOST_INCREMENT),
    ("totally", BOOST_INCREMENT), ("tremendously", BOOST_INCREMENT),
    ("uber", BOOST_INCREMENT), ("unbelievably", BOOST_INCREMENT),
    ("unusually", BOOST_INCREMENT), ("utterly", BOOST_INCREMENT),
    ("very", BOOST_INCREMENT),
    ("almost", BOOST_DECREMENT), ("barely", BOOST_DECREMENT),
    ("hardly", BOOST_DECREMENT), ("kinda", BOOST_DECREMENT),
    ("kindof", BOOST_DECREMENT), ("less", BOOST_DECREMENT),
    ("little", BOOST_DECREMENT), ("marginally", BOOST_DECREMENT),
    ("occasionally", BOOST_DECREMENT), ("partly", BOOST_DECREMENT),
    ("scarcely", BOOST_DECREMENT), ("slightly", BOOST_DECREMENT),
    ("somewhat", BOOST_DECREMENT), ("sorta", BOOST_DECREMENT),
    ("sortof", BOOST_DECREMENT),
];

/// Negation cues, including both apostrophe and bare contraction spellings
/// so records typed without apostrophes still negate.
const NEGATIONS: &[&str] = &[
    "aint", "ain't", "arent", "aren't", "cannot", "cant", "can't", "couldnt",
    "couldn't", "darent", "daren't", "despite", "didnt", "didn't", "doesnt",
    "doesn't", "dont", "don't", "hadnt", "hadn't", "hasnt", "hasn't", "havent",
    "haven't", "isnt", "isn't", "mightnt", "mightn't", "mustnt", "mustn't",
    "neednt", "needn't", "neither", "never", "no", "none", "nope", "nor", "not",
    "nothing", "nowhere", "oughtnt", "oughtn't", "rarely", "seldom", "shant",
    "shan't", "shouldnt", "shouldn't", "uhuh", "wasnt", "wasn't", "werent",
    "weren't", "without", "wont", "won't", "wouldnt", "wouldn't",
];

static SHARED: Lazy<Lexicon> = Lazy::new(Lexicon::new);

/// Compiled lookup tables for the scorer.
///
/// Lookups expect lowercased words with emphasis punctuation already trimmed;
/// the scorer derives those keys from normalized tokens. The three tables are
/// kept mutually disjoint: a word is a polarity carrier, a degree modifier,
/// or a negation cue, never two of those at once.
pub struct Lexicon {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            valences: LEXICON_WORDS.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    /// Process-wide shared instance. The tables are immutable after build, so
    /// every scorer can borrow the same one.
    pub fn shared() -> &'static Lexicon {
        &SHARED
    }

    /// Polarity of a word, if it carries one.
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    /// Whether the word carries its own polarity.
    pub fn contains(&self, word: &str) -> bool {
        self.valences.contains_key(word)
    }

    /// Scalar contributed by a degree modifier, if the word is one.
    pub fn booster_scalar(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    /// Whether the word is a negation cue.
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}
