//! Entry types for EntryStore persistence.
//!
//! This module defines the `Entry` record and the `EntryContent` variant that
//! carries the learnable text. Per-category schema variability (paired fields
//! vs. a single field) is modeled as one variant per category kind rather
//! than dynamic column sets.

use crate::registry::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Recall count at which an entry stops being served until reset.
pub const RETIREMENT_THRESHOLD: u32 = 3;

/// One persisted learning item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// Auto-incremented row id, unique within its category
    pub id: i64,

    /// The learnable text, shaped by the entry's category
    pub content: EntryContent,

    /// Date the item was stored, never mutated
    pub learned_date: NaiveDate,

    /// Times this entry has been served by a scheduling query
    pub recalled_count: u32,

    /// Optional free-text context, set at creation
    pub note: Option<String>,
}

impl Entry {
    /// Whether scheduling queries may still serve this entry.
    pub fn is_eligible(&self) -> bool {
        self.recalled_count < RETIREMENT_THRESHOLD
    }
}

/// Content of a learning item. One variant per category kind, each carrying
/// that category's content fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryContent {
    /// A grammar mistake and its correction
    GrammarMistake { mistake: String, correction: String },
    /// A phrase and a more natural alternative
    BetterPhrase { original: String, better: String },
    /// A word and a stronger choice
    BetterVocabulary { word: String, better_word: String },
    /// A new word
    NewWord { word: String },
    /// A new phrase
    NewPhrase { phrase: String },
}

impl EntryContent {
    /// Create a grammar mistake entry.
    pub fn grammar_mistake(mistake: &str, correction: &str) -> Self {
        Self::GrammarMistake {
            mistake: mistake.to_string(),
            correction: correction.to_string(),
        }
    }

    /// Create a better-phrase entry.
    pub fn better_phrase(original: &str, better: &str) -> Self {
        Self::BetterPhrase {
            original: original.to_string(),
            better: better.to_string(),
        }
    }

    /// Create a better-vocabulary entry.
    pub fn better_vocabulary(word: &str, better_word: &str) -> Self {
        Self::BetterVocabulary {
            word: word.to_string(),
            better_word: better_word.to_string(),
        }
    }

    /// Create a new-word entry.
    pub fn new_word(word: &str) -> Self {
        Self::NewWord { word: word.to_string() }
    }

    /// Create a new-phrase entry.
    pub fn new_phrase(phrase: &str) -> Self {
        Self::NewPhrase { phrase: phrase.to_string() }
    }

    /// Build content for `category` from positional values, one per content
    /// field. Returns None when the value count does not match the category.
    pub fn from_values(category: Category, values: &[String]) -> Option<Self> {
        match (category, values) {
            (Category::GrammarMistakes, [mistake, correction]) => {
                Some(Self::grammar_mistake(mistake, correction))
            }
            (Category::BetterPhrases, [original, better]) => {
                Some(Self::better_phrase(original, better))
            }
            (Category::BetterVocabulary, [word, better_word]) => {
                Some(Self::better_vocabulary(word, better_word))
            }
            (Category::NewWords, [word]) => Some(Self::new_word(word)),
            (Category::NewPhrases, [phrase]) => Some(Self::new_phrase(phrase)),
            _ => None,
        }
    }

    /// The category this content belongs to.
    pub fn category(&self) -> Category {
        match self {
            Self::GrammarMistake { .. } => Category::GrammarMistakes,
            Self::BetterPhrase { .. } => Category::BetterPhrases,
            Self::BetterVocabulary { .. } => Category::BetterVocabulary,
            Self::NewWord { .. } => Category::NewWords,
            Self::NewPhrase { .. } => Category::NewPhrases,
        }
    }

    /// Value of the first (unique) content field.
    pub fn key(&self) -> &str {
        match self {
            Self::GrammarMistake { mistake, .. } => mistake,
            Self::BetterPhrase { original, .. } => original,
            Self::BetterVocabulary { word, .. } => word,
            Self::NewWord { word } => word,
            Self::NewPhrase { phrase } => phrase,
        }
    }

    /// Value of the second content field, if the category has one.
    pub fn paired(&self) -> Option<&str> {
        match self {
            Self::GrammarMistake { correction, .. } => Some(correction),
            Self::BetterPhrase { better, .. } => Some(better),
            Self::BetterVocabulary { better_word, .. } => Some(better_word),
            Self::NewWord { .. } | Self::NewPhrase { .. } => None,
        }
    }
}

/// An entry tagged with the category it was sampled from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sampled {
    /// Source category
    pub category: Category,
    /// The served entry
    pub entry: Entry,
}
