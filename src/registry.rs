//! Category registry.
//!
//! The five learning-item categories are a closed set. Each category knows
//! its backing table and the ordered list of content fields it stores; the
//! first field carries the uniqueness constraint. Free-text category names
//! (from the CLI or other callers) enter through `FromStr`, which is the one
//! place an unknown name can surface.

use crate::error::KiliError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A named partition of learning items sharing a content-field shape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Grammar mistakes paired with their corrections
    GrammarMistakes,
    /// Phrases paired with more natural alternatives
    BetterPhrases,
    /// Words paired with stronger vocabulary
    BetterVocabulary,
    /// Single new words worth remembering
    NewWords,
    /// Single new phrases worth remembering
    NewPhrases,
}

impl Category {
    /// Every known category, in registry order.
    pub const ALL: [Category; 5] = [
        Category::GrammarMistakes,
        Category::BetterPhrases,
        Category::BetterVocabulary,
        Category::NewWords,
        Category::NewPhrases,
    ];

    /// Get the string representation used by callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::GrammarMistakes => "grammar_mistakes",
            Category::BetterPhrases => "better_phrases",
            Category::BetterVocabulary => "better_vocabulary",
            Category::NewWords => "new_words",
            Category::NewPhrases => "new_phrases",
        }
    }

    /// Get the backing SQLite table name.
    pub fn table(&self) -> &'static str {
        match self {
            Category::GrammarMistakes => "GrammarMistakes",
            Category::BetterPhrases => "BetterPhrases",
            Category::BetterVocabulary => "BetterVocabulary",
            Category::NewWords => "NewWords",
            Category::NewPhrases => "NewPhrases",
        }
    }

    /// Ordered content-field names. One or two entries; the first is unique
    /// within the category.
    pub fn content_fields(&self) -> &'static [&'static str] {
        match self {
            Category::GrammarMistakes => &["mistake", "correction"],
            Category::BetterPhrases => &["original", "better"],
            Category::BetterVocabulary => &["word", "better_word"],
            Category::NewWords => &["word"],
            Category::NewPhrases => &["phrase"],
        }
    }

    /// The field carrying the uniqueness constraint.
    pub fn key_field(&self) -> &'static str {
        self.content_fields()[0]
    }
}

impl FromStr for Category {
    type Err = KiliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grammar_mistakes" => Ok(Category::GrammarMistakes),
            "better_phrases" => Ok(Category::BetterPhrases),
            "better_vocabulary" => Ok(Category::BetterVocabulary),
            "new_words" => Ok(Category::NewWords),
            "new_phrases" => Ok(Category::NewPhrases),
            other => Err(KiliError::UnknownCategory(other.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
