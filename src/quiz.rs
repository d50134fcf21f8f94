//! Quiz grouping of sampled entries.
//!
//! The quiz layer consumes a batch of served entries as one JSON document
//! grouped per category: paired categories become original-to-improved maps,
//! single-field categories become plain lists. Only the grouping is promised
//! here; prompt construction happens outside this crate.

use crate::store::{EntryContent, Sampled};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A per-category grouping of served entries, ready for the quiz layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Learnings {
    /// mistake -> correction
    pub grammar_mistakes: BTreeMap<String, String>,
    /// word -> better word
    pub better_vocabulary: BTreeMap<String, String>,
    /// original phrase -> better phrase
    pub better_phrases: BTreeMap<String, String>,
    pub new_words: Vec<String>,
    pub new_phrases: Vec<String>,
}

impl Learnings {
    /// Group a sampled batch by category.
    pub fn from_sampled(batch: &[Sampled]) -> Self {
        let mut learnings = Self::default();

        for sampled in batch {
            match &sampled.entry.content {
                EntryContent::GrammarMistake { mistake, correction } => {
                    learnings
                        .grammar_mistakes
                        .insert(mistake.clone(), correction.clone());
                }
                EntryContent::BetterVocabulary { word, better_word } => {
                    learnings
                        .better_vocabulary
                        .insert(word.clone(), better_word.clone());
                }
                EntryContent::BetterPhrase { original, better } => {
                    learnings.better_phrases.insert(original.clone(), better.clone());
                }
                EntryContent::NewWord { word } => learnings.new_words.push(word.clone()),
                EntryContent::NewPhrase { phrase } => learnings.new_phrases.push(phrase.clone()),
            }
        }

        learnings
    }

    /// Whether the grouping holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.grammar_mistakes.is_empty()
            && self.better_vocabulary.is_empty()
            && self.better_phrases.is_empty()
            && self.new_words.is_empty()
            && self.new_phrases.is_empty()
    }

    /// Render the grouping as pretty-printed JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
