//! Storage layer for Kili.
//!
//! This module provides persistence for learning entries using SQLite, one
//! table per category with a uniqueness constraint on the category's first
//! content field.
//!
//! # Example
//!
//! ```ignore
//! use kili::store::{EntryStore, EntryContent};
//!
//! let mut store = EntryStore::open("learnings.db")?;
//!
//! // First sighting is stored, repeats are reported as already known.
//! let content = EntryContent::grammar_mistake("He don't like it", "He doesn't like it");
//! assert!(store.add(&content, Some("Common mistake"))?);
//! assert!(!store.add(&content, None)?);
//! ```

mod entry;
mod entry_store;

pub use entry::{Entry, EntryContent, RETIREMENT_THRESHOLD, Sampled};
pub use entry_store::{CategoryCounts, EntryStore};
