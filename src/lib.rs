//! Kili - spaced-repetition recall storage for English learning items
//!
//! Kili keeps categorized learning items (grammar corrections, phrase and
//! vocabulary upgrades, new words and phrases) and resurfaces each a bounded
//! number of times, chosen at random, until it retires. Serving an item is a
//! mutation: its recall counter advances, and at the retirement threshold it
//! drops out of rotation until explicitly reset.

pub mod error;
pub mod quiz;
pub mod registry;
pub mod scheduler;
pub mod store;

pub use error::{KiliError, Result};
