//! Cross-category aggregation of recall samples.
//!
//! Splits a total quota evenly across the requested categories and tags each
//! served entry with its source. The quota formula `max(1, total / n)` can
//! overshoot the total when many categories share a small budget; in that
//! case the batch is truncated in accumulation order, favoring the
//! first-listed categories. The shuffle only runs when the batch comes up
//! short of the total. Both behaviors are kept as observed in the original
//! system rather than smoothed over.

use crate::error::{KiliError, Result};
use crate::registry::Category;
use crate::scheduler::recall::RecallScheduler;
use crate::store::{EntryStore, Sampled};
use rand::Rng;
use rand::seq::SliceRandom;

impl<R: Rng> RecallScheduler<R> {
    /// Serve up to `total_limit` entries drawn fairly from `categories`,
    /// each tagged with the category it came from.
    ///
    /// Categories are visited in caller order, each asked for
    /// `max(1, total_limit / categories.len())` entries. May return fewer
    /// than `total_limit` when the categories are collectively short of
    /// eligible entries. An empty category list yields an empty batch.
    pub fn sample_many(
        &mut self,
        store: &mut EntryStore,
        categories: &[Category],
        total_limit: usize,
    ) -> Result<Vec<Sampled>> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }
        if total_limit == 0 {
            return Err(KiliError::InvalidQuota(total_limit));
        }

        let quota = std::cmp::max(1, total_limit / categories.len());

        let mut batch = Vec::new();
        for &category in categories {
            for entry in self.sample(store, category, quota)? {
                batch.push(Sampled { category, entry });
            }
        }

        if batch.len() < total_limit {
            batch.shuffle(self.rng_mut());
        }
        batch.truncate(total_limit);

        Ok(batch)
    }
}
