//! Recall scheduler: picks which entries to serve for review.
//!
//! Selection is uniform over the entries still below the retirement
//! threshold; no weighting by recall count, age, or note. Serving an entry
//! increments its counter inside the same transaction as the selection, so a
//! sample can never be re-observed as un-served.

use crate::error::{KiliError, Result};
use crate::registry::Category;
use crate::store::{Entry, EntryStore};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Scheduler for serving entries due for recall.
///
/// Holds the random generator so outcomes can be made reproducible by
/// injecting a seeded one.
pub struct RecallScheduler<R = StdRng> {
    rng: R,
}

impl RecallScheduler<StdRng> {
    /// Create a scheduler backed by OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a scheduler with a fixed seed for reproducible selection.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RecallScheduler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RecallScheduler<R> {
    /// Create a scheduler with a caller-supplied generator.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Serve up to `limit` entries from `category`, chosen uniformly at
    /// random among those still below the retirement threshold.
    ///
    /// Every returned entry has had its recall counter advanced by one, and
    /// the returned records reflect the new value. Entries come back in the
    /// random order they were drawn. Fewer than `limit` eligible entries is
    /// not an error; a zero `limit` is rejected before touching storage.
    pub fn sample(
        &mut self,
        store: &mut EntryStore,
        category: Category,
        limit: usize,
    ) -> Result<Vec<Entry>> {
        if limit == 0 {
            return Err(KiliError::InvalidQuota(limit));
        }

        let tx = store.transaction()?;

        let mut eligible = EntryStore::eligible(&tx, category)?;
        let take = limit.min(eligible.len());
        let (chosen, _) = eligible.partial_shuffle(&mut self.rng, take);

        let mut served = Vec::with_capacity(take);
        for entry in chosen.iter() {
            EntryStore::bump_recall(&tx, category, entry.id)?;
            let mut entry = entry.clone();
            entry.recalled_count += 1;
            served.push(entry);
        }

        tx.commit()?;
        Ok(served)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
