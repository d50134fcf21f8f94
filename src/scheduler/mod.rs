//! Scheduling layer for Kili.
//!
//! The `RecallScheduler` decides which stored entries come back for review:
//! - eligibility: entries below the retirement threshold
//! - selection: uniform random, bounded by the caller's limit
//! - side effect: every served entry's recall counter advances by one
//!
//! `sample` serves one category; `sample_many` spreads a total quota across
//! several and tags each result with its source category.

mod aggregate;
mod recall;

pub use recall::RecallScheduler;
