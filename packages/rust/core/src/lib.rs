//! Batch orchestration for joblens.
//!
//! This crate provides:
//! - [`pipeline`] — the URL batch pipeline (one record per input URL)
//! - [`enrich`] — opt-in client-profile contact enrichment

pub mod enrich;
pub mod pipeline;

pub use enrich::enrich_contacts;
pub use pipeline::{BatchConfig, ProgressReporter, SilentProgress, run_batch};
