//! Job-listing scraping primitives.
//!
//! This crate provides:
//! - [`fetch`] — HTTP fetch collaborator with typed failure modes
//! - [`extract`] — per-field defensive extraction from a listing page
//! - [`trust`] — the high-trust classification rule
//! - [`harvest`] — email / profile-link discovery and deduplication

pub mod extract;
pub mod fetch;
pub mod harvest;
pub mod trust;

pub use extract::{JobFields, extract_fields};
pub use fetch::{FetchError, FetchedDocument, PageFetcher};
pub use harvest::{ContactSet, harvest};
pub use trust::is_high_trust;
