//! Shared types, error model, and configuration for joblens.
//!
//! This crate is the foundation depended on by all other joblens crates.
//! It provides:
//! - [`JoblensError`] — the unified error type
//! - Domain types ([`JobRecord`])
//! - Configuration ([`AppConfig`], [`ScrapeConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, FetchConfig, ScrapeConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{JoblensError, Result};
pub use types::JobRecord;
