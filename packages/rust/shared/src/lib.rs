//! Shared types, error model, and configuration for docsmith.
//!
//! This crate is the foundation depended on by all other docsmith crates.
//! It provides:
//! - [`DocsmithError`]: the unified error type
//! - Domain types ([`Section`], [`ContentFile`], [`NavEntry`], [`FileOutcome`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, NavConfig, NotebookConfig, RenameConfig, SiteConfig, config_dir,
    find_config, init_config, load_config, load_config_from, validate_config,
};
pub use error::{DocsmithError, Result};
pub use types::{
    ContentFile, DEFAULT_SECTIONS, FileOutcome, NavEntry, Section, display_title, title_case,
};
