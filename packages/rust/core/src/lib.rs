//! Maintenance passes over a documentation site tree.
//!
//! Section listing, title injection, navigation regeneration, and prefix
//! renaming. Each pass reads, computes, then writes; the text transforms
//! themselves are pure functions testable without a filesystem.

pub mod frontmatter;
pub mod nav;
pub mod notebooks;
pub mod progress;
pub mod rename;
pub mod sections;
pub mod titles;

pub use progress::{NoopProgress, ProgressReporter};
