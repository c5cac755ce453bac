//! repin - Incremental Dependency Resolution Cache
//!
//! Hashes per-module Python requirement texts, re-resolves only the
//! modules that changed, and merges the results into one pinned set.

pub mod cache;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod hash;
pub mod pkgname;
pub mod resolver;

pub use error::{RepinError, RepinResult};
