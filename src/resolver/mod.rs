//! Incremental resolution engine
//!
//! The coordinator classifies modules by content hash, resolves the
//! changed ones through the `Resolver` capability, and merges results
//! with the cache. The pip-tools implementation is the production
//! resolver; tests substitute their own.

pub mod capability;
pub mod coordinator;
pub mod hooks;
pub mod install;
pub mod pip;

pub use capability::{OutdatedPackage, Resolver};
pub use coordinator::{Resolution, ResolutionCoordinator, DEFAULT_JOBS};
pub use hooks::{InstallHook, PostResolveHook, PreResolveHook, ResolverHooks};
pub use install::InstallationAdapter;
pub use pip::PipResolver;
