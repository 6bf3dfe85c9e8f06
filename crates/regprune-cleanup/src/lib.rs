//! # regprune Cleanup
//!
//! Orchestrates a tag cleanup run: list the repository's tags, decide each
//! tag's fate with [`regprune_core::RetentionEngine`], pass two confirmation
//! gates and delete the selected manifests by digest.
//!
//! The registry and the user are reached through two seams, [`TagRegistry`]
//! and [`Confirmer`], so that runs can be driven by the real
//! [`regprune_registry::RegistryClient`] and terminal prompts, or by test
//! doubles.
//!
//! Deleting a manifest does not free storage. The registry reclaims space
//! only when its garbage collector runs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod confirm;
mod error;
mod orchestrator;
mod registry;
mod report;
mod state;

pub use confirm::Confirmer;
pub use error::{CleanupError, Result};
pub use orchestrator::{CleanupOptions, CleanupOrchestrator};
pub use registry::TagRegistry;
pub use report::{CleanupReport, TagOutcome, TagResult};
pub use state::{AbortReason, CleanupState};
