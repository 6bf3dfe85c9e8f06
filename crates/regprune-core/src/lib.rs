//! # regprune Core
//!
//! Retention rules and the decision engine behind `regprune`.
//!
//! This crate is free of I/O apart from reading a settings file. It provides:
//!
//! - [`VersionComparator`] - numeric ordering of `MAJOR.MINOR.PATCH` tags
//! - [`RetentionRules`] - suffix, version floor and exclusion configuration
//! - [`RetentionEngine`] - maps a tag to a [`Verdict`] and partitions tag lists
//! - [`Settings`] - typed `KEY=value` settings with layered merging
//!
//! ## Example
//!
//! ```rust
//! use regprune_core::{RetentionEngine, RetentionRules};
//!
//! let engine = RetentionEngine::new(
//!     RetentionRules::new()
//!         .with_suffixes(["-SNAPSHOT"])
//!         .with_min_version("2.0.0")
//!         .with_excluded(["latest"]),
//! );
//!
//! let partition = engine.partition(&["1.0.0", "2.0.0", "2.0.0-SNAPSHOT", "latest"]);
//! assert_eq!(partition.keep.len(), 2);
//! assert_eq!(partition.delete.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod decision;
pub mod engine;
pub mod error;
pub mod rules;
pub mod settings;
pub mod version;


pub use decision::{DeleteReason, KeepReason, Verdict};
pub use engine::{DeletionCandidate, KeptTag, Partition, RetentionEngine};
pub use error::{ConfigError, Result};
pub use rules::RetentionRules;
pub use settings::{split_list, Settings};
pub use version::VersionComparator;
