//! # regprune Registry
//!
//! Registry HTTP API V2 client used by `regprune` to list and delete image
//! tags.
//!
//! ## Features
//!
//! - **Credential lookup**: pre-encoded tokens from a Docker `config.json`
//! - **Tag listing**: sorted, deduplicated, following `Link` pagination
//! - **Digest resolution**: `Docker-Content-Digest` of a tag's manifest
//! - **Manifest deletion**: by digest, success only on HTTP 202
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use regprune_registry::{CredentialStore, RegistryClient, RegistryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RegistryConfig::new("registry.example.com");
//!     let store = CredentialStore::load("/home/me/.docker/config.json")?;
//!     let config = config.clone().with_auth(store.auth_for(&config.host()?)?);
//!
//!     let client = RegistryClient::new(config)?;
//!     for tag in client.list_tags("team/api").await? {
//!         println!("{tag}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod client;
mod config;
mod credentials;
mod error;
mod oci;
mod outcome;

pub use client::RegistryClient;
pub use config::{RegistryAuth, RegistryConfig};
pub use credentials::CredentialStore;
pub use error::RegistryError;
pub use oci::{MediaType, TagList, CONTENT_DIGEST_HEADER};
pub use outcome::DeletionOutcome;
