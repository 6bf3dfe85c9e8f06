//! The registry operations a cleanup run needs.

use async_trait::async_trait;
use regprune_registry::{DeletionOutcome, RegistryClient, RegistryError};

/// Registry operations used by [`crate::CleanupOrchestrator`].
#[async_trait]
pub trait TagRegistry: Send + Sync {
    /// Lists the tags of a repository in sorted order.
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>, RegistryError>;

    /// Resolves a tag to its manifest digest, `None` if the tag is gone.
    async fn resolve_digest(
        &self,
        repository: &str,
        tag: &str,
    ) -> Result<Option<String>, RegistryError>;

    /// Deletes a manifest by digest.
    async fn delete_manifest(
        &self,
        repository: &str,
        digest: &str,
    ) -> Result<DeletionOutcome, RegistryError>;
}

#[async_trait]
impl TagRegistry for RegistryClient {
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>, RegistryError> {
        Self::list_tags(self, repository).await
    }

    async fn resolve_digest(
        &self,
        repository: &str,
        tag: &str,
    ) -> Result<Option<String>, RegistryError> {
        Self::resolve_digest(self, repository, tag).await
    }

    async fn delete_manifest(
        &self,
        repository: &str,
        digest: &str,
    ) -> Result<DeletionOutcome, RegistryError> {
        Self::delete_manifest(self, repository, digest).await
    }
}
