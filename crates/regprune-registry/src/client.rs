//! Registry HTTP API V2 client for tag cleanup.
//!
//! Every method issues live requests and none of them retry. Failures are
//! reported to the caller.

use std::collections::BTreeSet;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK};
use reqwest::StatusCode;
use url::Url;

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::oci::{next_link, ErrorResponse, MediaType, TagList, CONTENT_DIGEST_HEADER};
use crate::outcome::DeletionOutcome;

/// Upper bound on followed tag list pages.
const MAX_TAG_PAGES: usize = 1000;

/// Client for listing and deleting tags in a V2 registry.
#[derive(Debug)]
pub struct RegistryClient {
    config: RegistryConfig,
    http: reqwest::Client,
}

impl RegistryClient {
    /// Creates a new registry client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use regprune_registry::{RegistryAuth, RegistryClient, RegistryConfig};
    ///
    /// let config = RegistryConfig::new("https://registry.example.com")
    ///     .with_auth(RegistryAuth::basic("dXNlcjpwYXNz"));
    /// let client = RegistryClient::new(config)?;
    /// # Ok::<(), regprune_registry::RegistryError>(())
    /// ```
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let http = Self::build_http_client(&config)?;
        Ok(Self { config, http })
    }

    /// Returns the registry configuration.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Lists all tags of a repository, sorted and deduplicated.
    ///
    /// Paginated responses are followed through their `Link` headers.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyRepository`] if the repository does not
    /// exist or has no tags, and a network or HTTP error if the listing
    /// cannot be retrieved.
    pub async fn list_tags(&self, repository: &str) -> Result<Vec<String>, RegistryError> {
        let mut url = self.config.endpoint(repository, "tags/list");
        let mut tags = BTreeSet::new();

        for page in 1..=MAX_TAG_PAGES {
            tracing::debug!(%url, page, "Listing tags");

            let response = self
                .http
                .get(&url)
                .headers(self.auth_headers()?)
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                break;
            }
            if !status.is_success() {
                return Err(Self::status_error(status, response).await);
            }

            let next = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(next_link)
                .map(|link| self.resolve_link(&url, link))
                .transpose()?;

            let tag_list: TagList = response.json().await?;
            tags.extend(tag_list.tags.unwrap_or_default());

            match next {
                Some(next_url) if next_url != url => url = next_url,
                _ => break,
            }
        }

        if tags.is_empty() {
            return Err(RegistryError::EmptyRepository {
                repository: repository.to_string(),
            });
        }

        tracing::info!(repository, count = tags.len(), "Listed tags");
        Ok(tags.into_iter().collect())
    }

    /// Resolves a tag to the digest of its manifest.
    ///
    /// Returns `Ok(None)` when the registry does not send a
    /// `Docker-Content-Digest` header, which is the case when the tag was
    /// removed after listing.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or on an error status other
    /// than 404.
    pub async fn resolve_digest(
        &self,
        repository: &str,
        tag: &str,
    ) -> Result<Option<String>, RegistryError> {
        let url = self.config.endpoint(repository, &format!("manifests/{tag}"));

        let response = self
            .http
            .get(&url)
            .headers(self.auth_headers()?)
            .header(ACCEPT, MediaType::DOCKER_MANIFEST_V2)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(Self::status_error(status, response).await);
        }

        let digest = response
            .headers()
            .get(CONTENT_DIGEST_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|digest| !digest.is_empty())
            .map(ToString::to_string);

        match digest {
            Some(ref digest) => tracing::debug!(repository, tag, %digest, "Resolved digest"),
            None => tracing::debug!(repository, tag, status = status.as_u16(), "No digest header"),
        }
        Ok(digest)
    }

    /// Deletes a manifest by digest.
    ///
    /// Only HTTP 202 counts as success; any other status is returned as
    /// [`DeletionOutcome::Failed`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the request could not be sent.
    pub async fn delete_manifest(
        &self,
        repository: &str,
        digest: &str,
    ) -> Result<DeletionOutcome, RegistryError> {
        let url = self
            .config
            .endpoint(repository, &format!("manifests/{digest}"));

        let response = self
            .http
            .delete(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::ACCEPTED {
            tracing::info!(repository, digest, "Deleted manifest");
            return Ok(DeletionOutcome::Deleted {
                digest: digest.to_string(),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let message = ErrorResponse::summarize(&body);
        tracing::warn!(
            repository,
            digest,
            status = status.as_u16(),
            detail = %message,
            "Manifest deletion rejected"
        );
        Ok(DeletionOutcome::Failed {
            status: status.as_u16(),
            message,
        })
    }

    /// Resolves a `Link` target against the page it came from.
    ///
    /// Requests carry the stored credential, so the target must share the
    /// registry's scheme, host and port.
    fn resolve_link(&self, current: &str, link: &str) -> Result<String, RegistryError> {
        let registry = Url::parse(&self.config.url).map_err(|_| RegistryError::InvalidUrl {
            url: self.config.url.clone(),
        })?;
        let next = Url::parse(current)
            .and_then(|base| base.join(link))
            .map_err(|_| RegistryError::InvalidUrl {
                url: link.to_string(),
            })?;

        if next.origin() != registry.origin() {
            tracing::warn!(
                link,
                registry = %self.config.url,
                "Pagination link leaves the registry"
            );
            return Err(RegistryError::UntrustedLink {
                link: next.to_string(),
            });
        }
        Ok(next.to_string())
    }

    async fn status_error(status: StatusCode, response: reqwest::Response) -> RegistryError {
        let body = response.text().await.unwrap_or_default();
        let message = ErrorResponse::summarize(&body);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            RegistryError::AuthenticationFailed {
                message: format!("registry answered {status}: {message}"),
            }
        } else {
            RegistryError::HttpError {
                status: status.as_u16(),
                message,
            }
        }
    }

    /// Builds the HTTP client with proper configuration.
    fn build_http_client(config: &RegistryConfig) -> Result<reqwest::Client, RegistryError> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().map_err(|e| RegistryError::ConnectionFailed {
            url: config.url.clone(),
            source: e,
        })
    }

    /// Creates authentication headers based on configuration.
    fn auth_headers(&self) -> Result<HeaderMap, RegistryError> {
        let mut headers = HeaderMap::new();

        if let Some(value) = self.config.auth.header_value() {
            let mut value =
                HeaderValue::from_str(&value).map_err(|_| RegistryError::AuthenticationFailed {
                    message: "Stored credential contains invalid header characters".to_string(),
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}
