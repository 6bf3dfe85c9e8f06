//! Registry HTTP API V2 wire types.

use serde::Deserialize;

/// Media types sent to the registry.
pub struct MediaType;

impl MediaType {
    /// Docker image manifest, schema 2.
    pub const DOCKER_MANIFEST_V2: &'static str =
        "application/vnd.docker.distribution.manifest.v2+json";
}

/// Response header carrying a manifest's content digest.
pub const CONTENT_DIGEST_HEADER: &str = "Docker-Content-Digest";

/// Tag list response from registry.
#[derive(Debug, Clone, Deserialize)]
pub struct TagList {
    /// Repository name.
    #[serde(default)]
    pub name: String,

    /// List of tags. Some registries send `null` for an empty repository.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Error response from registry API.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// List of errors.
    #[serde(default)]
    pub errors: Vec<RegistryApiError>,
}

/// A single error entry in a registry error response.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryApiError {
    /// Error code (e.g. `MANIFEST_UNKNOWN`).
    pub code: String,

    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

impl ErrorResponse {
    /// Summarises a response body for error reporting. Falls back to the raw
    /// body when it is not a registry error document.
    #[must_use]
    pub fn summarize(body: &str) -> String {
        match serde_json::from_str::<Self>(body) {
            Ok(parsed) if !parsed.errors.is_empty() => parsed
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.code, e.message))
                .collect::<Vec<_>>()
                .join("; "),
            _ => body.trim().to_string(),
        }
    }
}

/// Extracts the `rel="next"` target from a `Link` header.
///
/// ```text
/// </v2/team/api/tags/list?last=1.0.9&n=100>; rel="next"
/// ```
#[must_use]
pub fn next_link(header: &str) -> Option<&str> {
    header.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        let is_next = params
            .split(';')
            .any(|p| p.trim().replace(' ', "") == "rel=\"next\"");
        if !is_next {
            return None;
        }
        target
            .trim()
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
    })
}
