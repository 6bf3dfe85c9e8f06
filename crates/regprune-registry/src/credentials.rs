//! Stored registry credentials.
//!
//! Credentials are read from a Docker-style `config.json`:
//!
//! ```json
//! { "auths": { "registry.example.com": { "auth": "dXNlcjpwYXNz" } } }
//! ```
//!
//! Only pre-encoded `auth` tokens are used; credential helpers and identity
//! tokens are not consulted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use serde::Deserialize;

use crate::config::RegistryAuth;
use crate::error::RegistryError;

#[derive(Debug, Default, Deserialize)]
struct CredentialDocument {
    #[serde(default)]
    auths: HashMap<String, Option<CredentialEntry>>,
}

#[derive(Debug, Deserialize)]
struct CredentialEntry {
    #[serde(default)]
    auth: Option<String>,
}

/// Read-only view of a local credential document.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    document: CredentialDocument,
}

impl CredentialStore {
    /// Returns the default credential document location:
    /// `$DOCKER_CONFIG/config.json`, else `~/.docker/config.json`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("DOCKER_CONFIG")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".docker")))
            .map(|dir| dir.join("config.json"))
    }

    /// Loads the credential document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| {
            RegistryError::CredentialStoreUnreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let document =
            serde_json::from_str(&contents).map_err(|source| RegistryError::CredentialStoreInvalid {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "Loaded credential store");
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    /// Path the store was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored authentication for a registry host.
    ///
    /// Entries are matched on `host`, `https://host`, `https://host/v1/` and
    /// `http://host`, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingCredentials`] if no entry exists or
    /// the entry's `auth` is null or empty.
    pub fn auth_for(&self, host: &str) -> Result<RegistryAuth, RegistryError> {
        let token = candidate_keys(host)
            .iter()
            .find_map(|key| {
                self.document
                    .auths
                    .get(key)
                    .and_then(Option::as_ref)
                    .and_then(|entry| entry.auth.as_deref())
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
            })
            .ok_or_else(|| RegistryError::MissingCredentials {
                host: host.to_string(),
            })?;

        match decoded_username(token) {
            Some(user) => tracing::info!(host, user = %user, "Using stored registry credential"),
            None => tracing::warn!(host, "Stored credential is not a base64 user:password pair"),
        }

        Ok(RegistryAuth::basic(token))
    }

    /// Returns the `Authorization` header value for a registry host.
    ///
    /// # Errors
    ///
    /// Fails like [`CredentialStore::auth_for`].
    pub fn auth_header(&self, host: &str) -> Result<String, RegistryError> {
        self.auth_for(host)?
            .header_value()
            .ok_or_else(|| RegistryError::MissingCredentials {
                host: host.to_string(),
            })
    }
}

fn candidate_keys(host: &str) -> [String; 4] {
    [
        host.to_string(),
        format!("https://{host}"),
        format!("https://{host}/v1/"),
        format!("http://{host}"),
    ]
}

fn decoded_username(token: &str) -> Option<String> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(token).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    decoded.split_once(':').map(|(user, _)| user.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store_with(json: &str) -> (tempfile::NamedTempFile, CredentialStore) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let store = CredentialStore::load(file.path()).unwrap();
        (file, store)
    }

    #[test]
    fn test_auth_header_for_host() {
        let (_file, store) =
            store_with(r#"{"auths": {"registry.example.com": {"auth": "dXNlcjpwYXNz"}}}"#);
        assert_eq!(
            store.auth_header("registry.example.com").unwrap(),
            "Basic dXNlcjpwYXNz"
        );
    }

    #[test]
    fn test_auth_header_with_scheme_key() {
        let (_file, store) =
            store_with(r#"{"auths": {"https://registry.example.com": {"auth": "dG9rZW4="}}}"#);
        assert_eq!(
            store.auth_header("registry.example.com").unwrap(),
            "Basic dG9rZW4="
        );
    }

    #[test]
    fn test_missing_host() {
        let (_file, store) = store_with(r#"{"auths": {"other.example.com": {"auth": "abc"}}}"#);
        let err = store.auth_header("registry.example.com").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MissingCredentials { ref host } if host == "registry.example.com"
        ));
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_null_entry_and_null_auth() {
        let (_file, store) = store_with(
            r#"{"auths": {
                "a.example.com": null,
                "b.example.com": {"auth": null},
                "c.example.com": {"auth": ""}
            }}"#,
        );
        assert!(store.auth_header("a.example.com").is_err());
        assert!(store.auth_header("b.example.com").is_err());
        assert!(store.auth_header("c.example.com").is_err());
    }

    #[test]
    fn test_document_without_auths() {
        let (_file, store) = store_with(r#"{"credsStore": "desktop"}"#);
        assert!(store.auth_for("registry.example.com").is_err());
    }

    #[test]
    fn test_unreadable_store() {
        let dir = tempfile::tempdir().unwrap();
        let err = CredentialStore::load(dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, RegistryError::CredentialStoreUnreadable { .. }));
    }

    #[test]
    fn test_invalid_json_store() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        let err = CredentialStore::load(file.path()).unwrap_err();
        assert!(matches!(err, RegistryError::CredentialStoreInvalid { .. }));
    }

    #[test]
    fn test_decoded_username() {
        assert_eq!(decoded_username("dXNlcjpwYXNz").as_deref(), Some("user"));
        assert_eq!(decoded_username("not base64!"), None);
    }
}
