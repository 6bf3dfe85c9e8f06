//! Integration tests for the registry client against a mock V2 registry.
//!
//! Tests cover:
//! - Authorization header propagation
//! - Tag listing (sorting, pagination, empty and missing repositories)
//! - Digest resolution via `Docker-Content-Digest`
//! - Deletion status handling

use regprune_registry::{
    DeletionOutcome, RegistryAuth, RegistryClient, RegistryConfig, RegistryError,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPOSITORY: &str = "team/api";
const TOKEN: &str = "dXNlcjpwYXNz";
const MANIFEST_V2: &str = "application/vnd.docker.distribution.manifest.v2+json";

fn client_for(server: &MockServer) -> RegistryClient {
    let config = RegistryConfig::new(server.uri()).with_auth(RegistryAuth::basic(TOKEN));
    RegistryClient::new(config).expect("client")
}

#[tokio::test]
async fn test_list_tags_sorted_with_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/tags/list"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": REPOSITORY,
            "tags": ["latest", "2.0.0", "1.0.0", "2.0.0-SNAPSHOT", "1.0.0"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tags = client_for(&server).list_tags(REPOSITORY).await.unwrap();
    assert_eq!(tags, ["1.0.0", "2.0.0", "2.0.0-SNAPSHOT", "latest"]);
}

#[tokio::test]
async fn test_list_tags_follows_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/tags/list"))
        .and(query_param("last", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": REPOSITORY,
            "tags": ["c"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/tags/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", r#"</v2/team/api/tags/list?last=b&n=2>; rel="next""#)
                .set_body_json(serde_json::json!({
                    "name": REPOSITORY,
                    "tags": ["b", "a"]
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tags = client_for(&server).list_tags(REPOSITORY).await.unwrap();
    assert_eq!(tags, ["a", "b", "c"]);
}

#[tokio::test]
async fn test_list_tags_refuses_link_to_other_host() {
    let registry = MockServer::start().await;
    let other = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": REPOSITORY,
            "tags": ["z"]
        })))
        .expect(0)
        .mount(&other)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/tags/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    format!(r#"<{}/v2/team/api/tags/list?last=b>; rel="next""#, other.uri()),
                )
                .set_body_json(serde_json::json!({
                    "name": REPOSITORY,
                    "tags": ["a", "b"]
                })),
        )
        .expect(1)
        .mount(&registry)
        .await;

    let err = client_for(&registry).list_tags(REPOSITORY).await.unwrap_err();

    assert!(matches!(err, RegistryError::UntrustedLink { .. }));
    let received = other.received_requests().await.unwrap_or_default();
    assert!(received.is_empty(), "credential sent to {}", other.uri());
}

#[tokio::test]
async fn test_list_tags_empty_repository() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/tags/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": REPOSITORY,
            "tags": null
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).list_tags(REPOSITORY).await.unwrap_err();
    assert!(matches!(
        err,
        RegistryError::EmptyRepository { ref repository } if repository == REPOSITORY
    ));
}

#[tokio::test]
async fn test_list_tags_unknown_repository() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/tags/list"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{"code": "NAME_UNKNOWN", "message": "repository name not known to registry"}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).list_tags(REPOSITORY).await.unwrap_err();
    assert!(matches!(err, RegistryError::EmptyRepository { .. }));
}

#[tokio::test]
async fn test_list_tags_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/tags/list"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_tags(REPOSITORY).await.unwrap_err();
    assert!(matches!(
        err,
        RegistryError::HttpError { status: 503, ref message } if message == "maintenance"
    ));
    assert!(err.is_network_error());
}

#[tokio::test]
async fn test_list_tags_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/tags/list"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errors": [{"code": "UNAUTHORIZED", "message": "authentication required"}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).list_tags(REPOSITORY).await.unwrap_err();
    assert!(err.is_auth_error());
    assert!(err.to_string().contains("UNAUTHORIZED"));
}

#[tokio::test]
async fn test_list_tags_connection_refused() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = RegistryClient::new(RegistryConfig::new(uri)).unwrap();
    let err = client.list_tags(REPOSITORY).await.unwrap_err();
    assert!(matches!(err, RegistryError::ConnectionFailed { .. }));
}

#[tokio::test]
async fn test_resolve_digest_reads_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/manifests/1.0.0"))
        .and(header("accept", MANIFEST_V2))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Docker-Content-Digest", "sha256:aaaa")
                .set_body_string("{}"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let digest = client_for(&server)
        .resolve_digest(REPOSITORY, "1.0.0")
        .await
        .unwrap();
    assert_eq!(digest.as_deref(), Some("sha256:aaaa"));
}

#[tokio::test]
async fn test_resolve_digest_missing_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/manifests/1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let digest = client_for(&server)
        .resolve_digest(REPOSITORY, "1.0.0")
        .await
        .unwrap();
    assert!(digest.is_none());
}

#[tokio::test]
async fn test_resolve_digest_tag_gone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/manifests/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let digest = client_for(&server)
        .resolve_digest(REPOSITORY, "gone")
        .await
        .unwrap();
    assert!(digest.is_none());
}

#[tokio::test]
async fn test_resolve_digest_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/manifests/1.0.0"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client_for(&server).resolve_digest(REPOSITORY, "1.0.0").await;
    assert!(matches!(result, Err(RegistryError::HttpError { status: 500, .. })));
}

#[tokio::test]
async fn test_delete_manifest_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/team/api/manifests/sha256:aaaa"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .delete_manifest(REPOSITORY, "sha256:aaaa")
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DeletionOutcome::Deleted {
            digest: "sha256:aaaa".to_string()
        }
    );
}

#[tokio::test]
async fn test_delete_manifest_only_202_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/team/api/manifests/sha256:bbbb"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .delete_manifest(REPOSITORY, "sha256:bbbb")
        .await
        .unwrap();
    assert!(matches!(outcome, DeletionOutcome::Failed { status: 200, .. }));
}

#[tokio::test]
async fn test_delete_manifest_unsupported() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/team/api/manifests/sha256:cccc"))
        .respond_with(ResponseTemplate::new(405).set_body_json(serde_json::json!({
            "errors": [{"code": "UNSUPPORTED", "message": "The operation is unsupported."}]
        })))
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .delete_manifest(REPOSITORY, "sha256:cccc")
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DeletionOutcome::Failed {
            status: 405,
            message: "UNSUPPORTED: The operation is unsupported.".to_string()
        }
    );
}
