//! Collaborator fault injection for the session state machines
//!
//! Uses a mock storage server to drive every Failed transition the sessions
//! can take, and checks the terminal states carry the right category.

use sealdrop_client::{
    ClientError, Config, DownloadOrchestrator, DownloadState, FilePayload, StorageClient,
    UploadOrchestrator, UploadState,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> StorageClient {
    StorageClient::new(Config::new(server.uri())).unwrap()
}

fn payload() -> FilePayload {
    FilePayload::new("hello.txt", &b"ten bytes!"[..])
}

#[tokio::test]
async fn upload_success_produces_link_with_decodable_fragment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "file-1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut session = UploadOrchestrator::new(client_for(&server));
    let link = session.run(payload()).await.unwrap();

    assert_eq!(session.state(), &UploadState::Done);
    assert_eq!(link.file_id, "file-1");
    assert!(link.to_url().starts_with(&format!("{}/download/file-1#", server.uri())));

    // The fragment must decode to exactly 32 raw key bytes
    use base64::Engine;
    let raw = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(&link.key_string)
        .unwrap();
    assert_eq!(raw.len(), 32);
}

#[tokio::test]
async fn upload_server_error_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .mount(&server)
        .await;

    let mut session = UploadOrchestrator::new(client_for(&server));
    let err = session.run(payload()).await.unwrap_err();

    assert!(matches!(err, ClientError::Server { status: 500, .. }));
    match session.state() {
        UploadState::Failed { category, .. } => assert_eq!(*category, "ServerError"),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_network_failure_is_terminal() {
    // Nothing is listening here
    let client = StorageClient::new(Config::new("http://127.0.0.1:1")).unwrap();
    let mut session = UploadOrchestrator::new(client);
    let err = session.run(payload()).await.unwrap_err();

    assert!(matches!(err, ClientError::Http(_)));
    match session.state() {
        UploadState::Failed { category, .. } => assert_eq!(*category, "NetworkFailure"),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_garbled_response_body_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let mut session = UploadOrchestrator::new(client_for(&server));
    let err = session.run(payload()).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn upload_session_is_single_use() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "file-1"})),
        )
        .mount(&server)
        .await;

    let mut session = UploadOrchestrator::new(client_for(&server));
    session.run(payload()).await.unwrap();
    let err = session.run(payload()).await.unwrap_err();
    assert!(matches!(err, ClientError::SessionConsumed));
}

#[tokio::test]
async fn download_not_found_is_resource_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/download/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/download/gone#{}", server.uri(), "A".repeat(43));
    let mut session = DownloadOrchestrator::new(client_for(&server));
    let err = session.run(&url).await.unwrap_err();

    assert!(err.is_not_found());
    match session.state() {
        DownloadState::Failed { category, .. } => assert_eq!(*category, "ResourceNotFound"),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn download_link_without_fragment_fails_before_any_request() {
    let server = MockServer::start().await;
    // No mocks mounted: a request would 404 loudly via expect/verify
    let url = format!("{}/download/some-id", server.uri());
    let mut session = DownloadOrchestrator::new(client_for(&server));
    let err = session.run(&url).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Crypto(sealdrop_crypto::CryptoError::MissingKey)
    ));
    match session.state() {
        DownloadState::Failed { category, .. } => assert_eq!(*category, "MissingKey"),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn download_missing_iv_header_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/download/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 26]))
        .mount(&server)
        .await;

    let url = format!("{}/download/f1#{}", server.uri(), "A".repeat(43));
    let mut session = DownloadOrchestrator::new(client_for(&server));
    let err = session.run(&url).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn download_malformed_key_string_is_invalid_key_format() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/download/f1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-iv", "0,1,2,3,4,5,6,7,8,9,10,11")
                .insert_header(
                    "content-disposition",
                    "attachment; filename=\"hello.txt.encrypted\"",
                )
                .set_body_bytes(vec![0u8; 26]),
        )
        .mount(&server)
        .await;

    // Fragment present but not 32 bytes of base64url
    let url = format!("{}/download/f1#short-key", server.uri());
    let mut session = DownloadOrchestrator::new(client_for(&server));
    let err = session.run(&url).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Crypto(sealdrop_crypto::CryptoError::InvalidKeyFormat(_))
    ));
    match session.state() {
        DownloadState::Failed { category, .. } => assert_eq!(*category, "InvalidKeyFormat"),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn download_wrong_key_is_authentication_failure() {
    // Ciphertext made under one key, fetched with a link carrying another
    let keys = sealdrop_crypto::KeyManager::default();
    let cipher = sealdrop_crypto::FileCipher::default();
    let real_key = keys.generate();
    let (ciphertext, iv) = cipher.encrypt(b"ten bytes!", &real_key).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/download/f1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-iv", iv.to_byte_list().as_str())
                .insert_header(
                    "content-disposition",
                    "attachment; filename=\"hello.txt.encrypted\"",
                )
                .set_body_bytes(ciphertext),
        )
        .mount(&server)
        .await;

    let wrong_key = keys.export(&keys.generate()).unwrap();
    let url = format!("{}/download/f1#{}", server.uri(), wrong_key);
    let mut session = DownloadOrchestrator::new(client_for(&server));
    let err = session.run(&url).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Crypto(sealdrop_crypto::CryptoError::AuthenticationFailure)
    ));
    match session.state() {
        DownloadState::Failed { category, message } => {
            assert_eq!(*category, "AuthenticationFailure");
            // The message must not disclose what was at fault
            assert!(!message.contains("key"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn key_fragment_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "file-1"})),
        )
        .mount(&server)
        .await;

    let mut session = UploadOrchestrator::new(client_for(&server));
    let link = session.run(payload()).await.unwrap();

    // No request the server saw may contain the key string
    for request in server.received_requests().await.unwrap() {
        assert!(!request.url.as_str().contains(&link.key_string));
        let body = String::from_utf8_lossy(&request.body);
        assert!(!body.contains(&link.key_string));
    }
}
