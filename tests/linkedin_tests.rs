use std::net::SocketAddr;

use fraud_digest::core::models::DigestSecrets;
use fraud_digest::delivery::{LinkedInPoster, PostOutcome, SocialPoster};
use fraud_digest::errors::DigestError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

fn secrets() -> DigestSecrets {
    DigestSecrets {
        news_api_key: "news-key".to_string(),
        sender_email: Some("bot@example.com".to_string()),
        recipient_email: Some("a@example.com".to_string()),
        linkedin_access_token: Some("tok".to_string()),
        linkedin_author_urn: Some("urn:li:person:abc".to_string()),
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| i + 4)
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Serves one request with the given status line and body, returning the raw
/// request it received.
async fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if let Some(end) = find_header_end(&request) {
                let head = String::from_utf8_lossy(&request[..end]).to_string();
                if request.len() >= end + content_length(&head) {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&request).to_string()
    });
    (addr, handle)
}

#[tokio::test]
async fn forbidden_response_is_reported_as_rejected() {
    let (addr, server) = serve_once("403 Forbidden", "ACCESS_DENIED").await;
    let poster = LinkedInPoster::new(format!("http://{addr}/v2/ugcPosts"));

    let outcome = poster.publish(&secrets(), "hello").await.expect("publish");
    assert_eq!(
        outcome,
        PostOutcome::Rejected {
            status: 403,
            body: "ACCESS_DENIED".to_string(),
        }
    );

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /v2/ugcPosts "));
    let lower = request.to_ascii_lowercase();
    assert!(lower.contains("authorization: bearer tok"));
    assert!(lower.contains("x-restli-protocol-version: 2.0.0"));
    assert!(request.contains("urn:li:person:abc"));
    assert!(request.contains("hello"));
}

#[tokio::test]
async fn created_response_is_published() {
    let (addr, server) = serve_once("201 Created", "{}").await;
    let poster = LinkedInPoster::new(format!("http://{addr}/v2/ugcPosts"));

    let outcome = poster.publish(&secrets(), "hello").await.expect("publish");
    assert_eq!(outcome, PostOutcome::Published);
    server.await.unwrap();
}

#[tokio::test]
async fn missing_token_fails_without_a_request() {
    let mut incomplete = secrets();
    incomplete.linkedin_access_token = None;
    // Nothing listens on the discard port; a request would surface as HttpError.
    let poster = LinkedInPoster::new("http://127.0.0.1:9/v2/ugcPosts");

    let err = poster.publish(&incomplete, "hello").await.unwrap_err();
    assert!(matches!(err, DigestError::MissingSecret(ref key) if key == "LINKEDIN_ACCESS_TOKEN"));

    let mut incomplete = secrets();
    incomplete.linkedin_author_urn = None;
    let err = poster.publish(&incomplete, "hello").await.unwrap_err();
    assert!(matches!(err, DigestError::MissingSecret(ref key) if key == "LINKEDIN_AUTHOR_URN"));
}
