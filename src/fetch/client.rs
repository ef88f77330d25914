// src/fetch/client.rs
// =============================================================================
// Fetches one URL and returns the URLs of its children.
//
// The server answers GET <url> with:
//
//   { "children": [ { "url": "..." }, { "url": "..." } ] }
//
// plus a few fields we don't care about (result, root, token). serde simply
// skips fields that aren't in our structs.
//
// One call = one request. There are no retries: a failure goes straight back
// to the caller, which decides what to do with it.
// =============================================================================

use async_trait::async_trait;
use serde::Deserialize;
use tracing::trace;

use super::{Fetcher, Session};
use crate::error::CrawlError;

#[derive(Debug, Deserialize)]
struct CrawlResponse {
    children: Vec<ChildLink>,
}

#[derive(Debug, Deserialize)]
struct ChildLink {
    url: String,
}

/// GETs `url` through the session and returns its children, in server order.
pub async fn fetch_children(session: &Session, url: &str) -> Result<Vec<String>, CrawlError> {
    let transport = |source| CrawlError::Transport {
        url: url.to_string(),
        source,
    };

    let response = session.client().get(url).send().await.map_err(transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(transport)?;
    let children = parse_children(url, &body)?;

    trace!(url, children = children.len(), "fetched");
    Ok(children)
}

fn parse_children(url: &str, body: &[u8]) -> Result<Vec<String>, CrawlError> {
    let parsed: CrawlResponse = serde_json::from_slice(body).map_err(|source| CrawlError::Decode {
        url: url.to_string(),
        source,
    })?;

    Ok(parsed.children.into_iter().map(|child| child.url).collect())
}

#[async_trait]
impl Fetcher for Session {
    async fn fetch(&self, url: &str) -> Result<Vec<String>, CrawlError> {
        fetch_children(self, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::SessionConfig;
    use std::time::Duration;

    fn session_for(user: &str) -> Session {
        Session::open(&SessionConfig {
            identity: user.to_string(),
            timeout: Duration::from_secs(5),
            ..SessionConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_parse_keeps_server_order() {
        let body = br#"{
            "result": "valid",
            "root": { "token": "00", "url": "http://api/crawl/00/" },
            "children": [
                { "token": "02", "url": "http://api/crawl/02/" },
                { "token": "01", "url": "http://api/crawl/01/" }
            ]
        }"#;
        let children = parse_children("http://api/crawl/00/", body).unwrap();
        assert_eq!(children, vec!["http://api/crawl/02/", "http://api/crawl/01/"]);
    }

    #[test]
    fn test_parse_already_used_is_decode_error() {
        let err = parse_children("/x", br#"{ "result": "already-used" }"#).unwrap_err();
        assert!(matches!(err, CrawlError::Decode { .. }));
    }

    #[test]
    fn test_parse_child_without_url_is_decode_error() {
        let err = parse_children("/x", br#"{ "children": [ { "token": "01" } ] }"#).unwrap_err();
        assert!(matches!(err, CrawlError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_fetch_sends_identity_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/crawl/")
            .match_header("x-user", "tester")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "children": [ { "url": "/a" }, { "url": "/b" } ] }"#)
            .expect(1)
            .create_async()
            .await;

        let session = session_for("tester");
        let url = format!("{}/crawl/", server.url());
        let children = session.fetch(&url).await.unwrap();

        assert_eq!(children, vec!["/a", "/b"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/crawl/")
            .with_status(401)
            .with_body(r#"{ "error": "Missing authentification header" }"#)
            .create_async()
            .await;

        let url = format!("{}/crawl/", server.url());
        let err = fetch_children(&session_for("tester"), &url).await.unwrap_err();

        match err {
            CrawlError::Status { status, url: failed } => {
                assert_eq!(status, 401);
                assert_eq!(failed, url);
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/crawl/")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let url = format!("{}/crawl/", server.url());
        let err = fetch_children(&session_for("tester"), &url).await.unwrap_err();
        assert!(matches!(err, CrawlError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport_error() {
        // Port 1 is privileged and never has a listener in the test sandbox
        let err = fetch_children(&session_for("tester"), "http://127.0.0.1:1/crawl/")
            .await
            .unwrap_err();
        assert!(matches!(err, CrawlError::Transport { .. }));
    }
}
