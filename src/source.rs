//! Where snapshots come from.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};

use crate::error::FetchError;
use crate::types::Snapshot;

#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch and parse one complete feed document.
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError>;
}

/// Fetches the feed over HTTP, bypassing any intermediate caches.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        );
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .user_agent(concat!("ghtail/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

fn cache_buster() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[("cb", cache_buster())])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Reads the feed from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::File {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Pick an HTTP or file source based on the feed location.
pub fn from_location(location: &str, timeout: Duration) -> Result<Box<dyn DataSource>, FetchError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        let path = location.strip_prefix("file://").unwrap_or(location);
        Ok(Box::new(FileSource::new(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const FEED: &str = concat!(
        r#"{"last_updated":"2024-01-01T00:00:00Z","count":1,"#,
        r#""projects":[{"id":1,"name":"a","stargazers_count":30}]}"#
    );

    fn response(status: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Serve `reply` to a single connection and hand back the raw request head.
    async fn serve_once(reply: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.expect("read");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(reply.as_bytes()).await.expect("write");
            let _ = stream.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}/data/projects.json"), server)
    }

    fn http_source(url: &str) -> HttpSource {
        HttpSource::new(url, Duration::from_secs(5)).expect("client")
    }

    #[tokio::test]
    async fn http_source_parses_feed() {
        let (url, server) = serve_once(response("200 OK", "application/json", FEED)).await;
        let snapshot = http_source(&url).fetch_snapshot().await.expect("fetch");
        assert_eq!(snapshot.last_updated.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(snapshot.projects.len(), 1);
        server.await.expect("server");
    }

    #[tokio::test]
    async fn http_request_bypasses_caches() {
        let (url, server) = serve_once(response("200 OK", "application/json", FEED)).await;
        http_source(&url).fetch_snapshot().await.expect("fetch");

        let request = server.await.expect("server");
        let request_line = request.lines().next().unwrap_or_default();
        assert!(
            request_line.starts_with("GET /data/projects.json?cb="),
            "request line: {request_line}"
        );
        let head = request.to_lowercase();
        assert!(head.contains("cache-control: no-cache"), "request: {request}");
        assert!(head.contains("pragma: no-cache"), "request: {request}");
        assert!(head.contains("user-agent: ghtail/"), "request: {request}");
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let reply = response("500 Internal Server Error", "text/plain", "boom");
        let (url, server) = serve_once(reply).await;
        let err = http_source(&url)
            .fetch_snapshot()
            .await
            .expect_err("should fail");
        assert!(matches!(err, FetchError::Status(500)), "got {err:?}");
        server.await.expect("server");
    }

    #[tokio::test]
    async fn http_html_body_is_a_parse_error() {
        let reply = response("200 OK", "text/html", "<html>rate limited</html>");
        let (url, server) = serve_once(reply).await;
        let err = http_source(&url)
            .fetch_snapshot()
            .await
            .expect_err("should fail");
        assert!(matches!(err, FetchError::Parse(_)), "got {err:?}");
        server.await.expect("server");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        let err = http_source(&format!("http://{addr}/projects.json"))
            .fetch_snapshot()
            .await
            .expect_err("should fail");
        assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn location_picks_source_kind() {
        let timeout = Duration::from_secs(1);
        assert!(from_location("https://example.com/feed.json", timeout).is_ok());
        assert!(from_location("file:///tmp/feed.json", timeout).is_ok());
        assert!(from_location("feed.json", timeout).is_ok());
    }

    #[tokio::test]
    async fn file_source_reads_feed() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{FEED}").expect("write");

        let source = FileSource::new(file.path());
        let snapshot = source.fetch_snapshot().await.expect("fetch");
        assert_eq!(snapshot.last_updated.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(snapshot.projects.len(), 1);
    }

    #[tokio::test]
    async fn malformed_feed_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "<html>not json</html>").expect("write");

        let err = FileSource::new(file.path())
            .fetch_snapshot()
            .await
            .expect_err("should fail");
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_file_is_a_file_error() {
        let err = FileSource::new("/definitely/not/here.json")
            .fetch_snapshot()
            .await
            .expect_err("should fail");
        assert!(matches!(err, FetchError::File { .. }));
    }
}
