//! HTTP(S) source backed by `reqwest`.

use async_trait::async_trait;

use crate::config::SourceConfig;

use super::{SourceError, TextSource};

/// Fetches the speech text with a `GET` request.
///
/// A response outside the 2xx range is reported as [`SourceError::Status`]
/// and the body is ignored.
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    /// Build an `HttpSource` from the source config.
    ///
    /// The client carries the per-request timeout from `timeout_secs`.  If the
    /// builder fails, a default client without a timeout is used instead.
    pub fn from_config(config: &SourceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self::with_client(client, config.location.trim())
    }

    /// Use an already configured client.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TextSource for HttpSource {
    async fn load(&self) -> Result<String, SourceError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("source: {} answered {status}", self.url);
            return Err(SourceError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response on a loopback port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}/speech.txt")
    }

    fn direct_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn ok_response_returns_body() {
        let url = serve_once("200 OK", "Hello there. General Kenobi!").await;
        let source = HttpSource::with_client(direct_client(), url);

        assert_eq!(source.load().await.unwrap(), "Hello there. General Kenobi!");
    }

    #[tokio::test]
    async fn not_found_is_a_status_error() {
        let url = serve_once("404 Not Found", "missing").await;
        let source = HttpSource::with_client(direct_client(), url);

        assert_eq!(source.load().await, Err(SourceError::Status(404)));
    }

    #[tokio::test]
    async fn refused_connection_is_a_request_error() {
        // Bind then drop to get a port nothing listens on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let source = HttpSource::with_client(direct_client(), format!("http://{addr}/"));

        assert!(matches!(source.load().await, Err(SourceError::Request(_))));
    }

    #[test]
    fn from_config_trims_location() {
        let config = SourceConfig {
            location: "  https://example.com/speech.txt ".into(),
            timeout_secs: 5,
        };
        assert_eq!(HttpSource::from_config(&config).url, "https://example.com/speech.txt");
    }
}
