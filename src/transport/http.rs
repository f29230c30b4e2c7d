use reqwest::Proxy;
use serde_json::Value;
use std::env;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::TransportError;

/// Fixed per-request timeout for provider calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client used by every provider driver.
///
/// Holds no per-request state, so one instance can be shared by concurrent
/// web requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().timeout(timeout);

        if let Ok(proxy_url) = env::var("QA_PROXY_URL") {
            if let Ok(proxy) = Proxy::all(&proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// POST a JSON body and return the response text of a 2xx reply.
    ///
    /// Connection failures and timeouts surface as [`TransportError::Http`]
    /// with the URL stripped, since some providers carry the API key in the
    /// query string. Any non-success status becomes [`TransportError::Status`]
    /// with the body kept for the error message only.
    pub async fn post_json(
        &self,
        url: Url,
        bearer: Option<&str>,
        request_id: Option<&str>,
        body: &Value,
    ) -> Result<String, TransportError> {
        debug!(host = url.host_str().unwrap_or_default(), path = url.path(), "POST");

        let mut req = self.client.post(url).json(body);

        if let Some(key) = bearer {
            req = req.bearer_auth(key);
        }
        if let Some(id) = request_id {
            req = req.header("x-request-id", id);
        }

        let response = req.send().await.map_err(redact)?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.text().await.map_err(redact)
    }
}

fn redact(e: reqwest::Error) -> TransportError {
    TransportError::Http(e.without_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_error_omits_query_string() {
        let transport = HttpTransport::new().unwrap();
        let url = Url::parse("http://127.0.0.1:1/v1/models/m:generateContent?key=SECRET-KEY-123")
            .unwrap();

        let err = transport
            .post_json(url, None, None, &serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Http(_)));
        let rendered = err.to_string();
        assert!(!rendered.contains("SECRET-KEY-123"), "{rendered}");
        assert!(!rendered.contains("key="), "{rendered}");
    }
}
