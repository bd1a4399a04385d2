use super::{Credentials, RequestSigner, TransportError};
use crate::config::ClientConfig;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, Proxy, StatusCode};
use std::time::SystemTime;

/// Fully buffered response of a signed request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    /// Case-insensitive header lookup. Values that are not visible ASCII are
    /// treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Canonical reason phrase of the status (`"Forbidden"` for 403).
    pub fn reason(&self) -> &str {
        self.status.canonical_reason().unwrap_or("")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Signs each request with the client's credentials and executes it over a
/// pooled `reqwest::Client`.
pub struct SignedTransport {
    client: reqwest::Client,
    signer: RequestSigner,
}

impl SignedTransport {
    pub fn new(credentials: &Credentials, config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(config.pool_idle_timeout));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| TransportError::Other(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            signer: RequestSigner::new(credentials, &config.region, &config.service_name),
        })
    }

    /// Sign, send and buffer one request. Non-2xx statuses are not errors at
    /// this layer; the caller inspects `RawResponse::status`.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<RawResponse, TransportError> {
        let signing_headers =
            self.signer
                .sign(method.as_str(), url, headers, &body, SystemTime::now())?;

        let mut request = self.client.request(method.clone(), url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        for (name, value) in &signing_headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !body.is_empty() {
            request = request.body(body);
        }

        tracing::debug!(%method, url, region = self.signer.region(), "sending signed request");
        let response = request.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "response buffered");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
