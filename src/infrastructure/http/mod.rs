// src/infrastructure/http/mod.rs
// Thin HTTPS GET client shared by the Yahoo repositories

use hyper::client::HttpConnector;
use hyper::header::{ACCEPT, USER_AGENT};
use hyper::{Body, Client, Request};
use hyper_tls::HttpsConnector;
use url::Url;

use crate::domain::errors::{ProviderError, ProviderResult};

/// Longest slice of a failed response body kept in the error message.
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_error(self) -> ProviderError {
        let message = self.body.chars().take(MAX_ERROR_BODY).collect();
        ProviderError::Http {
            status: self.status,
            message,
        }
    }
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client<HttpsConnector<HttpConnector>>,
    user_agent: String,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Self {
        let https = HttpsConnector::new();
        Self {
            client: Client::builder().build::<_, Body>(https),
            user_agent: user_agent.to_string(),
        }
    }

    /// GET `url` and return the status with the body as text. Non-2xx
    /// statuses are not errors here; callers decide what they mean.
    pub async fn get(&self, url: &Url) -> ProviderResult<HttpResponse> {
        let request = Request::get(url.as_str())
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, "application/json")
            .body(Body::empty())
            .map_err(|e| ProviderError::Network(format!("Invalid request for {}: {}", url, e)))?;

        log::debug!("GET {}", url);
        let response = self.client.request(request).await?;
        let status = response.status().as_u16();
        let bytes = hyper::body::to_bytes(response.into_body()).await?;
        let body = String::from_utf8(bytes.to_vec())
            .map_err(|e| ProviderError::Parse(format!("Response is not UTF-8: {}", e)))?;

        log::debug!("{} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }
}

/// Parse a configured base URL.
pub fn parse_base_url(base_url: &str) -> ProviderResult<Url> {
    Url::parse(base_url)
        .map_err(|e| ProviderError::Network(format!("Invalid base URL {}: {}", base_url, e)))
}
