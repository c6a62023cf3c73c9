// src/edgar/client.rs
use crate::utils::error::EdgarError;
use async_trait::async_trait;
use reqwest::header;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

// SEC asks for 10 requests/second max. Be conservative. >100ms delay.
pub const EDGAR_REQUEST_DELAY_MS: u64 = 150;

/// Body and headers of a successful (2xx) response.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub url: String,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

impl Fetched {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Issues GET requests against EDGAR. Non-2xx responses are errors; nothing is retried.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, query: &[(&str, String)]) -> Result<Fetched, EdgarError>;
}

/// reqwest-backed fetcher sending the mandatory User-Agent, with a global
/// minimum interval between consecutive requests.
pub struct EdgarClient {
    client: reqwest::Client,
    user_agent: String,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl EdgarClient {
    pub fn new(user_agent: &str, min_interval: Duration) -> Result<Self, EdgarError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent) // Set the required User-Agent
            .build()
            .map_err(EdgarError::Client)?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
            min_interval,
            last_request: Mutex::new(None),
        })
    }

    /// Waits until `min_interval` has elapsed since the previous request.
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl Fetcher for EdgarClient {
    async fn fetch(&self, url: &str, query: &[(&str, String)]) -> Result<Fetched, EdgarError> {
        self.throttle().await;

        tracing::debug!("GET {} {:?} (User-Agent: {})", url, query, self.user_agent);

        let mut request = self
            .client
            .get(url)
            // SEC uses various content types, but often text/html for filings
            .header(header::ACCEPT, "application/xml,text/html,text/plain,*/*");
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|source| EdgarError::Network {
            url: url.to_string(),
            source,
        })?;

        let final_url = response.url().to_string();
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("HTTP error status: {} for URL: {}", status, final_url);
            if status == reqwest::StatusCode::FORBIDDEN {
                tracing::warn!("Received 403 Forbidden - check User-Agent and rate limits.");
                return Err(EdgarError::RateLimited(final_url));
            }
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(EdgarError::NotFound(final_url));
            }
            return Err(EdgarError::Http { url: final_url, status });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(|source| EdgarError::Network {
            url: final_url.clone(),
            source,
        })?;
        tracing::debug!("Downloaded {} bytes from {}", body.len(), final_url);

        Ok(Fetched {
            url: final_url,
            body: body.to_vec(),
            content_type,
        })
    }
}
