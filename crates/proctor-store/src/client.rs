use crate::models::{Participant, Quiz};
use crate::{Result, StoreError};
use log::{debug, error, warn};
use std::time::Duration;

/// Retry configuration for store API calls
const MAX_RETRIES: u32 = 3;
const INITIAL_DELAY_MS: u64 = 200;
const BACKOFF_MULTIPLIER: f64 = 1.5;
const MAX_DELAY_MS: u64 = 10_000;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the record store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base project URL, including the protocol
    /// (e.g. `https://project.example.co`).
    pub base_url: String,
    /// API key, sent as both the `apikey` header and a bearer token.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// REST client for the quiz record store.
///
/// Speaks PostgREST-style endpoints (`/rest/v1/<table>`) authenticated
/// with an API key. All calls are retried with exponential backoff on
/// transient failures.
#[derive(Debug)]
pub struct StoreClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl StoreClient {
    /// Create a new store client.
    ///
    /// Validates the configuration up front: a missing or malformed URL or
    /// an empty API key is a configuration error, not something to
    /// discover on the first request.
    pub fn new(config: StoreConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(StoreError::ConfigurationError(
                "store URL is not set".to_string(),
            ));
        }

        let url = reqwest::Url::parse(&config.base_url).map_err(|e| {
            StoreError::ConfigurationError(format!(
                "invalid store URL {:?}: {} (include the protocol, e.g. https://project.example.co)",
                config.base_url, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(StoreError::ConfigurationError(format!(
                "unsupported store URL scheme {:?}",
                url.scheme()
            )));
        }

        if config.api_key.trim().is_empty() {
            return Err(StoreError::ConfigurationError(
                "store API key is not set".to_string(),
            ));
        }

        // reqwest::Client::builder().build() only fails if TLS backend
        // initialization fails, which is a system-level issue. Using expect()
        // here is acceptable -- there's no reasonable recovery path.
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("TLS backend initialization failed -- cannot create HTTP client");

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            client,
        })
    }

    /// Retry a store request with exponential backoff.
    ///
    /// Retries up to MAX_RETRIES times with exponential backoff starting
    /// at INITIAL_DELAY_MS and capped at MAX_DELAY_MS.
    async fn retry_request<F, Fut, T>(&self, request_fn: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut delay_ms = INITIAL_DELAY_MS;
        let mut last_error = None;

        for attempt in 0..=MAX_RETRIES {
            match request_fn().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if attempt < MAX_RETRIES {
                        warn!(
                            "store request failed (attempt {}/{}): {}, retrying in {}ms",
                            attempt + 1,
                            MAX_RETRIES + 1,
                            e,
                            delay_ms
                        );
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                        delay_ms = ((delay_ms as f64) * BACKOFF_MULTIPLIER).min(MAX_DELAY_MS as f64)
                            as u64;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.expect("retry loop must execute at least once"))
    }

    fn table_endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Decode a response body, separating transport failures from rows
    /// that do not match the table schema.
    fn decode_rows<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(StoreError::SerializationError)
    }

    /// Internal: single attempt at fetching the quiz table
    async fn fetch_quizzes_once(&self) -> Result<Vec<Quiz>> {
        let endpoint = self.table_endpoint("quizzes");

        let response = self
            .client
            .get(&endpoint)
            .query(&[("select", "*"), ("order", "created_at.asc")])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(StoreError::HttpError)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("store quizzes query error: {} - {}", status, error_text);
            return Err(StoreError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await.map_err(StoreError::HttpError)?;
        Self::decode_rows(&body)
    }

    /// Fetch all quiz questions, ordered by creation time.
    pub async fn fetch_quizzes(&self) -> Result<Vec<Quiz>> {
        debug!("store: fetching quizzes");
        let result = self.retry_request(|| self.fetch_quizzes_once()).await?;
        debug!("store: fetched {} quizzes", result.len());
        Ok(result)
    }

    /// Internal: single attempt at inserting a participant row
    async fn submit_participant_once(&self, participant: &Participant) -> Result<Participant> {
        let endpoint = self.table_endpoint("participants");

        let response = self
            .client
            .post(&endpoint)
            .json(participant)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(StoreError::HttpError)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("store participant insert error: {} - {}", status, error_text);
            return Err(StoreError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // PostgREST returns the inserted rows as an array
        let body = response.text().await.map_err(StoreError::HttpError)?;
        let mut rows: Vec<Participant> = Self::decode_rows(&body)?;
        rows.pop()
            .ok_or_else(|| StoreError::ApiError("insert returned no rows".to_string()))
    }

    /// Submit a participant result, returning the stored row with its
    /// assigned id and submission timestamp.
    pub async fn submit_participant(&self, participant: &Participant) -> Result<Participant> {
        debug!("store: submitting result for {}", participant.name);
        self.retry_request(|| self.submit_participant_once(participant))
            .await
    }

    /// Health check - verify the store endpoint is reachable.
    pub async fn health_check(&self) -> Result<()> {
        let endpoint = format!("{}/rest/v1/", self.base_url);

        let response = self
            .client
            .get(&endpoint)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(StoreError::HttpError)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::ApiError(format!(
                "health check failed: HTTP {}",
                response.status()
            )))
        }
    }
}
