use crate::errors::AppError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

/// Outcome of a provider fetch: a parsed payload, or `NotFound` for any
/// non-success status. Distinct from transport faults, which are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Success(T),
    NotFound,
}

impl<T> Fetched<T> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Fetched::NotFound)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Fetched::Success(value) => Some(value),
            Fetched::NotFound => None,
        }
    }
}

/// HTTP client for provider calls.
///
/// Single-shot: no retries and no timeout beyond the transport defaults.
/// Transport faults surface as errors; non-success statuses as `NotFound`.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch a URL and parse the body as JSON.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T>(&self, url: &str) -> Result<Fetched<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(AppError::NetworkError)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Provider returned non-success status");
            return Ok(Fetched::NotFound);
        }

        let text = response.text().await.map_err(AppError::NetworkError)?;
        let json: T = serde_json::from_str(&text).map_err(AppError::ParseError)?;

        info!("Request successful");
        Ok(Fetched::Success(json))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
