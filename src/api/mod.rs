//! # Remote Data Clients
//!
//! Thin wrappers around the Quran and Hadith text services. Each call is one
//! request (or one pair of concurrent requests) shaped into domain types.
//! No retries, no caching.

pub mod hadith;
pub mod quran;

use std::fmt;

pub use hadith::{HadithClient, MAX_NARRATIONS};
pub use quran::QuranClient;

/// Errors from the text services.
#[derive(Debug)]
pub enum ApiError {
    /// Connection refused, DNS, body read failures.
    Network(String),
    /// Service answered with a non-success status.
    Api { status: u16, message: String },
    /// Body was not the JSON shape we read.
    Parse(String),
    /// Original-script and translation editions disagree on verse count.
    Mismatch { original: usize, translation: usize },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::Mismatch {
                original,
                translation,
            } => write!(
                f,
                "edition mismatch: {original} original verses, {translation} translated"
            ),
        }
    }
}

impl std::error::Error for ApiError {}

/// Sends a GET and decodes the JSON body, mapping failures onto `ApiError`.
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, ApiError> {
    log::debug!("GET {url}");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        log::warn!("GET {url} failed: {status} - {message}");
        return Err(ApiError::Api { status, message });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}
