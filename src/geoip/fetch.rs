//! HTTP retrieval of the range dataset and PoP table.

use crate::models::{GeoipData, PopRecord};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Failure to obtain or decode one of the JSON documents.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("error building HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("error parsing JSON from {origin}: path={path} error={message}")]
    Json {
        origin: String,
        path: String,
        message: String,
    },
    #[error("error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Build the shared HTTP client with the configured timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(FetchError::Client)
}

/// Decode `text` reporting the JSON path of the first mismatch.
pub fn decode_json<T: DeserializeOwned>(text: &str, origin: &str) -> Result<T, FetchError> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| FetchError::Json {
        origin: origin.to_string(),
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

/// GET `url` and decode the body as `T`.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, FetchError> {
    log::debug!("GET {url}");
    let http_err = |source| FetchError::Http {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(http_err)?;
    let status = response.status();
    if !status.is_success() {
        log::warn!("{url} returned {status}");
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }
    let body = response.text().await.map_err(http_err)?;
    log::debug!("{url} returned {} bytes", body.len());

    decode_json(&body, url)
}

/// Fetch the range dataset and the PoP table concurrently.
pub async fn fetch_datasets(
    client: &reqwest::Client,
    geoip_url: &str,
    pop_url: &str,
) -> Result<(GeoipData, Vec<PopRecord>), FetchError> {
    futures::try_join!(
        fetch_json::<GeoipData>(client, geoip_url),
        fetch_json::<Vec<PopRecord>>(client, pop_url),
    )
}
