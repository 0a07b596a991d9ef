//! Where the range dataset and PoP table come from.

use super::cache::read_json_file;
use super::fetch::{fetch_datasets, FetchError};
use crate::models::{GeoipData, PopRecord};
use std::path::PathBuf;

/// Origin of the two JSON documents needed for a lookup.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Published feed, fetched on every load.
    Remote {
        client: reqwest::Client,
        geoip_url: String,
        pop_url: String,
    },
    /// Local copies of both documents.
    Files { geoip_path: PathBuf, pop_path: PathBuf },
}

impl DataSource {
    /// Load both documents. Remote documents are fetched concurrently.
    pub async fn load(&self) -> Result<(GeoipData, Vec<PopRecord>), FetchError> {
        match self {
            DataSource::Remote {
                client,
                geoip_url,
                pop_url,
            } => fetch_datasets(client, geoip_url, pop_url).await,
            DataSource::Files {
                geoip_path,
                pop_path,
            } => {
                futures::try_join!(
                    read_json_file::<GeoipData>(geoip_path),
                    read_json_file::<Vec<PopRecord>>(pop_path),
                )
            }
        }
    }
}
