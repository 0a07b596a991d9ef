//! Starlink PoP lookup.
//!
//! Classifies a client IP address against the published Starlink range
//! dataset and reports the point of presence it is served from.

pub mod config;
pub mod geoip;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;
pub mod server;

use config::Config;
use geoip::{build_client, read_json_file, read_or_fetch_cached, DataSource};
use models::{GeoipData, PopRecord};
use std::error::Error;
use std::path::PathBuf;

pub use processing::{classify, lookup, Classification, Lookup};

/// Where the `lookup` command reads its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupData {
    /// Local copies of both documents.
    Files { geoip_path: PathBuf, pop_path: PathBuf },
    /// Today's cache files in `config.cache_dir`, fetched when missing.
    Cached,
    /// Published feed, bypassing the cache.
    Remote,
}

/// Build the data source the server loads on every request.
pub fn remote_source(config: &Config) -> Result<DataSource, Box<dyn Error>> {
    Ok(DataSource::Remote {
        client: build_client(config.fetch_timeout)?,
        geoip_url: config.geoip_url.clone(),
        pop_url: config.pop_url.clone(),
    })
}

/// Load the range dataset and PoP table for a one-off lookup.
pub async fn load_lookup_data(
    config: &Config,
    data: &LookupData,
) -> Result<(GeoipData, Vec<PopRecord>), Box<dyn Error>> {
    match data {
        LookupData::Files {
            geoip_path,
            pop_path,
        } => Ok(futures::try_join!(
            read_json_file::<GeoipData>(geoip_path),
            read_json_file::<Vec<PopRecord>>(pop_path),
        )?),
        LookupData::Cached => {
            let client = build_client(config.fetch_timeout)?;
            futures::try_join!(
                read_or_fetch_cached::<GeoipData>(
                    &config.cache_dir,
                    "geoip",
                    &client,
                    &config.geoip_url
                ),
                read_or_fetch_cached::<Vec<PopRecord>>(
                    &config.cache_dir,
                    "pop",
                    &client,
                    &config.pop_url
                ),
            )
        }
        LookupData::Remote => {
            let client = build_client(config.fetch_timeout)?;
            Ok(geoip::fetch_datasets(&client, &config.geoip_url, &config.pop_url).await?)
        }
    }
}
