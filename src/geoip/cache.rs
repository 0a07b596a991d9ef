//! Dated on-disk cache of the published JSON documents.
//!
//! Avoids fetching the feed on every CLI lookup; one file per document per day.

use super::fetch::{decode_json, fetch_json, FetchError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Read and decode a local JSON file.
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, FetchError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FetchError::Io {
            path: path.display().to_string(),
            source,
        })?;
    decode_json(&text, &path.display().to_string())
}

/// Cache file for `stem` on the current UTC day, e.g. `geoip_cache_2024-05-01.json`.
pub fn cache_file_name(cache_dir: &Path, stem: &str) -> PathBuf {
    let now = chrono::Utc::now();
    cache_dir.join(format!("{stem}_cache_{}.json", now.format("%Y-%m-%d")))
}

/// Read `stem` from today's cache file, or fetch `url` and write the cache.
pub async fn read_or_fetch_cached<T>(
    cache_dir: &Path,
    stem: &str,
    client: &reqwest::Client,
    url: &str,
) -> Result<T, Box<dyn Error>>
where
    T: DeserializeOwned + Serialize,
{
    let cache_file = cache_file_name(cache_dir, stem);

    if cache_file.exists() {
        log::info!("Reading from cache file: {}", cache_file.display());
        return Ok(read_json_file(&cache_file).await?);
    }

    log::warn!("Cache file not found: {}", cache_file.display());
    let data: T = fetch_json(client, url).await?;

    let json = serde_json::to_string(&data).map_err(|e| format!("Error serializing JSON: {e}"))?;
    log::warn!("Writing data to cache file: {}", cache_file.display());
    tokio::fs::create_dir_all(cache_dir)
        .await
        .map_err(|e| format!("Error creating cache dir {}: {e}", cache_dir.display()))?;
    tokio::fs::write(&cache_file, json)
        .await
        .map_err(|e| format!("Error writing cache file {}: {e}", cache_file.display()))?;

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoipData, PopRecord};
    use std::time::Duration;

    #[tokio::test]
    async fn test_read_json_file() {
        let data: GeoipData = read_json_file(Path::new("src/tests/test_data/geoip_test.json"))
            .await
            .expect("Error reading geoip test data");
        assert!(!data.valid.is_empty(), "Data should not be empty");
        assert!(data.valid.contains_key("US"), "Wrong country from test sample.");
    }

    #[tokio::test]
    async fn test_read_json_file_missing() {
        let result: Result<GeoipData, _> =
            read_json_file(Path::new("src/tests/test_data/does_not_exist.json")).await;
        assert!(matches!(result, Err(FetchError::Io { .. })));
    }

    #[tokio::test]
    async fn test_cached_file_is_used_without_fetching() {
        let dir = tempfile::tempdir().expect("Error creating temp dir");
        let cache_file = cache_file_name(dir.path(), "pop");
        std::fs::write(&cache_file, r#"[{"code": "sjc", "city": "San Jose"}]"#)
            .expect("Error writing cache file");

        let client = crate::geoip::build_client(Duration::from_secs(1)).unwrap();
        // URL is never contacted because today's cache exists.
        let pops: Vec<PopRecord> =
            read_or_fetch_cached(dir.path(), "pop", &client, "http://127.0.0.1:9/pop.json")
                .await
                .expect("Error reading cache");
        assert_eq!(pops.len(), 1);
        assert_eq!(pops[0].city, "San Jose");
    }

    #[test]
    fn test_cache_file_name() {
        let name = cache_file_name(Path::new("/tmp"), "geoip");
        let name = name.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("geoip_cache_"));
        assert!(name.ends_with(".json"));
        assert_eq!(name.len(), "geoip_cache_2024-05-01.json".len());
    }
}
