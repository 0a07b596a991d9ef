//! Retrieval of the Starlink range dataset and PoP table.
//!
//! This module handles all I/O against the published feed:
//! - [`fetch`] - HTTP retrieval and JSON decoding
//! - [`cache`] - dated on-disk cache and local file reads
//! - [`source`] - remote or file-backed data source

mod cache;
mod fetch;
mod source;

// Re-export public types and functions
pub use cache::{cache_file_name, read_json_file, read_or_fetch_cached};
pub use fetch::{build_client, decode_json, fetch_datasets, fetch_json, FetchError};
pub use source::DataSource;
