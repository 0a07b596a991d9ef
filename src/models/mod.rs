//! Domain models for the Starlink PoP lookup.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Address`] - IPv4/IPv6 address as fixed-width segments
//! - [`Mask`] - prefix mask shaped like an address
//! - [`Subnet`] - CIDR subnet with membership testing
//! - [`GeoipData`] and [`PopRecord`] - the published range dataset and PoP table
//! - [`CfMetadata`] - visitor details from the Cloudflare proxy

mod address;
mod cf;
mod dataset;
mod error;
mod mask;
mod subnet;

// Re-export public types
pub use address::{parse_address, Address, Family};
pub use cf::CfMetadata;
pub use dataset::{CityMap, CityRanges, GeoipData, PopRecord, RangeEntry, RangeRecord, RegionMap};
pub use error::AddressError;
pub use mask::{build_mask, Mask};
pub use subnet::{is_in_subnet, is_in_subnet_str, Subnet};
