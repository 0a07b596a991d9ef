//! Range dataset and PoP table as published in the starlink-geoip-data feed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `city -> ranges`
pub type CityMap = BTreeMap<String, CityRanges>;
/// `region -> city -> ranges`
pub type RegionMap = BTreeMap<String, CityMap>;

/// The `geoip-latest.json` document.
///
/// Only the `valid` directory is used; other top-level keys are ignored.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct GeoipData {
    /// `country -> region -> city -> ranges`
    #[serde(default)]
    pub valid: BTreeMap<String, RegionMap>,
}

/// Ranges announced for one city.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct CityRanges {
    #[serde(default)]
    pub ips: Vec<RangeEntry>,
}

/// One `[cidr, annotation]` pair, e.g. `["14.1.64.0/24", "customer.sjc.pop.starlinkisp.net"]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RangeEntry(pub String, pub String);

/// Flattened dataset row.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RangeRecord {
    /// CIDR as published. Parsed at scan time.
    pub subnet: String,
    pub annotation: String,
    pub country: String,
    pub region: String,
    pub city: String,
}

impl GeoipData {
    /// Flatten the nested directory.
    ///
    /// Countries, regions and cities come out in key order, ranges within a
    /// city in listed order.
    pub fn records(&self) -> Vec<RangeRecord> {
        let mut records = Vec::new();
        for (country, regions) in &self.valid {
            for (region, cities) in regions {
                for (city, ranges) in cities {
                    records.extend(ranges.ips.iter().map(|RangeEntry(subnet, annotation)| {
                        RangeRecord {
                            subnet: subnet.clone(),
                            annotation: annotation.clone(),
                            country: country.clone(),
                            region: region.clone(),
                            city: city.clone(),
                        }
                    }));
                }
            }
        }
        records
    }
}

/// One `pop.json` row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PopRecord {
    pub code: String,
    #[serde(default)]
    pub city: String,
}
