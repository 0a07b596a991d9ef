//! Classification enriched with the PoP and dataset location of the match.

use super::{match_client, pop_city, pop_code};
use crate::models::{AddressError, GeoipData, PopRecord};
use serde::Serialize;

/// Everything known about a client address after the dataset scan.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookup {
    pub client: Option<String>,
    pub matched: bool,
    /// Annotation (reverse DNS name) of the matching range.
    pub annotation: Option<String>,
    pub pop_code: Option<String>,
    pub pop_city: Option<String>,
    /// `[country, region, city]` the matching range is filed under.
    pub location: Option<[String; 3]>,
}

/// Classify `client` and resolve the PoP of the matching range.
pub fn lookup(
    client: Option<&str>,
    dataset: &GeoipData,
    pops: &[PopRecord],
) -> Result<Lookup, AddressError> {
    let client_text = client.map(|text| text.trim().to_string());
    let Some(record) = match_client(client, dataset)? else {
        if let Some(text) = &client_text {
            log::info!("{text} is not in any Starlink range");
        }
        return Ok(Lookup {
            client: client_text,
            ..Default::default()
        });
    };

    let code = pop_code(&record.annotation);
    let city = code.and_then(|code| pop_city(code, pops));
    if city.is_none() {
        log::warn!(
            "No PoP city for annotation '{}' (code {:?})",
            record.annotation,
            code
        );
    }
    log::info!(
        "{} matched {} at PoP {}",
        client_text.as_deref().unwrap_or_default(),
        record.subnet,
        city.unwrap_or("unknown")
    );

    Ok(Lookup {
        client: client_text,
        matched: true,
        annotation: Some(record.annotation.clone()),
        pop_code: code.map(str::to_string),
        pop_city: city.map(str::to_string),
        location: Some([record.country, record.region, record.city]),
    })
}
