//! First-match classification of a client address against the range dataset.

use crate::models::{is_in_subnet, parse_address, Address, AddressError, GeoipData, RangeRecord, Subnet};
use serde::Serialize;

/// Outcome of scanning the dataset for one client address.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub matched: bool,
    /// Annotation of the matching range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Classification {
    pub fn no_match() -> Self {
        Self::default()
    }
}

/// Return the first record whose subnet contains `candidate`.
///
/// Records with an unparsable subnet or an out-of-range prefix are logged and
/// skipped; the scan carries on with the next record.
pub fn first_match<'a>(candidate: &Address, records: &'a [RangeRecord]) -> Option<&'a RangeRecord> {
    for record in records {
        let subnet: Subnet = match record.subnet.parse() {
            Ok(subnet) => subnet,
            Err(e) => {
                log::warn!(
                    "Skipping range '{}' ({}/{}/{}): {e}",
                    record.subnet,
                    record.country,
                    record.region,
                    record.city
                );
                continue;
            }
        };
        if is_in_subnet(candidate, &subnet) {
            log::debug!("{candidate} matched {subnet} -> {}", record.annotation);
            return Some(record);
        }
    }
    None
}

/// Parse `client` and return the first dataset record containing it.
///
/// An absent client address skips the scan and yields `None`, as does an
/// address no range contains. A malformed one is returned as an error.
pub fn match_client(
    client: Option<&str>,
    dataset: &GeoipData,
) -> Result<Option<RangeRecord>, AddressError> {
    let Some(text) = client else {
        log::debug!("No client address, skipping classification");
        return Ok(None);
    };
    let candidate = parse_address(text)?;
    let records = dataset.records();
    Ok(first_match(&candidate, &records).cloned())
}

/// Classify `client` against `dataset`.
///
/// An absent client address skips classification and reports no match. A
/// malformed one is returned as an error for the caller to present.
pub fn classify(client: Option<&str>, dataset: &GeoipData) -> Result<Classification, AddressError> {
    Ok(match match_client(client, dataset)? {
        Some(record) => Classification {
            matched: true,
            annotation: Some(record.annotation),
        },
        None => Classification::no_match(),
    })
}
