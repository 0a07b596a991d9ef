//! CIDR subnets and membership testing.

use super::{build_mask, parse_address, Address, AddressError, Family};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// An address plus a prefix length valid for its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subnet {
    address: Address,
    prefix_len: u8,
}

impl Subnet {
    /// Create a subnet, rejecting prefix lengths outside `0..=total_bits`.
    pub fn new(address: Address, prefix_len: i64) -> Result<Subnet, AddressError> {
        let family = address.family();
        let prefix_len = u8::try_from(prefix_len)
            .ok()
            .filter(|&len| u32::from(len) <= family.total_bits())
            .ok_or(AddressError::InvalidPrefixLength { prefix_len, family })?;
        Ok(Subnet {
            address,
            prefix_len,
        })
    }

    /// The base address as written, host bits included.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn family(&self) -> Family {
        self.address.family()
    }

    /// True when `candidate` shares this subnet's prefix.
    pub fn contains(&self, candidate: &Address) -> bool {
        is_in_subnet(candidate, self)
    }
}

impl FromStr for Subnet {
    type Err = AddressError;

    /// Parse `addr/len`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (addr, len) = s
            .split_once('/')
            .ok_or_else(|| AddressError::MalformedCidr(s.to_string()))?;
        let address = parse_address(addr)?;
        let prefix_len: i64 = len
            .trim()
            .parse()
            .map_err(|_| AddressError::MalformedCidr(s.to_string()))?;
        Subnet::new(address, prefix_len)
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl Serialize for Subnet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Subnet {
    fn deserialize<D>(deserializer: D) -> Result<Subnet, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

/// Decide whether `candidate` lies inside `subnet`.
///
/// Addresses of different families never match. Prefix length 0 matches
/// every address of the family; the full width requires equality.
pub fn is_in_subnet(candidate: &Address, subnet: &Subnet) -> bool {
    if candidate.family() != subnet.family() {
        return false;
    }
    let Ok(mask) = build_mask(i64::from(subnet.prefix_len), subnet.family()) else {
        return false;
    };
    match (mask.apply(candidate), mask.apply(&subnet.address)) {
        (Some(masked_candidate), Some(masked_base)) => masked_candidate == masked_base,
        _ => false,
    }
}

/// Text form of [`is_in_subnet`]: parses `candidate` and `cidr` first.
///
/// # Examples
/// ```
/// use starlink_pop::models::is_in_subnet_str;
/// assert!(is_in_subnet_str("192.168.1.5", "192.168.1.0/24").unwrap());
/// assert!(!is_in_subnet_str("192.168.2.5", "192.168.1.0/24").unwrap());
/// assert!(is_in_subnet_str("2606:4700::1", "2606:4700::/32").unwrap());
/// ```
pub fn is_in_subnet_str(candidate: &str, cidr: &str) -> Result<bool, AddressError> {
    let candidate = parse_address(candidate)?;
    let subnet: Subnet = cidr.parse()?;
    Ok(is_in_subnet(&candidate, &subnet))
}
