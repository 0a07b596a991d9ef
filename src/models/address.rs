//! IPv4 and IPv6 address normalisation.
//!
//! Provides [`Address`], a fixed-width segment view of an IP literal, and
//! [`parse_address`] which produces it from text.

use super::AddressError;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Number of 16-bit groups in a full IPv6 address.
const IPV6_GROUPS: usize = 8;

/// Address family. Determines segment count and segment width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Total address width in bits (32 or 128).
    pub const fn total_bits(self) -> u32 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// Width of one segment in bits (8 or 16).
    pub const fn segment_bits(self) -> u32 {
        match self {
            Family::V4 => 8,
            Family::V6 => 16,
        }
    }

    /// Number of segments (4 or 8).
    pub const fn segment_count(self) -> usize {
        (self.total_bits() / self.segment_bits()) as usize
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// An IP address as a sequence of fixed-width segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    /// Four octets.
    V4([u8; 4]),
    /// Eight 16-bit groups.
    V6([u16; 8]),
}

impl Address {
    pub fn family(&self) -> Family {
        match self {
            Address::V4(_) => Family::V4,
            Address::V6(_) => Family::V6,
        }
    }

    /// Segments widened to `u32`, left to right.
    pub fn segments(&self) -> Vec<u32> {
        match self {
            Address::V4(octets) => octets.iter().map(|&o| u32::from(o)).collect(),
            Address::V6(groups) => groups.iter().map(|&g| u32::from(g)).collect(),
        }
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => Address::V4(v4.octets()),
            IpAddr::V6(v6) => Address::V6(v6.segments()),
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s)
    }
}

impl fmt::Display for Address {
    /// Dotted decimal for IPv4, uncompressed lowercase hex groups for IPv6.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Address::V4([a, b, c, d]) => write!(f, "{a}.{b}.{c}.{d}"),
            Address::V6(groups) => {
                let text: Vec<String> = groups.iter().map(|g| format!("{g:x}")).collect();
                write!(f, "{}", text.join(":"))
            }
        }
    }
}

/// Parse an IPv4 or IPv6 literal.
///
/// Text containing `:` is treated as IPv6, anything else as IPv4.
///
/// # Examples
/// ```
/// use starlink_pop::models::{parse_address, Address};
/// assert_eq!(parse_address("192.168.1.5").unwrap(), Address::V4([192, 168, 1, 5]));
/// assert_eq!(
///     parse_address("2606:4700::1").unwrap(),
///     Address::V6([0x2606, 0x4700, 0, 0, 0, 0, 0, 1])
/// );
/// ```
pub fn parse_address(text: &str) -> Result<Address, AddressError> {
    let text = text.trim();
    if text.contains(':') {
        parse_ipv6(text)
    } else {
        parse_ipv4(text)
    }
}

fn malformed(text: &str) -> AddressError {
    AddressError::MalformedAddress(text.to_string())
}

fn parse_ipv4(text: &str) -> Result<Address, AddressError> {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return Err(malformed(text));
    }

    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(&parts) {
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(text));
        }
        *octet = part.parse().map_err(|_| malformed(text))?;
    }
    Ok(Address::V4(octets))
}

fn parse_ipv6(text: &str) -> Result<Address, AddressError> {
    // Split around the elision token so its position is known exactly.
    let (head, tail) = match text.find("::") {
        Some(pos) => {
            let rest = &text[pos + 2..];
            if rest.contains("::") {
                return Err(malformed(text));
            }
            (&text[..pos], Some(rest))
        }
        None => (text, None),
    };

    let head_groups = parse_groups(head, text)?;
    let groups = match tail {
        None => head_groups,
        Some(tail) => {
            let tail_groups = parse_groups(tail, text)?;
            // `::` stands for at least one zero group
            if head_groups.len() + tail_groups.len() >= IPV6_GROUPS {
                return Err(malformed(text));
            }
            let mut groups = head_groups;
            groups.resize(IPV6_GROUPS - tail_groups.len(), 0);
            groups.extend(tail_groups);
            groups
        }
    };

    let segments: [u16; IPV6_GROUPS] = groups.try_into().map_err(|_| malformed(text))?;
    Ok(Address::V6(segments))
}

/// Parse a `:`-separated run of hex groups. An empty run has no groups.
fn parse_groups(run: &str, text: &str) -> Result<Vec<u16>, AddressError> {
    if run.is_empty() {
        return Ok(Vec::new());
    }
    run.split(':')
        .map(|group| {
            if group.is_empty() || group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return Err(malformed(text));
            }
            u16::from_str_radix(group, 16).map_err(|_| malformed(text))
        })
        .collect()
}
