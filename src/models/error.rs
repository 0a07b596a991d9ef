//! Errors raised while normalising addresses and subnets.

use super::Family;

/// Failure to turn text into an [`Address`](super::Address) or [`Subnet`](super::Subnet).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// Text is neither a dotted-decimal IPv4 nor a colon-separated IPv6 literal.
    #[error("malformed address: {0:?}")]
    MalformedAddress(String),
    /// Prefix length is negative or wider than the address family.
    #[error("invalid prefix length {prefix_len} for {family}")]
    InvalidPrefixLength { prefix_len: i64, family: Family },
    /// CIDR text without a usable `/len` part.
    #[error("malformed CIDR: {0:?}")]
    MalformedCidr(String),
}
