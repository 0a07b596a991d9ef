//! Prefix masks shaped like an address of a given family.

use super::{Address, AddressError, Family};

/// Per-segment bitmask: 1 inside the prefix, 0 outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    family: Family,
    segments: Vec<u32>,
}

impl Mask {
    pub fn family(&self) -> Family {
        self.family
    }

    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    /// AND every segment of `address` with the mask.
    ///
    /// Returns `None` when the address belongs to the other family.
    pub fn apply(&self, address: &Address) -> Option<Vec<u32>> {
        if address.family() != self.family {
            return None;
        }
        Some(
            address
                .segments()
                .iter()
                .zip(&self.segments)
                .map(|(seg, mask)| seg & mask)
                .collect(),
        )
    }
}

/// Build the mask for `prefix_len` leading bits of `family`.
///
/// The first `prefix_len` of the family's bits are set and packed
/// most-significant-bit first into segments of the family's width.
///
/// # Examples
/// ```
/// use starlink_pop::models::{build_mask, Family};
/// assert_eq!(build_mask(20, Family::V4).unwrap().segments(), &[255, 255, 240, 0]);
/// assert!(build_mask(33, Family::V4).is_err());
/// ```
pub fn build_mask(prefix_len: i64, family: Family) -> Result<Mask, AddressError> {
    let total_bits = family.total_bits();
    if prefix_len < 0 || prefix_len > i64::from(total_bits) {
        return Err(AddressError::InvalidPrefixLength { prefix_len, family });
    }

    let segment_bits = family.segment_bits();
    let mut segments = vec![0u32; family.segment_count()];
    for bit in 0..total_bits {
        let idx = (bit / segment_bits) as usize;
        let flag = u32::from(i64::from(bit) < prefix_len);
        segments[idx] = (segments[idx] << 1) | flag;
    }

    Ok(Mask { family, segments })
}
