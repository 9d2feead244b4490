//! Group visibility mask.

use serde::{Deserialize, Serialize};

/// A 16-bit group mask, exchanged as exactly two big-endian bytes.
///
/// # Examples
///
/// ```
/// use curator_core::GroupBits;
///
/// let bits = GroupBits::from_be_bytes([0x01, 0x02]);
/// assert_eq!(bits.bits(), 0x0102);
/// assert!(bits.intersects(GroupBits::new(0x0002)));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
#[display("{:#06x}", _0)]
pub struct GroupBits(u16);

impl GroupBits {
    /// Wrap a raw mask.
    pub const fn new(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw mask value.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Decode the two-byte big-endian form.
    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    /// Encode as two big-endian bytes.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Whether the masks share at least one bit.
    pub const fn intersects(self, other: GroupBits) -> bool {
        self.0 & other.0 != 0
    }
}
