//! # Access Levels
//!
//! Discrete permission tiers and the bitmask encoding used to compare them.
//!
//! Each tier owns one bit, `1 << rank`. A requirement is turned into a mask
//! that keeps every bit at or above the required tier's bit, so a grant
//! passes exactly when its bit survives the mask.
//!
//! ```text
//! level    rank  bit         min mask
//! none     0     0b00000001  0b11111111
//! read     2     0b00000100  0b11111100
//! modify   4     0b00010000  0b11110000
//! delete   7     0b10000000  0b10000000
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitAnd;

/// Permission tier granted to a role on a resource.
///
/// Tiers are ordered by privilege:
/// - **None**: Denies everything
/// - **Read**: View the resource
/// - **Modify**: Read and change the resource
/// - **Delete**: Read, change and remove the resource
///
/// Ranks are not contiguous, but are strictly increasing and all below
/// [`AccessMask::BITS`], which keeps the mask encoding monotonic.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AccessLevel {
    /// No access.
    #[default]
    None = 0x0,

    /// Read-only access.
    Read = 0x2,

    /// Read and modify.
    Modify = 0x4,

    /// Read, modify and delete.
    Delete = 0x7,
}

impl AccessLevel {
    /// Get the integer rank of this level.
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Get the single bit this level occupies in an [`AccessMask`].
    pub const fn bit(self) -> u8 {
        1u8.rotate_left(self.rank() as u32)
    }

    /// Look up a level by its integer rank.
    ///
    /// Ranks outside the tier set (including anything at or beyond the
    /// mask width) are rejected rather than wrapped.
    ///
    /// # Example
    ///
    /// ```
    /// use rolegate::access::AccessLevel;
    ///
    /// assert_eq!(AccessLevel::from_rank(4), Some(AccessLevel::Modify));
    /// assert_eq!(AccessLevel::from_rank(3), None);
    /// assert_eq!(AccessLevel::from_rank(8), None);
    /// ```
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::all().into_iter().find(|level| level.rank() == rank)
    }

    /// Get the string representation of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::None => "none",
            AccessLevel::Read => "read",
            AccessLevel::Modify => "modify",
            AccessLevel::Delete => "delete",
        }
    }

    /// Parse level from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, supports aliases)
    ///
    /// # Returns
    ///
    /// `Some(AccessLevel)` if valid, `None` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use rolegate::access::AccessLevel;
    ///
    /// assert_eq!(AccessLevel::parse("read"), Some(AccessLevel::Read));
    /// assert_eq!(AccessLevel::parse("write"), Some(AccessLevel::Modify)); // Alias
    /// assert_eq!(AccessLevel::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" | "deny" => Some(AccessLevel::None),
            "read" | "view" => Some(AccessLevel::Read),
            "modify" | "write" | "update" | "edit" => Some(AccessLevel::Modify),
            "delete" | "remove" => Some(AccessLevel::Delete),
            _ => None,
        }
    }

    /// Get all levels, lowest first.
    pub fn all() -> [Self; 4] {
        [
            AccessLevel::None,
            AccessLevel::Read,
            AccessLevel::Modify,
            AccessLevel::Delete,
        ]
    }

    /// Check whether a grant at this level satisfies `required`.
    ///
    /// Plain rank comparison; always agrees with the mask test
    /// `AccessMask::min_level(required).permits(self)`.
    pub fn satisfies(self, required: AccessLevel) -> bool {
        self >= required
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unsigned 8-bit permission mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AccessMask(u8);

impl AccessMask {
    /// Width of the mask in bits; every level rank is below this.
    pub const BITS: u32 = u8::BITS;

    /// Build the mask accepting `level` and everything above it.
    pub const fn min_level(level: AccessLevel) -> Self {
        Self(!(level.bit().wrapping_sub(1)))
    }

    /// Wrap raw mask bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Get the raw mask bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether a grant at `granted` passes this mask.
    pub const fn permits(self, granted: AccessLevel) -> bool {
        self.0 & granted.bit() != 0
    }
}

impl BitAnd for AccessMask {
    type Output = AccessMask;

    fn bitand(self, rhs: Self) -> Self::Output {
        AccessMask(self.0 & rhs.0)
    }
}

impl From<AccessLevel> for AccessMask {
    fn from(level: AccessLevel) -> Self {
        AccessMask::min_level(level)
    }
}

impl fmt::Binary for AccessMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

/// Make an access mask with a minimal access level.
pub const fn min_access_level(level: AccessLevel) -> AccessMask {
    AccessMask::min_level(level)
}

// Every rank must fit in the mask for the rotation to stay monotonic.
const _: () = assert!((AccessLevel::Delete as u32) < AccessMask::BITS);
