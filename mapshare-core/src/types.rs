// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! All types validate their invariants at creation time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest supported region: half of `i64::MAX`, leaving headroom for
/// `base + offset` arithmetic.
pub const MAX_SIZE: u64 = (i64::MAX / 2) as u64;

/// Size argument meaning "use the length of the existing file".
pub const INFER_SIZE: i64 = -1;

/// Validated region size in bytes: `0 < size <= MAX_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RegionSize(u64);

impl RegionSize {
    pub fn new(bytes: u64) -> Result<Self, ConfigError> {
        if bytes == 0 || bytes > MAX_SIZE {
            return Err(ConfigError::SizeOutOfBounds {
                size: bytes as i128,
                max: MAX_SIZE,
            });
        }
        Ok(Self(bytes))
    }

    /// Validate a signed size. Negative values are always rejected; the
    /// `INFER_SIZE` sentinel is handled by the caller before this point.
    pub fn from_signed(bytes: i64) -> Result<Self, ConfigError> {
        if bytes <= 0 {
            return Err(ConfigError::SizeOutOfBounds {
                size: bytes as i128,
                max: MAX_SIZE,
            });
        }
        Self::new(bytes as u64)
    }

    /// Create without validation. Only for sizes known to be in range.
    pub(crate) const fn new_unchecked(bytes: u64) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> u64 {
        self.0
    }

    /// Size as a mapping length. Fails on targets where it does not fit `usize`.
    pub fn to_len(&self) -> Result<usize, ConfigError> {
        usize::try_from(self.0).map_err(|_| ConfigError::InvalidFieldValue {
            field: "size",
            value: self.0.to_string(),
            reason: "Does not fit in the address space of this platform".to_string(),
        })
    }
}

impl fmt::Display for RegionSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 1024 * 1024 && self.0 % (1024 * 1024) == 0 {
            write!(f, "{}MB", self.0 / (1024 * 1024))
        } else if self.0 >= 1024 && self.0 % 1024 == 0 {
            write!(f, "{}KB", self.0 / 1024)
        } else {
            write!(f, "{}B", self.0)
        }
    }
}

impl TryFrom<u64> for RegionSize {
    type Error = ConfigError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RegionSize> for u64 {
    fn from(size: RegionSize) -> Self {
        size.0
    }
}
