//! Fixed integer widths a [crate::bits::BitValue] can occupy.

use crate::errors::BitError;

/// Bit width of an unsigned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    pub const fn bits(self) -> usize {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    /// All-ones mask covering exactly this width.
    pub const fn mask(self) -> u64 {
        low_mask(self.bits())
    }

    /// Smallest width that holds `value` without truncation.
    pub fn fitting(value: u64) -> Self {
        match 64 - value.leading_zeros() {
            0..=8 => Width::W8,
            9..=16 => Width::W16,
            17..=32 => Width::W32,
            _ => Width::W64,
        }
    }
}

impl TryFrom<usize> for Width {
    type Error = BitError;

    fn try_from(bits: usize) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(Width::W8),
            16 => Ok(Width::W16),
            32 => Ok(Width::W32),
            64 => Ok(Width::W64),
            other => Err(BitError::UnsupportedWidth(other)),
        }
    }
}

impl Default for Width {
    fn default() -> Self {
        Width::W32
    }
}

/// Mask with the low `len` bits set; saturates at 64.
pub(crate) const fn low_mask(len: usize) -> u64 {
    if len >= 64 { u64::MAX } else { (1u64 << len) - 1 }
}
