//! Bit-level inspection and mutation of fixed-width unsigned values.
//!
//! Bits are addressed LSB-first: bit 0 is the least significant bit and bit
//! `width - 1` the most significant. Every operation returns a new
//! [BitValue]; nothing is mutated in place.

use std::fmt;

use crate::{
    errors::BitError,
    width::{Width, low_mask},
};

/// An unsigned integer together with the width it is considered to occupy.
///
/// The raw value is always masked to the width, so no bit at or above
/// `width.bits()` is ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitValue {
    raw: u64,
    width: Width,
}

impl BitValue {
    pub const fn new(raw: u64, width: Width) -> Self {
        BitValue {
            raw: raw & width.mask(),
            width,
        }
    }

    pub const fn raw(&self) -> u64 {
        self.raw
    }

    pub const fn width(&self) -> Width {
        self.width
    }

    fn check_index(&self, index: usize) -> Result<u64, BitError> {
        if index >= self.width.bits() {
            return Err(BitError::OutOfRange {
                index,
                width: self.width.bits(),
            });
        }

        Ok(1u64 << index)
    }

    fn with_raw(&self, raw: u64) -> Self {
        BitValue::new(raw, self.width)
    }

    /// Returns true if bit `index` is 1.
    pub fn get_bit(&self, index: usize) -> Result<bool, BitError> {
        let mask = self.check_index(index)?;
        Ok(self.raw & mask != 0)
    }

    pub fn set_bit(&self, index: usize) -> Result<Self, BitError> {
        let mask = self.check_index(index)?;
        Ok(self.with_raw(self.raw | mask))
    }

    pub fn clear_bit(&self, index: usize) -> Result<Self, BitError> {
        let mask = self.check_index(index)?;
        Ok(self.with_raw(self.raw & !mask))
    }

    pub fn toggle_bit(&self, index: usize) -> Result<Self, BitError> {
        let mask = self.check_index(index)?;
        Ok(self.with_raw(self.raw ^ mask))
    }

    fn check_range(&self, lo: usize, len: usize) -> Result<u64, BitError> {
        if len == 0 {
            return Err(BitError::EmptyRange);
        }

        let width = self.width.bits();
        match lo.checked_add(len) {
            Some(end) if end <= width => Ok(low_mask(len) << lo),
            _ => Err(BitError::OutOfRange {
                index: lo.saturating_add(len) - 1,
                width,
            }),
        }
    }

    /// Reads `len` bits starting at bit `lo`, shifted down to bit 0.
    pub fn get_range(&self, lo: usize, len: usize) -> Result<u64, BitError> {
        let mask = self.check_range(lo, len)?;
        Ok((self.raw & mask) >> lo)
    }

    /// Replaces `len` bits starting at bit `lo` with the low `len` bits of `bits`.
    pub fn set_range(&self, lo: usize, len: usize, bits: u64) -> Result<Self, BitError> {
        let mask = self.check_range(lo, len)?;
        let placed = (bits & low_mask(len)) << lo;
        Ok(self.with_raw((self.raw & !mask) | placed))
    }

    pub fn count_ones(&self) -> u32 {
        self.raw.count_ones()
    }

    /// Mirrors the bit order within the width: bit 0 swaps with bit `width - 1`.
    pub fn reverse_bits(&self) -> Self {
        self.with_raw(reverse_bits_n(self.raw, self.width.bits()))
    }

    /// Interprets the top bit of the width as a sign bit.
    pub fn sign_extend(&self) -> i64 {
        extend_sign(self.raw, self.width.bits())
    }

    pub fn is_power_of_two(&self) -> bool {
        is_power_of_two(self.raw)
    }

    /// True if every bit of `mask` (truncated to the width) is set.
    pub fn has_flags(&self, mask: u64) -> bool {
        let mask = mask & self.width.mask();
        self.raw & mask == mask
    }

    pub fn with_flags(&self, mask: u64) -> Self {
        self.with_raw(self.raw | mask)
    }

    pub fn without_flags(&self, mask: u64) -> Self {
        self.with_raw(self.raw & !mask)
    }

    /// Binary digits of the full width, MSB first, grouped every `group_size` bits.
    pub fn to_binary_string(&self, group_size: usize) -> String {
        render_binary(self.raw, self.width.bits(), group_size)
    }
}

impl From<u8> for BitValue {
    fn from(value: u8) -> Self {
        BitValue::new(value.into(), Width::W8)
    }
}

impl From<u16> for BitValue {
    fn from(value: u16) -> Self {
        BitValue::new(value.into(), Width::W16)
    }
}

impl From<u32> for BitValue {
    fn from(value: u32) -> Self {
        BitValue::new(value.into(), Width::W32)
    }
}

impl From<u64> for BitValue {
    fn from(value: u64) -> Self {
        BitValue::new(value, Width::W64)
    }
}

impl fmt::Display for BitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_binary_string(4))
    }
}

impl fmt::Binary for BitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.raw, f)
    }
}

/// Renders the low `width` bits of `value`, most significant first, with a
/// space every `group_size` bits counted from the least significant end.
/// A `group_size` of 0 disables grouping. Fails if `width` exceeds 64.
pub fn to_binary_string(value: u64, width: usize, group_size: usize) -> Result<String, BitError> {
    if width > 64 {
        return Err(BitError::OutOfRange { index: width, width: 64 });
    }

    Ok(render_binary(value, width, group_size))
}

fn render_binary(value: u64, width: usize, group_size: usize) -> String {
    let groups = if group_size == 0 { 0 } else { width / group_size };
    let mut out = String::with_capacity(width + groups);

    for index in (0..width).rev() {
        if group_size > 0 && !out.is_empty() && (index + 1) % group_size == 0 {
            out.push(' ');
        }
        out.push(if (value >> index) & 1 == 1 { '1' } else { '0' });
    }

    out
}

/// True iff `value` has exactly one bit set.
pub fn is_power_of_two(value: u64) -> bool {
    value > 0 && value & (value - 1) == 0
}

/// Sign-extends the low `bits` of `value` to a full `i64`. `bits` must be in `1..=64`.
pub fn sign_extend(value: u64, bits: usize) -> Result<i64, BitError> {
    if bits == 0 || bits > 64 {
        return Err(BitError::OutOfRange { index: bits, width: 64 });
    }

    Ok(extend_sign(value, bits))
}

fn extend_sign(value: u64, bits: usize) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Reverses the low `n` bits of `x` (LSB becomes MSB of the result).
pub fn reverse_bits_n(mut x: u64, n: usize) -> u64 {
    let mut r = 0u64;
    for _ in 0..n {
        r = (r << 1) | (x & 1);
        x >>= 1;
    }

    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_masks_to_width() {
        let value = BitValue::new(0x1FF, Width::W8);
        assert_eq!(value.raw(), 0xFF);
    }

    #[test]
    fn test_get_bit() {
        let value = BitValue::from(0b0000_0101u8);
        assert_eq!(value.get_bit(0), Ok(true));
        assert_eq!(value.get_bit(1), Ok(false));
        assert_eq!(value.get_bit(2), Ok(true));
    }

    #[test]
    fn test_get_bit_out_of_range() {
        let value = BitValue::from(0u8);
        assert_eq!(
            value.get_bit(8).unwrap_err(),
            BitError::OutOfRange { index: 8, width: 8 }
        );
    }

    #[test]
    fn test_set_clear_toggle() {
        let flags = BitValue::from(0u8);
        let flags = flags.set_bit(3).unwrap();
        assert_eq!(flags.raw(), 0b0000_1000);

        let flags = flags.toggle_bit(0).unwrap();
        assert_eq!(flags.raw(), 0b0000_1001);

        let flags = flags.clear_bit(3).unwrap();
        assert_eq!(flags.raw(), 0b0000_0001);
    }

    #[test]
    fn test_set_bit_top_of_width() {
        let value = BitValue::from(0u16).set_bit(15).unwrap();
        assert_eq!(value.raw(), 0x8000);
        assert!(value.set_bit(16).is_err());
    }

    #[test]
    fn test_get_range() {
        let value = BitValue::from(0xAB_CD_u16);
        assert_eq!(value.get_range(8, 8), Ok(0xAB));
        assert_eq!(value.get_range(0, 4), Ok(0xD));
    }

    #[test]
    fn test_set_range() {
        let value = BitValue::from(0x1234_5678u32);
        let value = value.set_range(8, 8, 0xFF).unwrap();
        assert_eq!(value.raw(), 0x1234_FF78);
    }

    #[test]
    fn test_set_range_ignores_excess_bits() {
        let value = BitValue::from(0u8).set_range(0, 4, 0xFF).unwrap();
        assert_eq!(value.raw(), 0x0F);
    }

    #[test]
    fn test_range_errors() {
        let value = BitValue::from(0u8);
        assert_eq!(value.get_range(0, 0), Err(BitError::EmptyRange));
        assert_eq!(
            value.get_range(4, 5),
            Err(BitError::OutOfRange { index: 8, width: 8 })
        );
        assert!(value.get_range(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_full_width_range() {
        let value = BitValue::from(u64::MAX);
        assert_eq!(value.get_range(0, 64), Ok(u64::MAX));
    }

    #[test]
    fn test_to_binary_string() {
        assert_eq!(to_binary_string(5, 8, 4).unwrap(), "0000 0101");
        assert_eq!(to_binary_string(5, 8, 0).unwrap(), "00000101");
        assert_eq!(to_binary_string(0x1FF, 8, 0).unwrap(), "11111111");
        assert_eq!(to_binary_string(0b10_1010_1010, 10, 4).unwrap(), "10 1010 1010");
        assert_eq!(to_binary_string(7, 0, 4).unwrap(), "");
    }

    #[test]
    fn test_to_binary_string_too_wide() {
        assert_eq!(
            to_binary_string(0, 65, 4).unwrap_err(),
            BitError::OutOfRange { index: 65, width: 64 }
        );
    }

    #[test]
    fn test_display_groups_nibbles() {
        assert_eq!(BitValue::from(0xA5u8).to_string(), "1010 0101");
        assert_eq!(BitValue::from(1u16).to_string(), "0000 0000 0000 0001");
    }

    #[test]
    fn test_is_power_of_two() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(64));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(15));
        assert!(BitValue::from(0x80u8).is_power_of_two());
    }

    #[test]
    fn test_flags() {
        const READ: u64 = 0b001;
        const WRITE: u64 = 0b010;
        const EXEC: u64 = 0b100;

        let perms = BitValue::from(0u8).with_flags(READ | WRITE);
        assert!(perms.has_flags(READ));
        assert!(perms.has_flags(READ | WRITE));
        assert!(!perms.has_flags(EXEC));

        let perms = perms.without_flags(WRITE);
        assert_eq!(perms.raw(), READ);
    }

    #[test]
    fn test_with_flags_truncates() {
        let value = BitValue::from(0u8).with_flags(0x1_01);
        assert_eq!(value.raw(), 0x01);
    }

    #[test]
    fn test_count_ones() {
        assert_eq!(BitValue::from(0b1011_0001u8).count_ones(), 4);
    }

    #[test]
    fn test_reverse_bits() {
        assert_eq!(BitValue::from(0b0000_0001u8).reverse_bits().raw(), 0b1000_0000);
        assert_eq!(BitValue::from(0x0001u16).reverse_bits().raw(), 0x8000);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0b11111111, 8), Ok(-1));
        assert_eq!(sign_extend(0b0111, 4), Ok(7));
        assert_eq!(sign_extend(u64::MAX, 64), Ok(-1));
        assert_eq!(BitValue::from(0x80u8).sign_extend(), -128);
        assert_eq!(BitValue::from(0x7Fu8).sign_extend(), 127);
        assert_eq!(BitValue::from(u64::MAX).sign_extend(), -1);
    }

    #[test]
    fn test_sign_extend_rejects_bad_widths() {
        assert_eq!(
            sign_extend(5, 0).unwrap_err(),
            BitError::OutOfRange { index: 0, width: 64 }
        );
        assert_eq!(
            sign_extend(5, 65).unwrap_err(),
            BitError::OutOfRange { index: 65, width: 64 }
        );
    }

    #[test]
    fn test_reverse_bits_n() {
        assert_eq!(reverse_bits_n(0b10101010, 8), 0b01010101);
    }
}
