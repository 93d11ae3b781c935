//! Error types for bit access, layout computation and channel packing.

use thiserror::Error;

/// Errors produced by the bit-level operations in [crate::bits].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitError {
    /// Bit index or bit range lies outside the declared width.
    #[error("bit index {index} out of range for width {width}")]
    OutOfRange { index: usize, width: usize },
    /// Bit count is not one of 8, 16, 32 or 64.
    #[error("unsupported bit width {0}")]
    UnsupportedWidth(usize),
    /// A bit range of zero length was requested.
    #[error("empty bit range")]
    EmptyRange,
}

/// Errors produced when computing a [crate::layout::LayoutReport].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Field has a size of zero bytes.
    #[error("field `{0}` has zero size")]
    InvalidFieldSize(String),
    /// Field alignment is zero or not a power of two.
    #[error("field `{name}` has alignment {alignment}, expected a power of two")]
    InvalidAlignment { name: String, alignment: usize },
    /// Two fields share a name.
    #[error("duplicate field name `{0}`")]
    DuplicateFieldName(String),
    /// Offsets or total size do not fit in `usize`.
    #[error("layout size overflows")]
    LayoutOverflow,
    /// Array field has zero elements.
    #[error("field `{0}` has zero elements")]
    InvalidArrayCount(String),
    /// ABI or primitive name is not recognized.
    #[error("unknown name `{0}`")]
    UnknownName(String),
}

/// Errors produced by [crate::color].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Channel value outside `[0, 255]`.
    #[error("channel value {0} outside 0..=255")]
    ChannelOutOfRange(i32),
    /// Channel name is not alpha, red, green or blue.
    #[error("unknown channel `{0}`")]
    UnknownChannel(String),
}
