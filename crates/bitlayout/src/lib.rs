//! # bitlayout
//!
//! Small toolkit for looking at data the way the machine stores it.
//!
//! - [bits]: read, set, clear and toggle bits of fixed-width values and render
//!   them as grouped binary strings.
//! - [layout]: compute field offsets, padding and total size of a C-style
//!   record from declarative [field::FieldDescriptor]s under an explicit
//!   [abi::Abi], independent of the host compiler.
//! - [color]: pack and unpack 8-bit ARGB channels in a 32-bit word.
//!
//! Everything is a pure function over values; nothing allocates beyond the
//! returned report or string.
//!
//! ## Example
//!
//! ```
//! use bitlayout::abi::{Abi, Primitive};
//! use bitlayout::bits::{BitValue, to_binary_string};
//! use bitlayout::color;
//! use bitlayout::field::FieldDescriptor;
//! use bitlayout::layout::compute_layout;
//!
//! assert_eq!(to_binary_string(5, 8, 4).unwrap(), "0000 0101");
//! assert!(BitValue::from(0u8).set_bit(3).unwrap().get_bit(3).unwrap());
//!
//! let abi = Abi::Lp64;
//! let report = compute_layout(&[
//!     FieldDescriptor::primitive("c", Primitive::Char, abi),
//!     FieldDescriptor::primitive("d", Primitive::Double, abi),
//! ])
//! .unwrap();
//! assert_eq!(report.offsets(), vec![0, 8]);
//! assert_eq!(report.total_size(), 16);
//!
//! let word = color::pack(0, 255, 128, 192).unwrap();
//! assert_eq!(color::unpack(word).green, 128);
//! ```

pub mod abi;
pub mod bits;
pub mod color;
pub mod errors;
pub mod field;
pub mod layout;
#[cfg(feature = "serde")]
pub mod serde;
pub mod width;
