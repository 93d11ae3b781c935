//! Data models used to size and align C primitive types.
//!
//! Alignment model: a primitive is aligned to its own size, capped at the
//! pointer width of the ABI. This matches the natural-alignment rules of the
//! mainstream System V and Windows ABIs for scalar types.

use std::{fmt, str::FromStr};

use crate::errors::LayoutError;

/// Target data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Abi {
    /// 64-bit Unix: `long` and pointers are 8 bytes.
    #[default]
    Lp64,
    /// 64-bit Windows: `long` stays 4 bytes, pointers are 8.
    Llp64,
    /// 32-bit: `int`, `long` and pointers are 4 bytes.
    Ilp32,
}

impl Abi {
    pub const fn pointer_width(self) -> usize {
        match self {
            Abi::Lp64 | Abi::Llp64 => 8,
            Abi::Ilp32 => 4,
        }
    }

    /// Largest alignment any primitive receives.
    pub const fn max_align(self) -> usize {
        self.pointer_width()
    }

    pub const fn long_size(self) -> usize {
        match self {
            Abi::Lp64 => 8,
            Abi::Llp64 | Abi::Ilp32 => 4,
        }
    }
}

impl FromStr for Abi {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lp64" => Ok(Abi::Lp64),
            "llp64" => Ok(Abi::Llp64),
            "ilp32" => Ok(Abi::Ilp32),
            _ => Err(LayoutError::UnknownName(s.to_string())),
        }
    }
}

impl fmt::Display for Abi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Abi::Lp64 => "LP64",
            Abi::Llp64 => "LLP64",
            Abi::Ilp32 => "ILP32",
        })
    }
}

/// C scalar types with ABI-dependent size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Primitive {
    Bool,
    Char,
    Short,
    Int,
    Long,
    LongLong,
    Float,
    Double,
    Pointer,
}

impl Primitive {
    pub const fn size(self, abi: Abi) -> usize {
        match self {
            Primitive::Bool | Primitive::Char => 1,
            Primitive::Short => 2,
            Primitive::Int | Primitive::Float => 4,
            Primitive::Long => abi.long_size(),
            Primitive::LongLong | Primitive::Double => 8,
            Primitive::Pointer => abi.pointer_width(),
        }
    }

    pub const fn align(self, abi: Abi) -> usize {
        let size = self.size(abi);
        let max = abi.max_align();
        if size < max { size } else { max }
    }

    /// C spelling of the type.
    pub const fn c_name(self) -> &'static str {
        match self {
            Primitive::Bool => "_Bool",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::LongLong => "long long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Pointer => "void *",
        }
    }
}

impl FromStr for Primitive {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bool" | "_bool" => Ok(Primitive::Bool),
            "char" => Ok(Primitive::Char),
            "short" => Ok(Primitive::Short),
            "int" => Ok(Primitive::Int),
            "long" => Ok(Primitive::Long),
            "long long" | "long_long" => Ok(Primitive::LongLong),
            "float" => Ok(Primitive::Float),
            "double" => Ok(Primitive::Double),
            "pointer" | "ptr" | "void *" => Ok(Primitive::Pointer),
            _ => Err(LayoutError::UnknownName(s.to_string())),
        }
    }
}
