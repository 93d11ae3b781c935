//! Definition of the record members fed to [crate::layout::compute_layout].

use crate::{
    abi::{Abi, Primitive},
    errors::LayoutError,
};

/// One member of a composite record: name, size and required alignment in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    /// Member name, unique within a record.
    pub name: String,
    /// Size in bytes; must be non-zero.
    pub size: usize,
    /// Alignment in bytes; must be a power of two. May be smaller than `size`.
    pub alignment: usize,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, size: usize, alignment: usize) -> Self {
        FieldDescriptor {
            name: name.into(),
            size,
            alignment,
        }
    }

    /// A scalar member sized and aligned according to `abi`.
    pub fn primitive(name: impl Into<String>, primitive: Primitive, abi: Abi) -> Self {
        FieldDescriptor::new(name, primitive.size(abi), primitive.align(abi))
    }

    /// A fixed-length array member: `count` elements, aligned like one element.
    pub fn array(
        name: impl Into<String>,
        primitive: Primitive,
        count: usize,
        abi: Abi,
    ) -> Result<Self, LayoutError> {
        let name = name.into();
        if count == 0 {
            return Err(LayoutError::InvalidArrayCount(name));
        }

        let size = primitive
            .size(abi)
            .checked_mul(count)
            .ok_or(LayoutError::LayoutOverflow)?;

        Ok(FieldDescriptor::new(name, size, primitive.align(abi)))
    }

    /// Checks the size and alignment invariants.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.size == 0 {
            return Err(LayoutError::InvalidFieldSize(self.name.clone()));
        }

        if !self.alignment.is_power_of_two() {
            return Err(LayoutError::InvalidAlignment {
                name: self.name.clone(),
                alignment: self.alignment,
            });
        }

        Ok(())
    }
}
