//! JSON‑deserializable record descriptions.
//!
//! A [LayoutDef] names an optional ABI and lists its fields, each either with
//! an explicit size and alignment or as a C primitive (optionally an array):
//!
//! ```json
//! {
//!   "abi": "llp64",
//!   "fields": [
//!     { "name": "tag", "type": "char" },
//!     { "name": "id", "type": "long" },
//!     { "name": "samples", "type": "short", "count": 4 },
//!     { "name": "blob", "size": 12, "align": 4 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    abi::{Abi, Primitive},
    errors::LayoutError,
    field::FieldDescriptor,
    layout::{LayoutReport, compute_layout},
};

/// Top‑level record description.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LayoutDef {
    /// ABI used to size primitive fields; falls back to the caller's default.
    #[serde(default)]
    pub abi: Option<Abi>,
    /// Members in declaration order.
    pub fields: Vec<FieldDef>,
}

/// One record member.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum FieldDef {
    /// Explicit byte size and alignment.
    Explicit { name: String, size: usize, align: usize },
    /// A C primitive, or a fixed array of them when `count` is given.
    Typed {
        name: String,
        #[serde(rename = "type")]
        primitive: Primitive,
        #[serde(default)]
        count: Option<usize>,
    },
}

impl FieldDef {
    pub fn into_descriptor(self, abi: Abi) -> Result<FieldDescriptor, LayoutError> {
        match self {
            FieldDef::Explicit { name, size, align } => Ok(FieldDescriptor::new(name, size, align)),
            FieldDef::Typed {
                name,
                primitive,
                count: None,
            } => Ok(FieldDescriptor::primitive(name, primitive, abi)),
            FieldDef::Typed {
                name,
                primitive,
                count: Some(count),
            } => FieldDescriptor::array(name, primitive, count, abi),
        }
    }
}

impl LayoutDef {
    /// Picks the ABI: an explicit `flag` first, then the one named in the
    /// definition, then `default_abi`.
    pub fn resolve_abi(&self, flag: Option<Abi>, default_abi: Abi) -> Abi {
        flag.or(self.abi).unwrap_or(default_abi)
    }

    /// Converts every field using exactly `abi`, ignoring the ABI named in the definition.
    pub fn descriptors_for(self, abi: Abi) -> Result<Vec<FieldDescriptor>, LayoutError> {
        self.fields
            .into_iter()
            .map(|field| field.into_descriptor(abi))
            .collect()
    }

    pub fn compute_with(self, flag: Option<Abi>, default_abi: Abi) -> Result<LayoutReport, LayoutError> {
        let abi = self.resolve_abi(flag, default_abi);
        compute_layout(&self.descriptors_for(abi)?)
    }

    pub fn compute(self, default_abi: Abi) -> Result<LayoutReport, LayoutError> {
        self.compute_with(None, default_abi)
    }
}
