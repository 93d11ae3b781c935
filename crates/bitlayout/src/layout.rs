//! Layout: offsets, padding and total size of a record, computed arithmetically
//! from [FieldDescriptor]s instead of observed through a host compiler.

use std::{collections::HashSet, fmt};

use crate::{errors::LayoutError, field::FieldDescriptor};

/// Where one field landed inside the record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldPlacement {
    pub field: FieldDescriptor,
    /// Byte offset from the start of the record; a multiple of `field.alignment`.
    pub offset: usize,
    /// Padding bytes inserted directly before this field.
    pub padding_before: usize,
}

/// Result of [compute_layout]. Offsets are in declaration order and never decrease.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayoutReport {
    fields: Vec<FieldPlacement>,
    total_size: usize,
    total_padding: usize,
    alignment: usize,
}

impl LayoutReport {
    pub fn fields(&self) -> &[FieldPlacement] {
        &self.fields
    }

    /// Record size including trailing padding; a multiple of [LayoutReport::alignment].
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Interior plus trailing padding bytes.
    pub fn total_padding(&self) -> usize {
        self.total_padding
    }

    /// Largest field alignment, or 1 for an empty record.
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Padding after the last field.
    pub fn trailing_padding(&self) -> usize {
        self.fields.last().map_or(0, |last| {
            self.total_size - (last.offset + last.field.size)
        })
    }

    pub fn offsets(&self) -> Vec<usize> {
        self.fields.iter().map(|placement| placement.offset).collect()
    }

    pub fn get(&self, name: &str) -> Option<&FieldPlacement> {
        self.fields
            .iter()
            .find(|placement| placement.field.name == name)
    }
}

impl fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .fields
            .iter()
            .map(|placement| placement.field.name.len())
            .max()
            .unwrap_or(0)
            .max("field".len());

        writeln!(
            f,
            "{:<name_width$}  {:>6}  {:>4}  {:>5}  {:>7}",
            "field", "offset", "size", "align", "padding"
        )?;

        for placement in &self.fields {
            writeln!(
                f,
                "{:<name_width$}  {:>6}  {:>4}  {:>5}  {:>7}",
                placement.field.name,
                placement.offset,
                placement.field.size,
                placement.field.alignment,
                placement.padding_before
            )?;
        }

        write!(
            f,
            "total size {}, alignment {}, padding {} ({} trailing)",
            self.total_size,
            self.alignment,
            self.total_padding,
            self.trailing_padding()
        )
    }
}

fn align_up(cursor: usize, alignment: usize) -> Result<usize, LayoutError> {
    cursor
        .checked_add(alignment - 1)
        .map(|bumped| bumped & !(alignment - 1))
        .ok_or(LayoutError::LayoutOverflow)
}

/// Places `fields` in declaration order, padding each to its alignment and the
/// whole record to the largest alignment. Fails if any descriptor is invalid.
pub fn compute_layout(fields: &[FieldDescriptor]) -> Result<LayoutReport, LayoutError> {
    let mut placements = Vec::with_capacity(fields.len());
    let mut seen = HashSet::with_capacity(fields.len());
    let mut cursor = 0usize;
    let mut data_size = 0usize;
    let mut alignment = 1usize;

    for field in fields {
        field.validate()?;
        if !seen.insert(field.name.as_str()) {
            return Err(LayoutError::DuplicateFieldName(field.name.clone()));
        }

        let offset = align_up(cursor, field.alignment)?;
        placements.push(FieldPlacement {
            field: field.clone(),
            offset,
            padding_before: offset - cursor,
        });

        cursor = offset
            .checked_add(field.size)
            .ok_or(LayoutError::LayoutOverflow)?;
        data_size += field.size;
        alignment = alignment.max(field.alignment);
    }

    let total_size = align_up(cursor, alignment)?;

    Ok(LayoutReport {
        fields: placements,
        total_size,
        total_padding: total_size - data_size,
        alignment,
    })
}

/// Returns `fields` sorted by descending alignment, keeping declaration order
/// among equal alignments. When every size is a multiple of its alignment the
/// result has no interior padding.
pub fn reorder_for_size(fields: &[FieldDescriptor]) -> Vec<FieldDescriptor> {
    let mut sorted = fields.to_vec();
    sorted.sort_by(|a, b| b.alignment.cmp(&a.alignment));
    sorted
}

#[cfg(test)]
mod tests {
    use crate::abi::{Abi, Primitive};

    use super::*;

    fn mixed_record(abi: Abi) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::primitive("c1", Primitive::Char, abi),
            FieldDescriptor::primitive("i", Primitive::Int, abi),
            FieldDescriptor::primitive("c2", Primitive::Char, abi),
            FieldDescriptor::primitive("d", Primitive::Double, abi),
            FieldDescriptor::primitive("c3", Primitive::Char, abi),
        ]
    }

    #[test]
    fn test_empty_layout() {
        let report = compute_layout(&[]).unwrap();
        assert_eq!(report.total_size(), 0);
        assert_eq!(report.total_padding(), 0);
        assert_eq!(report.alignment(), 1);
        assert_eq!(report.trailing_padding(), 0);
    }

    #[test]
    fn test_mixed_record_lp64() {
        let report = compute_layout(&mixed_record(Abi::Lp64)).unwrap();
        assert_eq!(report.offsets(), vec![0, 4, 8, 16, 24]);
        assert_eq!(report.total_size(), 32);
        assert_eq!(report.total_padding(), 17);
        assert_eq!(report.alignment(), 8);
        assert_eq!(report.trailing_padding(), 7);

        assert_eq!(report.get("i").unwrap().padding_before, 3);
        assert_eq!(report.get("d").unwrap().padding_before, 7);
        assert_eq!(report.get("c2").unwrap().padding_before, 0);
    }

    #[test]
    fn test_mixed_record_ilp32() {
        let report = compute_layout(&mixed_record(Abi::Ilp32)).unwrap();
        assert_eq!(report.offsets(), vec![0, 4, 8, 12, 20]);
        assert_eq!(report.total_size(), 24);
        assert_eq!(report.alignment(), 4);
    }

    #[test]
    fn test_size_larger_than_alignment() {
        let report = compute_layout(&[
            FieldDescriptor::new("flag", 1, 1),
            FieldDescriptor::new("wide", 8, 4),
        ])
        .unwrap();
        assert_eq!(report.offsets(), vec![0, 4]);
        assert_eq!(report.total_size(), 12);
    }

    #[test]
    fn test_no_padding_needed() {
        let report = compute_layout(&[
            FieldDescriptor::new("a", 4, 4),
            FieldDescriptor::new("b", 4, 4),
        ])
        .unwrap();
        assert_eq!(report.total_size(), 8);
        assert_eq!(report.total_padding(), 0);
    }

    #[test]
    fn test_invalid_descriptors() {
        assert_eq!(
            compute_layout(&[FieldDescriptor::new("x", 0, 1)]).unwrap_err(),
            LayoutError::InvalidFieldSize("x".to_string())
        );
        assert_eq!(
            compute_layout(&[FieldDescriptor::new("x", 4, 6)]).unwrap_err(),
            LayoutError::InvalidAlignment {
                name: "x".to_string(),
                alignment: 6
            }
        );
    }

    #[test]
    fn test_duplicate_names() {
        let fields = vec![FieldDescriptor::new("x", 1, 1), FieldDescriptor::new("x", 1, 1)];
        assert_eq!(
            compute_layout(&fields).unwrap_err(),
            LayoutError::DuplicateFieldName("x".to_string())
        );
    }

    #[test]
    fn test_overflow() {
        let fields = vec![
            FieldDescriptor::new("a", usize::MAX, 1),
            FieldDescriptor::new("b", 4, 4),
        ];
        assert_eq!(compute_layout(&fields).unwrap_err(), LayoutError::LayoutOverflow);
    }

    #[test]
    fn test_reorder_for_size() {
        let fields = mixed_record(Abi::Lp64);
        let reordered = reorder_for_size(&fields);

        let names: Vec<&str> = reordered.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["d", "i", "c1", "c2", "c3"]);

        let report = compute_layout(&reordered).unwrap();
        assert_eq!(report.total_size(), 16);
    }

    #[test]
    fn test_display_table() {
        let report = compute_layout(&[
            FieldDescriptor::new("c", 1, 1),
            FieldDescriptor::new("n", 4, 4),
        ])
        .unwrap();

        let rendered = report.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "field  offset  size  align  padding");
        assert_eq!(lines[1], "c           0     1      1        0");
        assert_eq!(lines[2], "n           4     4      4        3");
        assert_eq!(lines[3], "total size 8, alignment 4, padding 3 (0 trailing)");
    }
}
