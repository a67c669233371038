//! Named per-vertex attribute layout.
//!
//! A [`VertexFormat`] declares, per named attribute, an offset and size in
//! `f32` lanes within the per-vertex record, plus the total stride. The
//! complex uses it to slice attribute data out of the dense vertex buffer and
//! to locate the position attribute for geometric queries. Offsets are
//! assigned contiguously in declaration order.

use crate::error::CellComplexError;
use serde::{Deserialize, Serialize};

/// A single named attribute within the per-vertex record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexAttribute {
    /// Attribute name, unique within a format.
    pub name: String,
    /// Offset of the first lane, in `f32` lanes from the record start.
    pub offset: usize,
    /// Number of `f32` lanes.
    pub size: usize,
}

/// Layout of one vertex's attribute data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexFormat {
    attributes: Vec<VertexAttribute>,
    stride: usize,
}

impl VertexFormat {
    /// Creates an empty format with zero stride.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a format from `(name, size)` pairs in declaration order.
    ///
    /// # Errors
    /// Same conditions as [`add_attribute`](Self::add_attribute).
    ///
    /// # Example
    /// ```rust
    /// use cell_complex::prelude::*;
    /// let fmt = VertexFormat::from_attributes([("position", 3), ("uv", 2)])?;
    /// assert_eq!(fmt.stride(), 5);
    /// assert_eq!(fmt.attribute("uv").unwrap().offset, 3);
    /// # Ok::<(), CellComplexError>(())
    /// ```
    pub fn from_attributes<'a, I>(attrs: I) -> Result<Self, CellComplexError>
    where
        I: IntoIterator<Item = (&'a str, usize)>,
    {
        let mut fmt = Self::new();
        for (name, size) in attrs {
            fmt.add_attribute(name, size)?;
        }
        Ok(fmt)
    }

    /// Appends an attribute of `size` lanes, returning its offset.
    ///
    /// # Errors
    /// Returns [`CellComplexError::ZeroSizeAttribute`] if `size == 0`, or
    /// [`CellComplexError::DuplicateAttribute`] if `name` is already declared.
    pub fn add_attribute(&mut self, name: &str, size: usize) -> Result<usize, CellComplexError> {
        if size == 0 {
            return Err(CellComplexError::ZeroSizeAttribute(name.to_string()));
        }
        if self.attribute(name).is_some() {
            return Err(CellComplexError::DuplicateAttribute(name.to_string()));
        }
        let offset = self.stride;
        self.attributes.push(VertexAttribute {
            name: name.to_string(),
            offset,
            size,
        });
        self.stride += size;
        Ok(offset)
    }

    /// The attribute named `name`, if declared.
    pub fn attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Total lanes per vertex.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Declared attributes in layout order.
    #[inline]
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_contiguous() {
        let fmt = VertexFormat::from_attributes([("position", 3), ("normal", 3), ("uv", 2)])
            .unwrap();
        assert_eq!(fmt.stride(), 8);
        assert_eq!(fmt.attribute("position").unwrap().offset, 0);
        assert_eq!(fmt.attribute("normal").unwrap().offset, 3);
        assert_eq!(fmt.attribute("uv").unwrap().offset, 6);
        assert!(fmt.attribute("color").is_none());
    }

    #[test]
    fn duplicate_and_zero_size_are_rejected() {
        let mut fmt = VertexFormat::new();
        fmt.add_attribute("position", 3).unwrap();
        assert_eq!(
            fmt.add_attribute("position", 2),
            Err(CellComplexError::DuplicateAttribute("position".into()))
        );
        assert_eq!(
            fmt.add_attribute("weight", 0),
            Err(CellComplexError::ZeroSizeAttribute("weight".into()))
        );
        // Failed declarations leave the layout untouched.
        assert_eq!(fmt.stride(), 3);
        assert_eq!(fmt.attributes().len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let fmt = VertexFormat::from_attributes([("position", 2)]).unwrap();
        let json = serde_json::to_string(&fmt).unwrap();
        assert_eq!(serde_json::from_str::<VertexFormat>(&json).unwrap(), fmt);
    }
}
