//! Field identifiers and decoding paths used for error reporting.

use std::fmt;

/// Identifies one field of a row, either by column name or by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name(String),
    Position(usize),
}

impl FieldId {
    /// Try to get this identifier as a column name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            FieldId::Name(name) => Some(name),
            FieldId::Position(_) => None,
        }
    }

    /// Try to get this identifier as a zero-based position.
    pub fn as_position(&self) -> Option<usize> {
        match self {
            FieldId::Name(_) => None,
            FieldId::Position(index) => Some(*index),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Name(name) => write!(f, "{}", name),
            FieldId::Position(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for FieldId {
    fn from(name: &str) -> Self {
        FieldId::Name(name.to_string())
    }
}

impl From<String> for FieldId {
    fn from(name: String) -> Self {
        FieldId::Name(name)
    }
}

impl From<usize> for FieldId {
    fn from(index: usize) -> Self {
        FieldId::Position(index)
    }
}

/// The chain of field identifiers leading to the field being decoded.
///
/// Only used to make error messages point at the offending cell; it never
/// affects how a value is decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodePath(Vec<FieldId>);

impl DecodePath {
    /// The path of the row itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A new path with `field` appended.
    pub fn join(&self, field: impl Into<FieldId>) -> Self {
        let mut segments = self.0.clone();
        segments.push(field.into());
        Self(segments)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[FieldId] {
        &self.0
    }

    /// The innermost field, if any.
    pub fn last(&self) -> Option<&FieldId> {
        self.0.last()
    }
}

impl From<Vec<FieldId>> for DecodePath {
    fn from(segments: Vec<FieldId>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for DecodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<row>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
