//! Decoding errors.

use std::fmt;

use thiserror::Error;

use crate::coerce::PrimitiveKind;
use crate::path::{DecodePath, FieldId};

/// Errors that can occur while decoding a row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("no value for field '{field}' (path: {path})")]
    FieldNotFound { field: FieldId, path: DecodePath },

    #[error("cannot convert '{raw}' to {expected} (path: {path})")]
    TypeMismatch {
        raw: String,
        expected: PrimitiveKind,
        path: DecodePath,
    },

    #[error("unsupported action for {context}: {action}")]
    UnsupportedAction {
        context: &'static str,
        action: &'static str,
    },

    #[error("row has {row} fields but header has {header} columns")]
    RowLength { header: usize, row: usize },

    #[error("{0}")]
    Custom(String),
}

impl DecodeError {
    pub(crate) fn type_mismatch(raw: &str, expected: PrimitiveKind, path: &DecodePath) -> Self {
        DecodeError::TypeMismatch {
            raw: raw.to_string(),
            expected,
            path: path.clone(),
        }
    }

    pub(crate) fn unsupported(context: &'static str, action: &'static str) -> Self {
        tracing::debug!(context, action, "unsupported decode action");
        DecodeError::UnsupportedAction { context, action }
    }

    /// The decoding path of the failing field, for variants that carry one.
    pub fn path(&self) -> Option<&DecodePath> {
        match self {
            DecodeError::FieldNotFound { path, .. } | DecodeError::TypeMismatch { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }

    pub fn is_field_not_found(&self) -> bool {
        matches!(self, DecodeError::FieldNotFound { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, DecodeError::TypeMismatch { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, DecodeError::UnsupportedAction { .. })
    }
}

impl serde::de::Error for DecodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        DecodeError::Custom(msg.to_string())
    }

    fn missing_field(field: &'static str) -> Self {
        DecodeError::FieldNotFound {
            field: FieldId::Name(field.to_string()),
            path: DecodePath::root(),
        }
    }

    // Derived struct and tuple visitors report a short row this way.
    fn invalid_length(len: usize, _exp: &dyn serde::de::Expected) -> Self {
        DecodeError::FieldNotFound {
            field: FieldId::Position(len),
            path: DecodePath::root(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::Error as _;

    #[test]
    fn test_type_mismatch_message() {
        let path = DecodePath::root().join("age");
        let err = DecodeError::type_mismatch("abc", PrimitiveKind::UInt8, &path);
        assert_eq!(err.to_string(), "cannot convert 'abc' to uint8 (path: age)");
        assert_eq!(err.path(), Some(&path));
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn test_missing_field_is_field_not_found() {
        let err = DecodeError::missing_field("c");
        assert_eq!(
            err,
            DecodeError::FieldNotFound {
                field: FieldId::Name("c".to_string()),
                path: DecodePath::root(),
            }
        );
        assert_eq!(err.to_string(), "no value for field 'c' (path: <row>)");
    }

    #[test]
    fn test_invalid_length_is_field_not_found() {
        let err = DecodeError::invalid_length(2, &"a tuple of size 3");
        assert!(matches!(
            err,
            DecodeError::FieldNotFound {
                field: FieldId::Position(2),
                ..
            }
        ));
    }

    #[test]
    fn test_unsupported_has_no_path() {
        let err = DecodeError::unsupported("row", "deserialize_u32");
        assert!(err.is_unsupported());
        assert_eq!(err.path(), None);
    }
}
