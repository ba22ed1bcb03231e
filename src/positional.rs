//! Positional (index addressed) access to a row.

use serde::de::{self, DeserializeSeed};
use serde::Deserialize;

use crate::coerce::{self, PrimitiveKind};
use crate::error::DecodeError;
use crate::field::FieldDeserializer;
use crate::path::{DecodePath, FieldId};
use crate::value::Value;

/// Cursor over the cells of one row.
///
/// The cursor only moves forward. A read advances it by one when it
/// succeeds; a failed coercion leaves it on the offending cell.
/// [`super_decoder`](Self::super_decoder) always consumes the cell it
/// hands out.
///
/// When the target declares how many elements it takes (a struct or a
/// tuple), elements past the end of the row are served as missing cells:
/// `Option` elements decode to `None`, anything else fails with
/// [`DecodeError::FieldNotFound`] at the missing position.
#[derive(Debug, Clone)]
pub struct PositionalAccess<'de> {
    row: Vec<&'de str>,
    cursor: usize,
    expected: Option<usize>,
    missing: usize,
    path: DecodePath,
}

impl<'de> PositionalAccess<'de> {
    pub fn new(row: Vec<&'de str>, path: DecodePath) -> Self {
        Self {
            row,
            cursor: 0,
            expected: None,
            missing: 0,
            path,
        }
    }

    /// Declare the number of elements the target reads through `SeqAccess`.
    pub fn expecting(mut self, len: usize) -> Self {
        self.expected = Some(len);
        self
    }

    /// Total number of cells in the row.
    pub fn count(&self) -> usize {
        self.row.len()
    }

    /// Index of the next cell to be read.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.row.len().saturating_sub(self.cursor)
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.row.len()
    }

    /// Decode the next cell into `T`.
    pub fn decode<T: Deserialize<'de>>(&mut self) -> Result<T, DecodeError> {
        let field = self.current()?;
        let value = T::deserialize(field)?;
        self.cursor += 1;
        Ok(value)
    }

    /// Decode the next cell, or `None` without advancing if the row is exhausted.
    pub fn decode_if_present<T: Deserialize<'de>>(&mut self) -> Result<Option<T>, DecodeError> {
        if self.is_at_end() {
            return Ok(None);
        }
        self.decode().map(Some)
    }

    /// Coerce the next cell into a dynamically chosen primitive kind.
    pub fn decode_value(&mut self, kind: PrimitiveKind) -> Result<Value, DecodeError> {
        let field = self.current()?;
        let value = coerce::coerce_value(field.raw(), kind, field.path())?;
        self.cursor += 1;
        Ok(value)
    }

    pub fn decode_value_if_present(
        &mut self,
        kind: PrimitiveKind,
    ) -> Result<Option<Value>, DecodeError> {
        if self.is_at_end() {
            return Ok(None);
        }
        self.decode_value(kind).map(Some)
    }

    /// Hand out the next cell as its own decode origin.
    pub fn super_decoder(&mut self) -> Result<FieldDeserializer<'de>, DecodeError> {
        let field = self.current()?;
        self.cursor += 1;
        Ok(field)
    }

    fn current(&self) -> Result<FieldDeserializer<'de>, DecodeError> {
        let path = self.path.join(self.cursor);
        match self.row.get(self.cursor).copied() {
            Some(cell) => Ok(FieldDeserializer::new(cell, path)),
            None => Err(DecodeError::FieldNotFound {
                field: FieldId::Position(self.cursor),
                path,
            }),
        }
    }
}

impl<'de> de::SeqAccess<'de> for PositionalAccess<'de> {
    type Error = DecodeError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Self::Error>
    where
        T: DeserializeSeed<'de>,
    {
        if !self.is_at_end() {
            let value = seed.deserialize(self.current()?)?;
            self.cursor += 1;
            return Ok(Some(value));
        }
        let position = self.row.len() + self.missing;
        match self.expected {
            Some(len) if position < len => {
                let cell = MissingCell {
                    position,
                    path: self.path.join(position),
                };
                let value = seed.deserialize(cell)?;
                self.missing += 1;
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        let padding = self
            .expected
            .map_or(0, |len| len.saturating_sub(self.row.len() + self.missing));
        Some(self.remaining() + padding)
    }
}

/// A declared element the row has no cell for.
struct MissingCell {
    position: usize,
    path: DecodePath,
}

impl MissingCell {
    fn not_found(self) -> DecodeError {
        DecodeError::FieldNotFound {
            field: FieldId::Position(self.position),
            path: self.path,
        }
    }
}

impl<'de> de::Deserializer<'de> for MissingCell {
    type Error = DecodeError;

    fn deserialize_any<V: de::Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
        Err(self.not_found())
    }

    fn deserialize_option<V: de::Visitor<'de>>(
        self,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_none()
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}
