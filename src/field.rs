//! Decoding of a single cell.
//!
//! [`FieldDeserializer`] hands one raw field to the coercion rules in
//! [`crate::coerce`]. When the target wants a structure out of a single
//! cell (a struct, tuple or sequence), the cell is decoded again as a
//! one-element row without a header.

use serde::de::{self, Deserializer, IntoDeserializer, Visitor};
use serde::Deserialize;

use crate::coerce::{self, Coerce, PrimitiveKind};
use crate::error::DecodeError;
use crate::path::DecodePath;
use crate::row::RowDeserializer;
use crate::value::Value;

const CONTEXT: &str = "single field";

/// Deserializer for one raw field.
#[derive(Debug, Clone)]
pub struct FieldDeserializer<'de> {
    raw: &'de str,
    path: DecodePath,
}

impl<'de> FieldDeserializer<'de> {
    pub fn new(raw: &'de str, path: DecodePath) -> Self {
        Self { raw, path }
    }

    pub fn raw(&self) -> &'de str {
        self.raw
    }

    pub fn path(&self) -> &DecodePath {
        &self.path
    }

    /// True if the field is empty or whitespace-only.
    pub fn is_absent(&self) -> bool {
        coerce::is_absent(self.raw)
    }

    /// Coerce the field into a primitive type.
    pub fn decode<T: Coerce>(&self) -> Result<T, DecodeError> {
        coerce::coerce(self.raw, &self.path)
    }

    /// Coerce the field into a dynamically chosen primitive kind.
    pub fn decode_value(&self, kind: PrimitiveKind) -> Result<Value, DecodeError> {
        coerce::coerce_value(self.raw, kind, &self.path)
    }

    /// Decode any deserializable type from this field.
    pub fn deserialize_into<T: Deserialize<'de>>(self) -> Result<T, DecodeError> {
        T::deserialize(self)
    }

    fn into_row(self) -> RowDeserializer<'static, 'de> {
        RowDeserializer::from_cell(self.raw, self.path)
    }
}

macro_rules! deserialize_coerced {
    ($($method:ident => $visit:ident),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
                visitor.$visit(coerce::coerce(self.raw, &self.path)?)
            }
        )*
    };
}

impl<'de> Deserializer<'de> for FieldDeserializer<'de> {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_borrowed_str(self.raw)
    }

    deserialize_coerced! {
        deserialize_bool => visit_bool,
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_i128 => visit_i128,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
        deserialize_u128 => visit_u128,
        deserialize_f32 => visit_f32,
        deserialize_f64 => visit_f64,
        deserialize_char => visit_char,
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_borrowed_str(self.raw)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_borrowed_str(self.raw)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_borrowed_bytes(self.raw.as_bytes())
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_borrowed_bytes(self.raw.as_bytes())
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        if self.is_absent() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        if self.is_absent() {
            visitor.visit_unit()
        } else {
            Err(DecodeError::type_mismatch(
                self.raw,
                PrimitiveKind::Nil,
                &self.path,
            ))
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.into_row().deserialize_seq(visitor)
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.into_row().deserialize_tuple(len, visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.into_row().deserialize_tuple_struct(name, len, visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
        Err(DecodeError::unsupported(CONTEXT, "deserialize_map"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.into_row().deserialize_struct(name, fields, visitor)
    }

    // Unit variants only, named by the cell's text.
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        let variant: de::value::StrDeserializer<'_, DecodeError> = self.raw.into_deserializer();
        visitor.visit_enum(variant)
    }

    fn deserialize_identifier<V: Visitor<'de>>(
        self,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_borrowed_str(self.raw)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(
        self,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_unit()
    }
}
