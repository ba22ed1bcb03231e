//! Row-level entry point.
//!
//! A row is decoded either keyed (struct or map targets, when a header is
//! present) or positional (sequences and tuples, and structs when there is
//! no header). A whole row never decodes into a lone scalar.

use serde::de::{Deserializer, Visitor};
use serde::Deserialize;
use tracing::trace;

use crate::config::DecodeOptions;
use crate::error::DecodeError;
use crate::field::FieldDeserializer;
use crate::header::Header;
use crate::keyed::KeyedFields;
use crate::path::DecodePath;
use crate::positional::PositionalAccess;

const CONTEXT: &str = "row";

/// Decode one row into `T`.
///
/// `header`, when present, names the row's cells by position.
pub fn from_row<'de, T, S>(header: Option<&Header>, row: &'de [S]) -> Result<T, DecodeError>
where
    T: Deserialize<'de>,
    S: AsRef<str>,
{
    T::deserialize(RowDeserializer::new(header, row))
}

/// Deserializer for one row of already split fields.
#[derive(Debug, Clone)]
pub struct RowDeserializer<'h, 'de> {
    header: Option<&'h Header>,
    row: Vec<&'de str>,
    options: DecodeOptions,
    path: DecodePath,
}

impl<'h, 'de> RowDeserializer<'h, 'de> {
    pub fn new<S: AsRef<str>>(header: Option<&'h Header>, row: &'de [S]) -> Self {
        Self {
            header,
            row: row.iter().map(AsRef::as_ref).collect(),
            options: DecodeOptions::default(),
            path: DecodePath::root(),
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Prefix every error path produced by this row.
    pub fn with_path(mut self, path: DecodePath) -> Self {
        self.path = path;
        self
    }

    pub fn header(&self) -> Option<&'h Header> {
        self.header
    }

    pub fn len(&self) -> usize {
        self.row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    /// Keyed view of the row.
    ///
    /// Without a header the cells are keyed by position.
    pub fn keyed(self, recognized: Option<&[&str]>) -> Result<KeyedFields<'h, 'de>, DecodeError> {
        trace!(fields = self.row.len(), has_header = self.header.is_some(), "keyed row");
        match self.header {
            Some(header) => {
                KeyedFields::by_name(header, self.row, recognized, &self.options, self.path)
            }
            None => Ok(KeyedFields::by_position(self.row, self.path)),
        }
    }

    /// Positional view of the row.
    pub fn positional(self) -> PositionalAccess<'de> {
        trace!(fields = self.row.len(), "positional row");
        PositionalAccess::new(self.row, self.path)
    }

    /// A row is never a single value.
    pub fn single_value(self) -> Result<FieldDeserializer<'de>, DecodeError> {
        Err(DecodeError::unsupported(CONTEXT, "single value"))
    }
}

impl<'de> RowDeserializer<'static, 'de> {
    /// One cell treated as its own header-less row.
    pub(crate) fn from_cell(raw: &'de str, path: DecodePath) -> Self {
        Self {
            header: None,
            row: vec![raw],
            options: DecodeOptions::default(),
            path,
        }
    }
}

macro_rules! unsupported_at_row {
    ($($method:ident),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
                Err(DecodeError::unsupported(CONTEXT, stringify!($method)))
            }
        )*
    };
}

impl<'de> Deserializer<'de> for RowDeserializer<'_, 'de> {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        if self.header.is_some() {
            self.deserialize_map(visitor)
        } else {
            self.deserialize_seq(visitor)
        }
    }

    unsupported_at_row! {
        deserialize_bool,
        deserialize_i8,
        deserialize_i16,
        deserialize_i32,
        deserialize_i64,
        deserialize_i128,
        deserialize_u8,
        deserialize_u16,
        deserialize_u32,
        deserialize_u64,
        deserialize_u128,
        deserialize_f32,
        deserialize_f64,
        deserialize_char,
        deserialize_str,
        deserialize_string,
        deserialize_bytes,
        deserialize_byte_buf,
        deserialize_unit,
        deserialize_identifier,
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_some(self)
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        Err(DecodeError::unsupported(CONTEXT, "deserialize_unit_struct"))
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_seq(self.positional())
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_seq(self.positional().expecting(len))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_map(self.keyed(None)?.into_access())
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        if self.header.is_some() {
            visitor.visit_map(self.keyed(Some(fields))?.into_access())
        } else {
            visitor.visit_seq(self.positional().expecting(fields.len()))
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        Err(DecodeError::unsupported(CONTEXT, "deserialize_enum"))
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(
        self,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_unit()
    }
}
