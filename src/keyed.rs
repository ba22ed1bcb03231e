//! Keyed (column-name addressed) access to a row.
//!
//! [`KeyedFields`] pairs header names with row cells once per row. Names the
//! target does not recognize and cells past the end of the header (or names
//! past the end of the row) are dropped without error.

use indexmap::IndexMap;
use serde::de::{self, DeserializeSeed, Visitor};
use serde::Deserialize;
use tracing::trace;

use crate::config::{DecodeOptions, RaggedRows};
use crate::error::DecodeError;
use crate::field::FieldDeserializer;
use crate::header::Header;
use crate::path::{DecodePath, FieldId};

const CONTEXT: &str = "keyed row";

/// The name-to-cell mapping for one row.
#[derive(Debug, Clone)]
pub struct KeyedFields<'h, 'de> {
    /// `None` when the row has no header and is keyed by position.
    named: Option<IndexMap<&'h str, &'de str>>,
    row: Vec<&'de str>,
    path: DecodePath,
}

impl<'h, 'de> KeyedFields<'h, 'de> {
    /// Pair header names with row cells.
    ///
    /// `recognized` restricts the mapping to the names the target knows;
    /// `None` keeps every name. A repeated name keeps its first position
    /// and its last cell.
    pub fn by_name(
        header: &'h Header,
        row: Vec<&'de str>,
        recognized: Option<&[&str]>,
        options: &DecodeOptions,
        path: DecodePath,
    ) -> Result<Self, DecodeError> {
        if options.ragged == RaggedRows::Reject && header.len() != row.len() {
            return Err(DecodeError::RowLength {
                header: header.len(),
                row: row.len(),
            });
        }

        let mut named = IndexMap::with_capacity(header.len().min(row.len()));
        for (name, cell) in header.iter().zip(row.iter()) {
            if let Some(recognized) = recognized {
                if !recognized.contains(&name) {
                    trace!(column = name, "ignoring unrecognized column");
                    continue;
                }
            }
            named.insert(name, *cell);
        }

        if header.len() != row.len() {
            trace!(
                header = header.len(),
                row = row.len(),
                "header and row lengths differ"
            );
        }

        Ok(Self {
            named: Some(named),
            row,
            path,
        })
    }

    /// Key every cell by its position.
    pub fn by_position(row: Vec<&'de str>, path: DecodePath) -> Self {
        Self {
            named: None,
            row,
            path,
        }
    }

    /// Number of addressable fields.
    pub fn len(&self) -> usize {
        match &self.named {
            Some(named) => named.len(),
            None => self.row.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The addressable field identifiers, in column order.
    pub fn keys(&self) -> Vec<FieldId> {
        match &self.named {
            Some(named) => named.keys().map(|name| FieldId::from(*name)).collect(),
            None => (0..self.row.len()).map(FieldId::Position).collect(),
        }
    }

    pub fn contains(&self, field: &FieldId) -> bool {
        match field {
            FieldId::Name(name) => self
                .named
                .as_ref()
                .is_some_and(|named| named.contains_key(name.as_str())),
            FieldId::Position(index) => *index < self.row.len(),
        }
    }

    /// The raw text of a field.
    pub fn field(&self, field: &FieldId) -> Result<&'de str, DecodeError> {
        let cell = match field {
            FieldId::Name(name) => self
                .named
                .as_ref()
                .and_then(|named| named.get(name.as_str()).copied()),
            FieldId::Position(index) => self.row.get(*index).copied(),
        };
        cell.ok_or_else(|| DecodeError::FieldNotFound {
            field: field.clone(),
            path: DecodePath::root(),
        })
    }

    /// Decode one field into `T`.
    pub fn decode<T: Deserialize<'de>>(&self, field: &FieldId) -> Result<T, DecodeError> {
        let raw = self.field(field)?;
        T::deserialize(FieldDeserializer::new(raw, self.path.join(field.clone())))
    }

    /// Decode one field, or `None` if it is missing or empty.
    pub fn decode_if_present<T: Deserialize<'de>>(
        &self,
        field: &FieldId,
    ) -> Result<Option<T>, DecodeError> {
        if !self.contains(field) {
            return Ok(None);
        }
        self.decode::<Option<T>>(field)
    }

    /// Consume the mapping as a serde map.
    pub fn into_access(self) -> KeyedAccess<'h, 'de> {
        let entries: Vec<(EntryKey<'h>, &'de str)> = match self.named {
            Some(named) => named
                .into_iter()
                .map(|(name, cell)| (EntryKey::Name(name), cell))
                .collect(),
            None => self
                .row
                .into_iter()
                .enumerate()
                .map(|(index, cell)| (EntryKey::Position(index), cell))
                .collect(),
        };
        KeyedAccess {
            entries: entries.into_iter(),
            pending: None,
            path: self.path,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum EntryKey<'h> {
    Name(&'h str),
    Position(usize),
}

impl EntryKey<'_> {
    fn to_field_id(self) -> FieldId {
        match self {
            EntryKey::Name(name) => FieldId::from(name),
            EntryKey::Position(index) => FieldId::Position(index),
        }
    }
}

/// Serde map over the recognized fields of a row.
pub struct KeyedAccess<'h, 'de> {
    entries: std::vec::IntoIter<(EntryKey<'h>, &'de str)>,
    pending: Option<(EntryKey<'h>, &'de str)>,
    path: DecodePath,
}

impl<'de> de::MapAccess<'de> for KeyedAccess<'_, 'de> {
    type Error = DecodeError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((key, cell)) => {
                self.pending = Some((key, cell));
                seed.deserialize(KeyDeserializer(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        let (key, cell) = self
            .pending
            .take()
            .ok_or_else(|| DecodeError::unsupported(CONTEXT, "value requested before key"))?;
        seed.deserialize(FieldDeserializer::new(cell, self.path.join(key.to_field_id())))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// Hands a column name to the target as a string, a position as an integer.
struct KeyDeserializer<'h>(EntryKey<'h>);

impl<'de> de::Deserializer<'de> for KeyDeserializer<'_> {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            EntryKey::Name(name) => visitor.visit_str(name),
            EntryKey::Position(index) => visitor.visit_u64(index as u64),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            EntryKey::Name(name) => visitor.visit_str(name),
            EntryKey::Position(index) => visitor.visit_string(index.to_string()),
        }
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_str(visitor)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char bytes byte_buf
        option unit unit_struct newtype_struct seq tuple tuple_struct map struct
        enum identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn cells<'a>(row: &[&'a str]) -> Vec<&'a str> {
        row.to_vec()
    }

    fn keyed<'h, 'de>(
        header: &'h Header,
        row: &[&'de str],
        recognized: Option<&[&str]>,
    ) -> KeyedFields<'h, 'de> {
        KeyedFields::by_name(
            header,
            cells(row),
            recognized,
            &DecodeOptions::default(),
            DecodePath::root(),
        )
        .unwrap()
    }

    mod mapping {
        use super::*;

        #[test]
        fn test_extra_cells_are_dropped() {
            let header = Header::new(["a", "b"]);
            let fields = keyed(&header, &["1", "2", "3"], None);
            assert_eq!(fields.len(), 2);
            assert_eq!(fields.field(&"b".into()), Ok("2"));
        }

        #[test]
        fn test_extra_names_are_dropped() {
            let header = Header::new(["a", "b", "c"]);
            let fields = keyed(&header, &["1"], None);
            assert_eq!(fields.keys(), vec![FieldId::from("a")]);
            assert!(!fields.contains(&"b".into()));
        }

        #[test]
        fn test_unrecognized_names_are_dropped() {
            let header = Header::new(["a", "junk", "b"]);
            let fields = keyed(&header, &["1", "x", "2"], Some(&["a", "b"]));
            assert_eq!(fields.keys(), vec![FieldId::from("a"), FieldId::from("b")]);
            assert!(!fields.contains(&"junk".into()));
        }

        #[test]
        fn test_duplicate_name_keeps_last_cell() {
            let header = Header::new(["a", "b", "a"]);
            let fields = keyed(&header, &["1", "2", "3"], None);
            assert_eq!(fields.field(&"a".into()), Ok("3"));
            assert_eq!(fields.keys(), vec![FieldId::from("a"), FieldId::from("b")]);
        }

        #[test]
        fn test_position_fallback() {
            let header = Header::new(["a"]);
            let fields = keyed(&header, &["1", "2"], None);
            assert!(fields.contains(&FieldId::Position(1)));
            assert!(!fields.contains(&FieldId::Position(2)));
            assert_eq!(fields.field(&FieldId::Position(1)), Ok("2"));
        }

        #[test]
        fn test_ragged_row_rejected_when_strict() {
            let header = Header::new(["a", "b"]);
            let result = KeyedFields::by_name(
                &header,
                cells(&["1"]),
                None,
                &DecodeOptions::strict(),
                DecodePath::root(),
            );
            assert!(matches!(
                result,
                Err(DecodeError::RowLength { header: 2, row: 1 })
            ));
        }
    }

    mod decoding {
        use super::*;

        #[test]
        fn test_decode_by_name() {
            let header = Header::new(["id", "score"]);
            let fields = keyed(&header, &["7", "2.5"], None);
            assert_eq!(fields.decode::<u32>(&"id".into()), Ok(7));
            assert_eq!(fields.decode::<f64>(&"score".into()), Ok(2.5));
        }

        #[test]
        fn test_missing_field_has_empty_path() {
            let header = Header::new(["id"]);
            let fields = keyed(&header, &["7"], None);
            assert_eq!(
                fields.decode::<u32>(&"name".into()),
                Err(DecodeError::FieldNotFound {
                    field: FieldId::from("name"),
                    path: DecodePath::root(),
                })
            );
        }

        #[test]
        fn test_mismatch_path_names_the_column() {
            let header = Header::new(["id"]);
            let fields = keyed(&header, &["seven"], None);
            let err = fields.decode::<u32>(&"id".into()).unwrap_err();
            assert_eq!(err.path(), Some(&DecodePath::root().join("id")));
        }

        #[test]
        fn test_decode_if_present() {
            let header = Header::new(["a", "b"]);
            let fields = keyed(&header, &["", "4"], None);
            assert_eq!(fields.decode_if_present::<i32>(&"a".into()), Ok(None));
            assert_eq!(fields.decode_if_present::<i32>(&"b".into()), Ok(Some(4)));
            assert_eq!(fields.decode_if_present::<i32>(&"zzz".into()), Ok(None));
        }
    }

    mod map_access {
        use super::*;

        #[test]
        fn test_named_map() {
            let header = Header::new(["x", "y"]);
            let fields = keyed(&header, &["1", "2"], None);
            let map: HashMap<String, u8> = HashMap::deserialize(MapDe(fields)).unwrap();
            assert_eq!(map.get("x"), Some(&1));
            assert_eq!(map.get("y"), Some(&2));
        }

        #[test]
        fn test_positional_map() {
            let fields = KeyedFields::by_position(cells(&["a", "b"]), DecodePath::root());
            let map: HashMap<usize, String> = HashMap::deserialize(MapDe(fields)).unwrap();
            assert_eq!(map.get(&1).map(String::as_str), Some("b"));
        }

        #[test]
        fn test_position_keys_as_strings() {
            let fields = KeyedFields::by_position(cells(&["a"]), DecodePath::root());
            let map: HashMap<String, String> = HashMap::deserialize(MapDe(fields)).unwrap();
            assert_eq!(map.get("0").map(String::as_str), Some("a"));
        }

        struct MapDe<'h, 'de>(KeyedFields<'h, 'de>);

        impl<'de> de::Deserializer<'de> for MapDe<'_, 'de> {
            type Error = DecodeError;

            fn deserialize_any<V: Visitor<'de>>(
                self,
                visitor: V,
            ) -> Result<V::Value, Self::Error> {
                visitor.visit_map(self.0.into_access())
            }

            serde::forward_to_deserialize_any! {
                bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
                bytes byte_buf option unit unit_struct newtype_struct seq tuple
                tuple_struct map struct enum identifier ignored_any
            }
        }
    }
}
