//! Decode one row of tabular text into a typed value.
//!
//! A row is an ordered list of already split fields, optionally paired with
//! a [`Header`] of column names. Any type implementing
//! [`serde::Deserialize`] can be the target:
//!
//! ```
//! use csvrow::{from_row, Header};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Trade {
//!     symbol: String,
//!     qty: u32,
//!     filled: bool,
//! }
//!
//! let header = Header::new(["symbol", "qty", "filled"]);
//! let trade: Trade = from_row(Some(&header), &["ACME", "100", "yes"]).unwrap();
//! assert_eq!(trade.qty, 100);
//! assert!(trade.filled);
//! ```
//!
//! With a header, structs and maps are decoded by column name. Without one,
//! and for tuples and sequences, cells are read in order. Splitting raw text
//! into rows and fields is left to the caller's tokenizer.

pub mod coerce;
pub mod config;
pub mod decoder;
pub mod error;
pub mod field;
pub mod header;
pub mod keyed;
pub mod path;
pub mod positional;
pub mod row;
pub mod value;

pub use coerce::{coerce, coerce_value, is_absent, parse_bool, Coerce, PrimitiveKind};
pub use config::{DecodeOptions, RaggedRows};
pub use decoder::RowDecoder;
pub use error::DecodeError;
pub use field::FieldDeserializer;
pub use header::Header;
pub use keyed::{KeyedAccess, KeyedFields};
pub use path::{DecodePath, FieldId};
pub use positional::PositionalAccess;
pub use row::{from_row, RowDeserializer};
pub use value::Value;
