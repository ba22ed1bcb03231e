//! Table-level decoder that reuses one header for every row.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::DecodeOptions;
use crate::error::DecodeError;
use crate::header::Header;
use crate::row::RowDeserializer;

/// Decodes the rows of one table.
///
/// Holds the table's header (if any) and options. It carries no per-row
/// state, so one decoder can be shared by threads decoding rows in parallel.
#[derive(Debug, Clone, Default)]
pub struct RowDecoder {
    header: Option<Header>,
    options: DecodeOptions,
}

impl RowDecoder {
    pub fn new(header: Option<Header>) -> Self {
        Self {
            header,
            options: DecodeOptions::default(),
        }
    }

    pub fn with_header(header: Header) -> Self {
        Self::new(Some(header))
    }

    /// A decoder for tables without a header line.
    pub fn headerless() -> Self {
        Self::new(None)
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode one row.
    pub fn decode<'de, T, S>(&self, row: &'de [S]) -> Result<T, DecodeError>
    where
        T: Deserialize<'de>,
        S: AsRef<str>,
    {
        let deserializer =
            RowDeserializer::new(self.header.as_ref(), row).with_options(self.options);
        T::deserialize(deserializer).inspect_err(|err| {
            debug!(error = %err, fields = row.len(), "row decode failed");
        })
    }

    /// Decode rows lazily, yielding one result per row.
    ///
    /// A failed row does not stop the iterator; the caller decides whether to
    /// skip it or abort.
    pub fn decode_rows<'a, T, I, R, S>(
        &'a self,
        rows: I,
    ) -> impl Iterator<Item = Result<T, DecodeError>> + 'a
    where
        T: DeserializeOwned + 'a,
        I: IntoIterator<Item = R> + 'a,
        I::IntoIter: 'a,
        R: AsRef<[S]> + 'a,
        S: AsRef<str> + 'a,
    {
        rows.into_iter().map(move |row| self.decode(row.as_ref()))
    }
}
