//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// Policy for rows whose length differs from the header's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaggedRows {
    /// Drop cells past the header and header names past the row.
    #[default]
    Tolerate,
    /// Fail keyed decoding with [`DecodeError::RowLength`](crate::DecodeError::RowLength).
    Reject,
}

/// Options applied to every row decoded with them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub ragged: RaggedRows,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            ragged: RaggedRows::Reject,
        }
    }

    pub fn with_ragged(mut self, ragged: RaggedRows) -> Self {
        self.ragged = ragged;
        self
    }
}
