//! Index-time flags of a string field.

use serde::{Deserialize, Serialize};

/// How much information the postings of a field record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOptions {
    /// Document ids only.
    Docs,
    /// Document ids and term frequencies.
    Freqs,
    /// Ids, frequencies and positions.
    Positions,
    /// Ids, frequencies, positions and offsets.
    Offsets,
}

impl IndexOptions {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "docs" => Some(IndexOptions::Docs),
            "freqs" => Some(IndexOptions::Freqs),
            "positions" => Some(IndexOptions::Positions),
            "offsets" => Some(IndexOptions::Offsets),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexOptions::Docs => "docs",
            IndexOptions::Freqs => "freqs",
            IndexOptions::Positions => "positions",
            IndexOptions::Offsets => "offsets",
        }
    }

    /// Whether positions are recorded.
    pub fn has_positions(&self) -> bool {
        matches!(self, IndexOptions::Positions | IndexOptions::Offsets)
    }
}

/// Term vector storage of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermVector {
    No,
    Yes,
    WithPositions,
    WithOffsets,
    WithPositionsOffsets,
}

impl TermVector {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "no" => Some(TermVector::No),
            "yes" => Some(TermVector::Yes),
            "with_positions" => Some(TermVector::WithPositions),
            "with_offsets" => Some(TermVector::WithOffsets),
            "with_positions_offsets" => Some(TermVector::WithPositionsOffsets),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TermVector::No => "no",
            TermVector::Yes => "yes",
            TermVector::WithPositions => "with_positions",
            TermVector::WithOffsets => "with_offsets",
            TermVector::WithPositionsOffsets => "with_positions_offsets",
        }
    }
}

/// Flags controlling how a string field is indexed and stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextFieldType {
    pub indexed: bool,
    pub tokenized: bool,
    pub stored: bool,
    pub omit_norms: bool,
    pub index_options: IndexOptions,
    pub term_vector: TermVector,
    /// Raw doc values requested by the mapping (`doc_values: true`).
    pub doc_values: bool,
}

impl Default for TextFieldType {
    fn default() -> Self {
        TextFieldType {
            indexed: true,
            tokenized: true,
            stored: false,
            omit_norms: false,
            index_options: IndexOptions::Positions,
            term_vector: TermVector::No,
            doc_values: false,
        }
    }
}

impl TextFieldType {
    /// The `index` mapping option this type corresponds to.
    pub fn index_mode(&self) -> &'static str {
        match (self.indexed, self.tokenized) {
            (false, _) => "no",
            (true, false) => "not_analyzed",
            (true, true) => "analyzed",
        }
    }

    /// Index options a field of this mode gets when none are configured.
    pub fn default_index_options(&self) -> IndexOptions {
        if self.indexed && !self.tokenized {
            IndexOptions::Docs
        } else {
            IndexOptions::Positions
        }
    }

    /// Norms setting a field of this mode gets when none is configured.
    pub fn default_omit_norms(&self) -> bool {
        self.indexed && !self.tokenized
    }
}
