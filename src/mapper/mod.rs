//! Field mappers.
//!
//! A field mapper is the immutable, mapping-time definition of how one named
//! field is indexed. It is built once from a JSON mapping and then called once
//! per document per field occurrence through [`FieldMapper::parse`].
//!
//! # Modules
//!
//! - [`field_type`]: Index-time flags of a string field
//! - [`text`]: The generic analyzed text field both string types compose with
//! - [`string`]: The plain `string` type
//! - [`dvstring`]: The `dvstring` type, which also derives a sortable doc value
//! - [`parser`]: Mapping option parsing shared by the type parsers
//! - [`registry`]: Type parsers, builders and their lookup by type name

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::analysis::token::Token;
use crate::error::Result;

pub mod dvstring;
pub mod field_type;
pub mod parser;
pub mod registry;
pub mod string;
pub mod text;

pub use field_type::{IndexOptions, TermVector, TextFieldType};

/// Name of a field and the name it is indexed under.
///
/// The index name is the full dotted path (`hero.name`, `name.raw`), unless a
/// multi-field is mapped with `path: just_name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldNames {
    name: String,
    index_name: String,
}

impl FieldNames {
    pub fn new<N: Into<String>, I: Into<String>>(name: N, index_name: I) -> Self {
        FieldNames {
            name: name.into(),
            index_name: index_name.into(),
        }
    }

    /// The field name as written in the mapping.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name entries and doc values are keyed by.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }
}

/// One index-time entry for full-text search.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexEntry {
    /// Index name of the field.
    pub name: String,
    /// The resolved value the entry was built from.
    pub value: String,
    /// How the entry is indexed and stored.
    pub field_type: TextFieldType,
    pub boost: f32,
    /// Terms to index. Empty for fields that are stored but not indexed.
    pub terms: Vec<Token>,
    /// Positions skipped before this entry when the field already holds a value.
    pub position_increment_gap: u32,
}

/// A per-document columnar value, stored in the SortedSet doc values of `field`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocValue {
    pub field: String,
    pub bytes: Vec<u8>,
}

impl DocValue {
    pub fn new<F: Into<String>, B: Into<Vec<u8>>>(field: F, bytes: B) -> Self {
        DocValue {
            field: field.into(),
            bytes: bytes.into(),
        }
    }

    /// The value as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

impl fmt::Display for DocValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, String::from_utf8_lossy(&self.bytes))
    }
}

/// The result of parsing one field occurrence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedField {
    /// Entries for full-text search.
    pub entries: Vec<IndexEntry>,
    /// At most one columnar value.
    pub doc_value: Option<DocValue>,
    /// Whether the mapper attempted to derive a doc value for this occurrence.
    ///
    /// `true` even when the derivation produced no token or was skipped by the
    /// `ignore_above` cutoff.
    pub doc_values_attempted: bool,
}

impl ParsedField {
    /// Nothing to index: no entries, no doc value, no derivation attempted.
    pub fn empty() -> Self {
        ParsedField::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.doc_value.is_none()
    }
}

/// A built field definition.
///
/// Implementations are immutable after build, so one mapper can be shared by
/// every thread that parses documents.
pub trait FieldMapper: Send + Sync + fmt::Debug {
    fn names(&self) -> &FieldNames;

    /// The mapping type name, e.g. `dvstring`.
    fn content_type(&self) -> &'static str;

    /// Whether documents parsed by this mapper carry a columnar value.
    fn has_doc_values(&self) -> bool;

    /// Parse one occurrence of the field. `None` is an absent (null) value.
    fn parse(&self, value: Option<&str>) -> Result<ParsedField>;

    /// Sub-definitions that receive the same value (`fields`).
    fn multi_fields(&self) -> &[Arc<dyn FieldMapper>];

    /// Full names of the fields the value is copied to.
    fn copy_to(&self) -> &[String];

    /// The mapping of this field, with only non-default options.
    fn to_mapping(&self) -> Value;
}
