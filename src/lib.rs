//! # dvstring
//!
//! A string field type for Lucene-style search hosts that is tokenized for
//! full-text search and also keeps one derived sortable value per document:
//! the first token of a dedicated "doc values" analyzer, stored as a
//! SortedSet doc value.
//!
//! ## Features
//!
//! - Text analysis pipeline (tokenizers, filters, analyzers, registry)
//! - Scoped token streams with guaranteed release
//! - `dvstring` and plain `string` field mappers parsed from JSON mappings
//! - Document parsing against a type mapping
//! - An in-memory index with postings and SortedSet doc values for sorting
//!
//! ## Example
//!
//! ```
//! use dvstring::analysis::registry::AnalyzerRegistry;
//! use dvstring::mapper::dvstring::DvStringFieldBuilder;
//! use dvstring::mapper::registry::BuilderContext;
//!
//! let analyzers = AnalyzerRegistry::new();
//! let mapper = DvStringFieldBuilder::new("name")
//!     .build_mapper(&BuilderContext::new(&analyzers))
//!     .unwrap();
//!
//! let parsed = mapper.extract(Some("Wonder Woman")).unwrap();
//! assert_eq!(parsed.entries.len(), 1);
//! assert_eq!(parsed.doc_value.unwrap().bytes, b"wonder woman".to_vec());
//! ```

pub mod analysis;
pub mod document;
pub mod error;
pub mod index;
pub mod mapper;
pub mod util;

pub mod prelude {
    pub use crate::analysis::registry::{AnalysisSettings, AnalyzerRegistry};
    pub use crate::document::{DocumentMapper, ParsedDocument};
    pub use crate::error::{DvStringError, Result};
    pub use crate::index::memory::{MemoryIndex, SortOrder};
    pub use crate::mapper::dvstring::{DvStringFieldBuilder, DvStringFieldMapper};
    pub use crate::mapper::registry::MapperRegistry;
    pub use crate::mapper::{DocValue, FieldMapper, IndexEntry, ParsedField};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
