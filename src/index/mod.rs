//! A minimal in-memory index.
//!
//! Holds postings, stored values and SortedSet doc values of parsed
//! documents; enough to look terms up and to sort documents by a doc values
//! field.

pub mod doc_values;
pub mod memory;

pub use doc_values::{SortedSetDocValues, SortedSetDocValuesWriter};
pub use memory::{MemoryIndex, Posting, SortHit, SortOrder};
