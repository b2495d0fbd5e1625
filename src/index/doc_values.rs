//! SortedSet doc values.
//!
//! Each document holds a set of byte values per field. Reading assigns every
//! distinct value an ordinal in byte order, so comparing ordinals compares
//! values; sorting by a field never has to look at the bytes.

use std::collections::BTreeSet;

/// Collects per-document values of one field.
#[derive(Debug, Clone, Default)]
pub struct SortedSetDocValuesWriter {
    field: String,
    // Indexed by doc id; docs without values hold an empty set.
    values: Vec<BTreeSet<Vec<u8>>>,
}

impl SortedSetDocValuesWriter {
    pub fn new<S: Into<String>>(field: S) -> Self {
        SortedSetDocValuesWriter {
            field: field.into(),
            values: Vec::new(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Add a value to the set of `doc`. Duplicates collapse.
    pub fn add_value(&mut self, doc: u32, value: Vec<u8>) {
        let doc = doc as usize;
        if doc >= self.values.len() {
            self.values.resize(doc + 1, BTreeSet::new());
        }
        self.values[doc].insert(value);
    }

    /// Assign ordinals and return a reader over the first `max_doc` documents.
    pub fn freeze(&self, max_doc: usize) -> SortedSetDocValues {
        let terms: Vec<Vec<u8>> = self
            .values
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let ords = (0..max_doc)
            .map(|doc| match self.values.get(doc) {
                Some(values) => values
                    .iter()
                    .filter_map(|value| terms.binary_search(value).ok())
                    .map(|ord| ord as u64)
                    .collect(),
                None => Vec::new(),
            })
            .collect();

        SortedSetDocValues {
            field: self.field.clone(),
            terms,
            ords,
        }
    }
}

/// Ordinal view of a field's doc values.
#[derive(Debug, Clone)]
pub struct SortedSetDocValues {
    field: String,
    // Distinct values in byte order; the index is the ordinal.
    terms: Vec<Vec<u8>>,
    // Per doc, ascending ordinals.
    ords: Vec<Vec<u64>>,
}

impl SortedSetDocValues {
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Number of distinct values.
    pub fn value_count(&self) -> u64 {
        self.terms.len() as u64
    }

    pub fn max_doc(&self) -> usize {
        self.ords.len()
    }

    /// The value of `ord`.
    pub fn lookup_ord(&self, ord: u64) -> Option<&[u8]> {
        self.terms.get(ord as usize).map(Vec::as_slice)
    }

    /// The ordinal of `value`, if any document holds it.
    pub fn lookup_term(&self, value: &[u8]) -> Option<u64> {
        self.terms
            .binary_search_by(|term| term.as_slice().cmp(value))
            .ok()
            .map(|ord| ord as u64)
    }

    /// Ordinals of `doc`, ascending. Empty for documents without a value.
    pub fn ords(&self, doc: u32) -> &[u64] {
        self.ords
            .get(doc as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn min_ord(&self, doc: u32) -> Option<u64> {
        self.ords(doc).first().copied()
    }

    pub fn max_ord(&self, doc: u32) -> Option<u64> {
        self.ords(doc).last().copied()
    }

    pub fn has_value(&self, doc: u32) -> bool {
        !self.ords(doc).is_empty()
    }
}
