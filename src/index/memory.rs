//! In-memory index of parsed documents.
//!
//! # Examples
//!
//! ```
//! use dvstring::prelude::*;
//! use serde_json::json;
//!
//! let mapping = json!({"superhero": {"properties": {"name": {"type": "dvstring"}}}});
//! let mapper =
//!     DocumentMapper::parse(&mapping, &MapperRegistry::new(), &AnalyzerRegistry::new()).unwrap();
//!
//! let index = MemoryIndex::new();
//! for (id, name) in [("1", "storm"), ("2", "Cyclops"), ("3", "Rogue")] {
//!     let doc = mapper.parse_document(id, &json!({"name": name})).unwrap();
//!     index.add_document(&doc).unwrap();
//! }
//!
//! let ids: Vec<_> = index
//!     .sort_by("name", SortOrder::Ascending)
//!     .unwrap()
//!     .into_iter()
//!     .map(|hit| hit.id)
//!     .collect();
//! assert_eq!(ids, vec!["2", "3", "1"]);
//! assert_eq!(index.term_docs("name", "rogue"), vec![2]);
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use ahash::AHashMap;
use log::trace;
use parking_lot::RwLock;

use crate::document::ParsedDocument;
use crate::error::{DvStringError, Result};
use crate::index::doc_values::{SortedSetDocValues, SortedSetDocValuesWriter};

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// By the smallest value of each document.
    #[default]
    Ascending,
    /// By the largest value of each document.
    Descending,
}

/// The occurrences of a term in one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Posting {
    pub doc: u32,
    /// Empty when the field does not index positions.
    pub positions: Vec<usize>,
}

/// One document of a sorted result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortHit {
    pub doc: u32,
    pub id: String,
    /// The value the document was sorted by; `None` for documents without one.
    pub value: Option<Vec<u8>>,
}

impl SortHit {
    pub fn value_str(&self) -> Option<&str> {
        self.value
            .as_deref()
            .and_then(|value| std::str::from_utf8(value).ok())
    }
}

#[derive(Debug, Default)]
struct IndexState {
    ids: Vec<String>,
    doc_ids: AHashMap<String, u32>,
    // field -> term -> postings in doc order
    postings: AHashMap<String, BTreeMap<String, Vec<Posting>>>,
    // doc -> field -> stored values
    stored: Vec<AHashMap<String, Vec<String>>>,
    doc_values: AHashMap<String, SortedSetDocValuesWriter>,
}

/// Postings, stored values and doc values of a set of documents.
///
/// Documents are numbered in the order they are added. Any number of readers
/// may query the index while documents are added.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    state: RwLock<IndexState>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parsed document and return its doc id.
    ///
    /// Consecutive values of one field continue the positions of the previous
    /// value, after skipping the entry's position increment gap.
    pub fn add_document(&self, document: &ParsedDocument) -> Result<u32> {
        let mut state = self.state.write();

        if state.doc_ids.contains_key(document.id()) {
            return Err(DvStringError::index(format!(
                "document [{}] is already indexed",
                document.id()
            )));
        }
        let doc = u32::try_from(state.ids.len())
            .map_err(|_| DvStringError::index("too many documents"))?;

        let mut next_position: AHashMap<&str, usize> = AHashMap::new();
        let mut stored: AHashMap<String, Vec<String>> = AHashMap::new();

        for entry in document.entries() {
            if entry.field_type.stored {
                stored
                    .entry(entry.name.clone())
                    .or_default()
                    .push(entry.value.clone());
            }
            if !entry.field_type.indexed {
                continue;
            }

            let base = match next_position.get(entry.name.as_str()) {
                Some(&next) => next + entry.position_increment_gap as usize,
                None => 0,
            };
            let with_positions = entry.field_type.index_options.has_positions();
            let terms = state.postings.entry(entry.name.clone()).or_default();

            let mut end = base;
            for token in &entry.terms {
                let position = base + token.position;
                end = end.max(position + 1);

                let postings = terms.entry(token.text.clone()).or_default();
                match postings.last_mut() {
                    Some(posting) if posting.doc == doc => {
                        if with_positions {
                            posting.positions.push(position);
                        }
                    }
                    _ => postings.push(Posting {
                        doc,
                        positions: if with_positions {
                            vec![position]
                        } else {
                            Vec::new()
                        },
                    }),
                }
            }
            next_position.insert(entry.name.as_str(), end);
        }

        for value in document.doc_values() {
            state
                .doc_values
                .entry(value.field.clone())
                .or_insert_with(|| SortedSetDocValuesWriter::new(value.field.clone()))
                .add_value(doc, value.bytes.clone());
        }

        state.ids.push(document.id().to_string());
        state.doc_ids.insert(document.id().to_string(), doc);
        state.stored.push(stored);

        trace!("indexed document [{}] as doc {doc}", document.id());
        Ok(doc)
    }

    /// Number of documents.
    pub fn doc_count(&self) -> usize {
        self.state.read().ids.len()
    }

    /// The external id of `doc`.
    pub fn id(&self, doc: u32) -> Option<String> {
        self.state.read().ids.get(doc as usize).cloned()
    }

    /// The doc id of the document with external id `id`.
    pub fn doc(&self, id: &str) -> Option<u32> {
        self.state.read().doc_ids.get(id).copied()
    }

    /// Documents containing `term` in `field`, ascending.
    pub fn term_docs(&self, field: &str, term: &str) -> Vec<u32> {
        self.postings(field, term)
            .into_iter()
            .map(|posting| posting.doc)
            .collect()
    }

    pub fn postings(&self, field: &str, term: &str) -> Vec<Posting> {
        self.state
            .read()
            .postings
            .get(field)
            .and_then(|terms| terms.get(term))
            .cloned()
            .unwrap_or_default()
    }

    /// Terms of `field` in byte order.
    pub fn terms(&self, field: &str) -> Vec<String> {
        self.state
            .read()
            .postings
            .get(field)
            .map(|terms| terms.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Stored values of `field` in `doc`.
    pub fn stored(&self, doc: u32, field: &str) -> Vec<String> {
        self.state
            .read()
            .stored
            .get(doc as usize)
            .and_then(|fields| fields.get(field))
            .cloned()
            .unwrap_or_default()
    }

    /// Whether any document holds a doc value for `field`.
    pub fn has_doc_values(&self, field: &str) -> bool {
        self.state.read().doc_values.contains_key(field)
    }

    /// The doc values of `field` over all current documents.
    pub fn doc_values(&self, field: &str) -> Option<SortedSetDocValues> {
        let state = self.state.read();
        state
            .doc_values
            .get(field)
            .map(|writer| writer.freeze(state.ids.len()))
    }

    /// All documents sorted by the doc values of `field`.
    ///
    /// Ascending order compares the smallest value of each document,
    /// descending the largest. Documents without a value come last in both
    /// directions; ties are broken by doc id.
    pub fn sort_by(&self, field: &str, order: SortOrder) -> Result<Vec<SortHit>> {
        let state = self.state.read();
        let writer = state.doc_values.get(field).ok_or_else(|| {
            DvStringError::index(format!("field [{field}] has no doc values"))
        })?;
        let doc_values = writer.freeze(state.ids.len());

        let mut keyed: Vec<(u32, Option<u64>)> = (0..state.ids.len())
            .filter_map(|doc| u32::try_from(doc).ok())
            .map(|doc| {
                let ord = match order {
                    SortOrder::Ascending => doc_values.min_ord(doc),
                    SortOrder::Descending => doc_values.max_ord(doc),
                };
                (doc, ord)
            })
            .collect();

        keyed.sort_by(|(doc_a, ord_a), (doc_b, ord_b)| {
            let by_value = match (ord_a, ord_b) {
                (Some(a), Some(b)) => match order {
                    SortOrder::Ascending => a.cmp(b),
                    SortOrder::Descending => b.cmp(a),
                },
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            by_value.then(doc_a.cmp(doc_b))
        });

        Ok(keyed
            .into_iter()
            .map(|(doc, ord)| SortHit {
                doc,
                id: state.ids[doc as usize].clone(),
                value: ord
                    .and_then(|ord| doc_values.lookup_ord(ord))
                    .map(<[u8]>::to_vec),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use serde_json::{Value, json};

    use super::*;
    use crate::analysis::registry::AnalyzerRegistry;
    use crate::document::DocumentMapper;
    use crate::mapper::registry::MapperRegistry;

    fn mapper(properties: Value) -> DocumentMapper {
        DocumentMapper::parse(
            &json!({"hero": {"properties": properties}}),
            &MapperRegistry::new(),
            &AnalyzerRegistry::new(),
        )
        .unwrap()
    }

    fn add(index: &MemoryIndex, mapper: &DocumentMapper, id: &str, source: Value) -> u32 {
        let doc = mapper.parse_document(id, &source).unwrap();
        index.add_document(&doc).unwrap()
    }

    #[test]
    fn test_positions_across_values() {
        let mapper = mapper(json!({
            "alias": {"type": "dvstring", "position_offset_gap": 100},
            "tags": {"type": "string"}
        }));
        let index = MemoryIndex::new();
        add(
            &index,
            &mapper,
            "1",
            json!({"alias": ["Dark Knight", "Caped Crusader"], "tags": ["a b", "c"]}),
        );

        assert_eq!(index.postings("alias", "knight")[0].positions, vec![1]);
        assert_eq!(index.postings("alias", "caped")[0].positions, vec![102]);
        assert_eq!(index.postings("tags", "c")[0].positions, vec![2]);
    }

    #[test]
    fn test_sort_orders_and_missing_values() {
        let mapper = mapper(json!({"name": {"type": "dvstring"}}));
        let index = MemoryIndex::new();
        add(&index, &mapper, "a", json!({"name": ["Zatanna", "Batgirl"]}));
        add(&index, &mapper, "b", json!({}));
        add(&index, &mapper, "c", json!({"name": "Cyborg"}));
        add(&index, &mapper, "d", json!({"name": "cyborg"}));

        let ascending: Vec<_> = index
            .sort_by("name", SortOrder::Ascending)
            .unwrap()
            .into_iter()
            .map(|hit| hit.id)
            .collect();
        assert_eq!(ascending, vec!["a", "c", "d", "b"]);

        let descending = index.sort_by("name", SortOrder::Descending).unwrap();
        let ids: Vec<_> = descending.iter().map(|hit| hit.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d", "b"]);
        assert_eq!(descending[0].value_str(), Some("zatanna"));
        assert_eq!(descending[3].value, None);
    }

    #[test]
    fn test_sort_by_unknown_field() {
        let index = MemoryIndex::new();
        assert!(index.sort_by("name", SortOrder::Ascending).is_err());
        assert!(!index.has_doc_values("name"));
    }

    #[test]
    fn test_stored_values_and_duplicates() {
        let mapper = mapper(json!({"name": {"type": "dvstring", "store": true}}));
        let index = MemoryIndex::new();
        let doc = add(&index, &mapper, "1", json!({"name": "Raven"}));

        assert_eq!(index.stored(doc, "name"), vec!["Raven".to_string()]);
        assert_eq!(index.doc("1"), Some(doc));
        assert_eq!(index.id(doc).as_deref(), Some("1"));

        let again = mapper.parse_document("1", &json!({"name": "Raven"})).unwrap();
        assert!(index.add_document(&again).is_err());
        assert_eq!(index.doc_count(), 1);
    }

    #[test]
    fn test_docs_only_fields_have_no_positions() {
        let mapper = mapper(json!({"code": {"type": "string", "index": "not_analyzed"}}));
        let index = MemoryIndex::new();
        add(&index, &mapper, "1", json!({"code": "X-23"}));

        assert_eq!(
            index.postings("code", "X-23"),
            vec![Posting {
                doc: 0,
                positions: Vec::new()
            }]
        );
        assert_eq!(index.terms("code"), vec!["X-23".to_string()]);
    }

    #[test]
    fn test_concurrent_indexing() {
        let mapper = Arc::new(mapper(json!({"name": {"type": "dvstring"}})));
        let index = Arc::new(MemoryIndex::new());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let mapper = Arc::clone(&mapper);
                let index = Arc::clone(&index);
                thread::spawn(move || {
                    for i in 0..25 {
                        let id = format!("{t}-{i}");
                        let doc = mapper
                            .parse_document(&id, &json!({"name": format!("Hero {id}")}))
                            .unwrap();
                        index.add_document(&doc).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(index.doc_count(), 100);
        let doc_values = index.doc_values("name").unwrap();
        assert_eq!(doc_values.value_count(), 100);
        assert_eq!(index.term_docs("name", "hero").len(), 100);
    }
}
