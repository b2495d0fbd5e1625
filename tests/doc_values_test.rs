//! Doc value derivation through document parsing and indexing.

use dvstring::prelude::*;
use serde_json::{Value, json};

fn index_documents(properties: Value, sources: &[Value]) -> Result<MemoryIndex> {
    let mapper = DocumentMapper::parse(
        &json!({"superhero": {"properties": properties}}),
        &MapperRegistry::new(),
        &AnalyzerRegistry::new(),
    )?;

    let index = MemoryIndex::new();
    for (i, source) in sources.iter().enumerate() {
        index.add_document(&mapper.parse_document(&i.to_string(), source)?)?;
    }
    Ok(index)
}

fn sorted_values(index: &MemoryIndex, order: SortOrder) -> Result<Vec<Option<String>>> {
    Ok(index
        .sort_by("name", order)?
        .iter()
        .map(|hit| hit.value_str().map(str::to_string))
        .collect())
}

#[test]
fn test_null_value_replaces_explicit_null() -> Result<()> {
    let index = index_documents(
        json!({"name": {"type": "dvstring", "null_value": "Unknown Hero"}}),
        &[
            json!({"name": null}),
            json!({"alias": "no name at all"}),
            json!({"name": "Storm"}),
        ],
    )?;

    let hits = index.sort_by("name", SortOrder::Ascending)?;
    let ids: Vec<&str> = hits.iter().map(|hit| hit.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "0", "1"]);
    assert_eq!(hits[1].value_str(), Some("unknown hero"));
    assert_eq!(hits[2].value, None);

    assert_eq!(index.term_docs("name", "unknown"), vec![0]);
    assert!(index.term_docs("name", "alias").is_empty());
    Ok(())
}

#[test]
fn test_ignore_above_keeps_text_entries() -> Result<()> {
    let index = index_documents(
        json!({"name": {"type": "dvstring", "ignore_above": 8}}),
        &[
            json!({"name": "Wolverine"}),
            json!({"name": "Storm"}),
        ],
    )?;

    assert_eq!(
        sorted_values(&index, SortOrder::Ascending)?,
        vec![Some("storm".to_string()), None]
    );
    assert_eq!(index.term_docs("name", "wolverine"), vec![0]);
    Ok(())
}

#[test]
fn test_ignore_above_token_mode_measures_derived_token() -> Result<()> {
    let properties = json!({
        "name": {
            "type": "dvstring",
            "ignore_above": 6,
            "ignore_above_mode": "token",
            "index_docvalues_analyzer": "standard"
        }
    });
    let index = index_documents(
        properties,
        &[
            json!({"name": "Storm of the Century"}),
            json!({"name": "Nightcrawler"}),
        ],
    )?;

    assert_eq!(
        sorted_values(&index, SortOrder::Ascending)?,
        vec![Some("storm".to_string()), None]
    );
    Ok(())
}

#[test]
fn test_multi_valued_field_sorts_by_min_and_max() -> Result<()> {
    let index = index_documents(
        json!({"name": {"type": "dvstring"}}),
        &[
            json!({"name": ["Storm", "Cyclops"]}),
            json!({"name": "Jean Grey"}),
        ],
    )?;

    let doc_values = index.doc_values("name").expect("doc values for name");
    assert_eq!(doc_values.value_count(), 3);
    assert_eq!(doc_values.ords(0).len(), 2);

    assert_eq!(
        sorted_values(&index, SortOrder::Ascending)?,
        vec![Some("cyclops".to_string()), Some("jean grey".to_string())]
    );
    assert_eq!(
        sorted_values(&index, SortOrder::Descending)?,
        vec![Some("storm".to_string()), Some("jean grey".to_string())]
    );
    Ok(())
}

#[test]
fn test_multi_values_are_separated_by_position_gap() -> Result<()> {
    let index = index_documents(
        json!({"name": {"type": "dvstring", "position_offset_gap": 100}}),
        &[json!({"name": ["Black Widow", "Natasha Romanoff"]})],
    )?;

    let widow = index.postings("name", "widow");
    let natasha = index.postings("name", "natasha");
    assert_eq!(widow.len(), 1);
    assert_eq!(natasha.len(), 1);
    assert!(natasha[0].positions[0] - widow[0].positions[0] > 100);
    Ok(())
}

#[test]
fn test_copy_to_and_multi_fields_derive_their_own_values() -> Result<()> {
    let mapper = DocumentMapper::parse(
        &json!({"superhero": {"properties": {
            "name": {
                "type": "dvstring",
                "copy_to": ["everything"],
                "fields": {"first": {"type": "dvstring", "index_docvalues_analyzer": "standard"}}
            },
            "everything": {"type": "dvstring", "index_docvalues_analyzer": "whitespace"}
        }}}),
        &MapperRegistry::new(),
        &AnalyzerRegistry::new(),
    )?;

    let doc = mapper.parse_document("1", &json!({"name": "Doctor Strange"}))?;
    assert_eq!(
        doc.doc_value("name").and_then(DocValue::as_str),
        Some("doctor strange")
    );
    assert_eq!(
        doc.doc_value("name.first").and_then(DocValue::as_str),
        Some("doctor")
    );
    assert_eq!(
        doc.doc_value("everything").and_then(DocValue::as_str),
        Some("Doctor")
    );

    let index = MemoryIndex::new();
    index.add_document(&doc)?;
    assert!(index.has_doc_values("name.first"));
    assert_eq!(index.term_docs("everything", "strange"), vec![0]);
    Ok(())
}

#[test]
fn test_object_value_is_a_document_error() -> Result<()> {
    let result = index_documents(
        json!({"name": {"type": "dvstring"}}),
        &[json!({"name": {"first": "Bruce"}})],
    );
    assert!(matches!(result, Err(DvStringError::Document(_))));
    Ok(())
}
