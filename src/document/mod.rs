//! Document parsing against a type mapping.
//!
//! A [`DocumentMapper`] is built from a type mapping such as
//!
//! ```json
//! {"superhero": {"properties": {"name": {"type": "dvstring"}}}}
//! ```
//!
//! and turns JSON sources into [`ParsedDocument`]s by calling each field
//! mapper once per value occurrence.
//!
//! # Examples
//!
//! ```
//! use dvstring::prelude::*;
//! use serde_json::json;
//!
//! let analyzers = AnalyzerRegistry::new();
//! let mappers = MapperRegistry::new();
//! let mapping = json!({"superhero": {"properties": {
//!     "name": {"type": "dvstring", "doc_values": true}
//! }}});
//!
//! let mapper = DocumentMapper::parse(&mapping, &mappers, &analyzers).unwrap();
//! let doc = mapper
//!     .parse_document("1", &json!({"name": "Wonder Woman"}))
//!     .unwrap();
//!
//! assert_eq!(doc.doc_value("name").unwrap().as_str(), Some("wonder woman"));
//! ```

mod object;

use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, trace};
use serde_json::{Map, Value};

use crate::analysis::registry::AnalyzerRegistry;
use crate::error::{DvStringError, Result};
use crate::mapper::parser::unknown_option;
use crate::mapper::registry::{BuilderContext, MapperRegistry};
use crate::mapper::{DocValue, FieldMapper, IndexEntry, ParsedField};

use object::ObjectMapping;

/// Field name used in errors about the mapping root.
const ROOT: &str = "_root";

/// Parses JSON documents of one mapping type.
#[derive(Clone, Debug)]
pub struct DocumentMapper {
    type_name: String,
    root: ObjectMapping,
    // Every field mapper by index name, multi-fields included.
    fields: AHashMap<String, Arc<dyn FieldMapper>>,
}

impl DocumentMapper {
    /// Parse a type mapping and build its field mappers.
    ///
    /// Fails on the first invalid field, on `copy_to` targets that are not
    /// mapped, and on mappings that do not hold exactly one type.
    pub fn parse(
        mapping: &Value,
        mappers: &MapperRegistry,
        analyzers: &AnalyzerRegistry,
    ) -> Result<Self> {
        let types = mapping.as_object().ok_or_else(|| {
            DvStringError::mapper_parsing(ROOT, "mapping", "expected an object keyed by type name")
        })?;
        let mut types = types.iter();
        let (Some((type_name, type_node)), None) = (types.next(), types.next()) else {
            return Err(DvStringError::mapper_parsing(
                ROOT,
                "mapping",
                "expected exactly one type",
            ));
        };

        let type_node = type_node.as_object().ok_or_else(|| {
            DvStringError::mapper_parsing(type_name, "mapping", "type mapping must be an object")
        })?;
        let mut properties = None;
        for (key, value) in type_node {
            match key.as_str() {
                "properties" => properties = Some(value),
                other => return Err(unknown_option(type_name, other)),
            }
        }

        let ctx = BuilderContext::new(analyzers);
        let root = match properties {
            Some(properties) => {
                ObjectMapping::parse(type_name, properties, &ctx, mappers, analyzers)?
            }
            None => ObjectMapping::default(),
        };

        let mut fields = AHashMap::new();
        root.collect_fields(&mut fields);

        for mapper in fields.values() {
            for target in mapper.copy_to() {
                if !fields.contains_key(target) {
                    return Err(DvStringError::mapper_parsing(
                        mapper.names().index_name(),
                        "copy_to",
                        format!("target field [{target}] is not mapped"),
                    ));
                }
            }
        }

        debug!(
            "parsed mapping of type [{type_name}] with {} field(s)",
            fields.len()
        );

        Ok(DocumentMapper {
            type_name: type_name.clone(),
            root,
            fields,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The mapper of the field with the given index name.
    pub fn field(&self, index_name: &str) -> Option<&Arc<dyn FieldMapper>> {
        self.fields.get(index_name)
    }

    /// Index names of the fields that produce doc values, sorted.
    pub fn doc_values_fields(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .fields
            .iter()
            .filter(|(_, mapper)| mapper.has_doc_values())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// The type mapping, with only non-default options.
    pub fn to_mapping(&self) -> Value {
        let mut mapping = Map::new();
        mapping.insert(self.type_name.clone(), self.root.to_mapping());
        Value::Object(mapping)
    }

    /// Parse a JSON source.
    ///
    /// Strings, numbers and booleans are passed to the field mapper as text,
    /// `null` as an absent value, and arrays once per element. Multi-fields
    /// and `copy_to` targets receive the same value. Fields without a mapping
    /// are skipped.
    pub fn parse_document(&self, id: &str, source: &Value) -> Result<ParsedDocument> {
        let source = source.as_object().ok_or_else(|| {
            DvStringError::document(format!("source of document [{id}] must be an object"))
        })?;

        let mut fields = Vec::new();
        self.parse_object(&self.root, source, &mut fields)?;

        trace!("parsed document [{id}] into {} field(s)", fields.len());
        Ok(ParsedDocument {
            id: id.to_string(),
            fields,
        })
    }

    fn parse_object(
        &self,
        mapping: &ObjectMapping,
        object: &Map<String, Value>,
        fields: &mut Vec<ParsedField>,
    ) -> Result<()> {
        for (key, value) in object {
            if let Some(mapper) = mapping.field(key) {
                self.parse_value(mapper, value, fields)?;
            } else if let Some(child) = mapping.object(key) {
                self.parse_inner_object(key, child, value, fields)?;
            } else {
                trace!("no mapping for field [{key}], skipping");
            }
        }
        Ok(())
    }

    fn parse_inner_object(
        &self,
        key: &str,
        mapping: &ObjectMapping,
        value: &Value,
        fields: &mut Vec<ParsedField>,
    ) -> Result<()> {
        match value {
            Value::Object(object) => self.parse_object(mapping, object, fields),
            Value::Array(items) => items
                .iter()
                .try_for_each(|item| self.parse_inner_object(key, mapping, item, fields)),
            Value::Null => Ok(()),
            other => Err(DvStringError::document(format!(
                "object field [{key}] cannot hold the value [{other}]"
            ))),
        }
    }

    fn parse_value(
        &self,
        mapper: &Arc<dyn FieldMapper>,
        value: &Value,
        fields: &mut Vec<ParsedField>,
    ) -> Result<()> {
        match value {
            Value::Null => self.parse_occurrence(mapper, None, fields),
            Value::String(s) => self.parse_occurrence(mapper, Some(s), fields),
            Value::Number(n) => self.parse_occurrence(mapper, Some(&n.to_string()), fields),
            Value::Bool(b) => self.parse_occurrence(mapper, Some(&b.to_string()), fields),
            Value::Array(items) => items
                .iter()
                .try_for_each(|item| self.parse_value(mapper, item, fields)),
            Value::Object(_) => Err(DvStringError::document(format!(
                "field [{}] expected a value but found an object",
                mapper.names().index_name()
            ))),
        }
    }

    fn parse_occurrence(
        &self,
        mapper: &Arc<dyn FieldMapper>,
        value: Option<&str>,
        fields: &mut Vec<ParsedField>,
    ) -> Result<()> {
        parse_with_multi_fields(mapper, value, fields)?;

        let Some(value) = value else {
            return Ok(());
        };
        for target in mapper.copy_to() {
            let target_mapper = self.fields.get(target).ok_or_else(|| {
                DvStringError::document(format!("copy_to target [{target}] is not mapped"))
            })?;
            parse_with_multi_fields(target_mapper, Some(value), fields)?;
        }
        Ok(())
    }
}

fn parse_with_multi_fields(
    mapper: &Arc<dyn FieldMapper>,
    value: Option<&str>,
    fields: &mut Vec<ParsedField>,
) -> Result<()> {
    let parsed = mapper.parse(value)?;
    if !parsed.is_empty() || parsed.doc_values_attempted {
        fields.push(parsed);
    }
    for sub in mapper.multi_fields() {
        parse_with_multi_fields(sub, value, fields)?;
    }
    Ok(())
}

/// The parsed fields of one document.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedDocument {
    id: String,
    fields: Vec<ParsedField>,
}

impl ParsedDocument {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// One entry per field occurrence, in source order.
    pub fn fields(&self) -> &[ParsedField] {
        &self.fields
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.fields.iter().flat_map(|field| field.entries.iter())
    }

    pub fn doc_values(&self) -> impl Iterator<Item = &DocValue> {
        self.fields.iter().filter_map(|field| field.doc_value.as_ref())
    }

    /// The first doc value of `field`.
    pub fn doc_value(&self, field: &str) -> Option<&DocValue> {
        self.doc_values().find(|value| value.field == field)
    }

    /// All entries of `field`.
    pub fn entries_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a IndexEntry> {
        self.entries().filter(move |entry| entry.name == field)
    }
}
