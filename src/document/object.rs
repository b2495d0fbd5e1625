use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;
use serde_json::{Map, Value};

use crate::analysis::registry::AnalyzerRegistry;
use crate::error::{DvStringError, Result};
use crate::mapper::FieldMapper;
use crate::mapper::parser::unknown_option;
use crate::mapper::registry::{BuilderContext, MapperRegistry};

/// The `properties` of the root or of an inner object.
#[derive(Clone, Debug, Default)]
pub(crate) struct ObjectMapping {
    fields: BTreeMap<String, Arc<dyn FieldMapper>>,
    objects: BTreeMap<String, ObjectMapping>,
}

impl ObjectMapping {
    /// Parse `properties` of the object `name`.
    ///
    /// A property with `properties` and no `type` (or `type: object`) is an
    /// inner object; everything else goes through the mapper registry.
    pub(crate) fn parse(
        name: &str,
        properties: &Value,
        ctx: &BuilderContext<'_>,
        mappers: &MapperRegistry,
        analyzers: &AnalyzerRegistry,
    ) -> Result<Self> {
        let properties = properties.as_object().ok_or_else(|| {
            DvStringError::mapper_parsing(name, "properties", "expected an object of fields")
        })?;

        let mut mapping = ObjectMapping::default();
        for (field, node) in properties {
            if is_inner_object(node) {
                mapping
                    .objects
                    .insert(field.clone(), Self::parse_inner(field, node, ctx, mappers, analyzers)?);
            } else {
                let mapper = mappers.parse_field(field, node, analyzers)?.build(ctx)?;
                mapping.fields.insert(field.clone(), mapper);
            }
        }
        Ok(mapping)
    }

    fn parse_inner(
        name: &str,
        node: &Value,
        ctx: &BuilderContext<'_>,
        mappers: &MapperRegistry,
        analyzers: &AnalyzerRegistry,
    ) -> Result<Self> {
        let mut properties = None;
        if let Some(node) = node.as_object() {
            for (key, value) in node {
                match key.as_str() {
                    "type" => {}
                    "properties" => properties = Some(value),
                    other => return Err(unknown_option(name, other)),
                }
            }
        }

        match properties {
            Some(properties) => {
                Self::parse(name, properties, &ctx.child(name), mappers, analyzers)
            }
            None => Ok(ObjectMapping::default()),
        }
    }

    pub(crate) fn field(&self, name: &str) -> Option<&Arc<dyn FieldMapper>> {
        self.fields.get(name)
    }

    pub(crate) fn object(&self, name: &str) -> Option<&ObjectMapping> {
        self.objects.get(name)
    }

    /// Add every field mapper below this object, multi-fields included, keyed
    /// by index name.
    pub(crate) fn collect_fields(&self, into: &mut AHashMap<String, Arc<dyn FieldMapper>>) {
        fn collect(mapper: &Arc<dyn FieldMapper>, into: &mut AHashMap<String, Arc<dyn FieldMapper>>) {
            into.insert(mapper.names().index_name().to_string(), Arc::clone(mapper));
            for sub in mapper.multi_fields() {
                collect(sub, into);
            }
        }

        for mapper in self.fields.values() {
            collect(mapper, into);
        }
        for object in self.objects.values() {
            object.collect_fields(into);
        }
    }

    pub(crate) fn to_mapping(&self) -> Value {
        let mut properties = Map::new();
        for (name, mapper) in &self.fields {
            properties.insert(name.clone(), mapper.to_mapping());
        }
        for (name, object) in &self.objects {
            properties.insert(name.clone(), object.to_mapping());
        }

        let mut mapping = Map::new();
        mapping.insert("properties".into(), Value::Object(properties));
        Value::Object(mapping)
    }
}

fn is_inner_object(node: &Value) -> bool {
    match node.get("type") {
        None => node.get("properties").is_some(),
        Some(Value::String(type_name)) => type_name == "object",
        Some(_) => false,
    }
}
