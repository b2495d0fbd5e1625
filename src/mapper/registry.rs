//! Type parsers and their lookup by mapping type name.
//!
//! Turning a JSON field mapping into a [`FieldMapper`] happens in two steps:
//! a [`TypeParser`] validates the options and fills a [`MapperBuilder`], and
//! the builder resolves defaults and produces the immutable mapper. Both steps
//! fail fast with an error naming the field and the option.
//!
//! ```
//! use dvstring::analysis::registry::AnalyzerRegistry;
//! use dvstring::mapper::registry::MapperRegistry;
//! use serde_json::json;
//!
//! let analyzers = AnalyzerRegistry::new();
//! let mappers = MapperRegistry::new();
//!
//! let mapper = mappers
//!     .build_field("name", &json!({"type": "dvstring", "doc_values": true}), &analyzers)
//!     .unwrap();
//!
//! assert_eq!(mapper.content_type(), "dvstring");
//! assert!(mapper.has_doc_values());
//! ```

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use serde_json::{Map, Value};

use crate::analysis::registry::AnalyzerRegistry;
use crate::error::{DvStringError, Result};
use crate::mapper::FieldMapper;
use crate::mapper::dvstring::DvStringTypeParser;
use crate::mapper::string::StringTypeParser;

/// Produces a field mapper once all options are known.
pub trait MapperBuilder {
    /// Field name as written in the mapping.
    fn name(&self) -> &str;

    /// Resolve defaults against `ctx` and build the mapper.
    fn build(&self, ctx: &BuilderContext<'_>) -> Result<Arc<dyn FieldMapper>>;
}

/// Parses the options of one mapping type into a builder.
pub trait TypeParser: Send + Sync {
    fn parse(
        &self,
        name: &str,
        node: &Map<String, Value>,
        ctx: &ParserContext<'_>,
    ) -> Result<Box<dyn MapperBuilder>>;
}

/// What a type parser can look up while parsing.
#[derive(Clone, Copy)]
pub struct ParserContext<'a> {
    analyzers: &'a AnalyzerRegistry,
    mappers: &'a MapperRegistry,
}

impl<'a> ParserContext<'a> {
    pub fn new(analyzers: &'a AnalyzerRegistry, mappers: &'a MapperRegistry) -> Self {
        ParserContext { analyzers, mappers }
    }

    pub fn analyzers(&self) -> &'a AnalyzerRegistry {
        self.analyzers
    }

    pub fn mappers(&self) -> &'a MapperRegistry {
        self.mappers
    }
}

/// Where a builder sits in the mapping: the analyzers to default from and the
/// object path that prefixes its index name.
#[derive(Clone, Debug)]
pub struct BuilderContext<'a> {
    analyzers: &'a AnalyzerRegistry,
    path: Vec<String>,
}

impl<'a> BuilderContext<'a> {
    /// A context at the root of the mapping.
    pub fn new(analyzers: &'a AnalyzerRegistry) -> Self {
        BuilderContext {
            analyzers,
            path: Vec::new(),
        }
    }

    pub fn analyzers(&self) -> &'a AnalyzerRegistry {
        self.analyzers
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The context of the fields nested under `name`.
    pub fn child(&self, name: &str) -> Self {
        let mut path = self.path.clone();
        path.push(name.to_string());
        BuilderContext {
            analyzers: self.analyzers,
            path,
        }
    }

    /// A context with the same analyzers and an empty path.
    pub fn root(&self) -> Self {
        BuilderContext::new(self.analyzers)
    }

    /// `name` prefixed with the current path.
    pub fn full_name(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path.join("."), name)
        }
    }
}

/// Type parsers by mapping type name.
#[derive(Clone)]
pub struct MapperRegistry {
    parsers: AHashMap<String, Arc<dyn TypeParser>>,
}

impl MapperRegistry {
    /// A registry with the `string` and `dvstring` types.
    pub fn new() -> Self {
        let mut registry = MapperRegistry {
            parsers: AHashMap::new(),
        };
        registry.register(crate::mapper::string::CONTENT_TYPE, Arc::new(StringTypeParser));
        registry.register(
            crate::mapper::dvstring::CONTENT_TYPE,
            Arc::new(DvStringTypeParser),
        );
        registry
    }

    /// Register (or replace) the parser of `type_name`.
    pub fn register<S: Into<String>>(&mut self, type_name: S, parser: Arc<dyn TypeParser>) {
        self.parsers.insert(type_name.into(), parser);
    }

    pub fn type_parser(&self, type_name: &str) -> Option<Arc<dyn TypeParser>> {
        self.parsers.get(type_name).cloned()
    }

    /// Parse the mapping `node` of field `name` into a builder.
    ///
    /// The node must be an object with a `type` key naming a registered type.
    pub fn parse_field(
        &self,
        name: &str,
        node: &Value,
        analyzers: &AnalyzerRegistry,
    ) -> Result<Box<dyn MapperBuilder>> {
        let node = node.as_object().ok_or_else(|| {
            DvStringError::mapper_parsing(name, "type", "field mapping must be an object")
        })?;
        let type_name = match node.get("type") {
            Some(Value::String(type_name)) => type_name.as_str(),
            Some(other) => {
                return Err(DvStringError::mapper_parsing(
                    name,
                    "type",
                    format!("expected a type name, got [{other}]"),
                ));
            }
            None => {
                return Err(DvStringError::mapper_parsing(name, "type", "no type specified"));
            }
        };
        let parser = self.type_parser(type_name).ok_or_else(|| {
            DvStringError::mapper_parsing(
                name,
                "type",
                format!("no handler for type [{type_name}]"),
            )
        })?;

        parser.parse(name, node, &ParserContext::new(analyzers, self))
    }

    /// Parse and build a top-level field in one step.
    pub fn build_field(
        &self,
        name: &str,
        node: &Value,
        analyzers: &AnalyzerRegistry,
    ) -> Result<Arc<dyn FieldMapper>> {
        self.parse_field(name, node, analyzers)?
            .build(&BuilderContext::new(analyzers))
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.parsers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for MapperRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_registered_types() {
        assert_eq!(MapperRegistry::new().type_names(), vec!["dvstring", "string"]);
    }

    #[test]
    fn test_unknown_type() {
        let analyzers = AnalyzerRegistry::new();
        let err = MapperRegistry::new()
            .build_field("name", &json!({"type": "geo_shape"}), &analyzers)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to parse mapping for field [name], option [type]: no handler for type [geo_shape]"
        );
    }

    #[test]
    fn test_missing_type() {
        let analyzers = AnalyzerRegistry::new();
        let mappers = MapperRegistry::new();

        assert!(mappers.build_field("name", &json!({}), &analyzers).is_err());
        assert!(mappers.build_field("name", &json!("dvstring"), &analyzers).is_err());
    }

    #[test]
    fn test_builder_context_paths() {
        let analyzers = AnalyzerRegistry::new();
        let ctx = BuilderContext::new(&analyzers);

        assert_eq!(ctx.full_name("name"), "name");
        let nested = ctx.child("hero").child("alias");
        assert_eq!(nested.full_name("name"), "hero.alias.name");
        assert_eq!(nested.root().full_name("name"), "name");
    }
}
