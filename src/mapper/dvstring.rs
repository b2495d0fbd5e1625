//! The `dvstring` field type.
//!
//! A `dvstring` field is indexed like an analyzed `string` field and also
//! derives one sortable value per occurrence: the first token of its doc
//! values analyzer, stored as a SortedSet doc value under the field's index
//! name. Without an `index_docvalues_analyzer` the `dvlwc` analyzer is used,
//! which keeps the whole value as one lower-cased token, so sorting by the
//! column orders documents case-insensitively.
//!
//! ```
//! use dvstring::analysis::registry::AnalyzerRegistry;
//! use dvstring::mapper::dvstring::DvStringFieldBuilder;
//! use dvstring::mapper::registry::BuilderContext;
//!
//! let analyzers = AnalyzerRegistry::new();
//! let mapper = DvStringFieldBuilder::new("name")
//!     .ignore_above(20)
//!     .build_mapper(&BuilderContext::new(&analyzers))
//!     .unwrap();
//!
//! let parsed = mapper.extract(Some("Barbara Gordon")).unwrap();
//! assert_eq!(parsed.doc_value.unwrap().as_str(), Some("barbara gordon"));
//!
//! // Over the cutoff: still searchable, but no sortable value.
//! let parsed = mapper.extract(Some("Barbara Joan Gordon, Oracle")).unwrap();
//! assert!(!parsed.entries.is_empty());
//! assert!(parsed.doc_value.is_none());
//! ```

use std::sync::Arc;

use log::{debug, trace};
use serde_json::{Map, Value, json};

use crate::analysis::analyzer::NamedAnalyzer;
use crate::analysis::registry::{DOC_VALUES_LOWERCASE_ANALYZER, doc_values_lowercase_analyzer};
use crate::analysis::token_stream::first_token;
use crate::error::{DvStringError, Result};
use crate::mapper::parser::{
    node_analyzer, node_i32, node_string, normalize_keys, parse_multi_field_option,
    parse_string_option, parse_text_option, unknown_option,
};
use crate::mapper::registry::{BuilderContext, MapperBuilder, ParserContext, TypeParser};
use crate::mapper::text::{TextField, TextFieldBuilder};
use crate::mapper::{DocValue, FieldMapper, FieldNames, ParsedField};

pub const CONTENT_TYPE: &str = "dvstring";

/// What the `ignore_above` cutoff is compared with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IgnoreAboveTarget {
    /// The raw value, in characters. Over the cutoff, no token is derived.
    #[default]
    Value,
    /// The derived token, in characters. Over the cutoff, the token is dropped.
    Token,
}

impl IgnoreAboveTarget {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "value" => Some(IgnoreAboveTarget::Value),
            "token" => Some(IgnoreAboveTarget::Token),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreAboveTarget::Value => "value",
            IgnoreAboveTarget::Token => "token",
        }
    }
}

/// Builds a [`DvStringFieldMapper`].
pub struct DvStringFieldBuilder {
    text: TextFieldBuilder,
    doc_values_analyzer: Option<NamedAnalyzer>,
    ignore_above: i32,
    ignore_above_target: IgnoreAboveTarget,
}

impl DvStringFieldBuilder {
    pub fn new<S: Into<String>>(name: S) -> Self {
        DvStringFieldBuilder {
            text: TextFieldBuilder::new(name),
            doc_values_analyzer: None,
            ignore_above: -1,
            ignore_above_target: IgnoreAboveTarget::Value,
        }
    }

    /// The generic text field options.
    pub fn text(&mut self) -> &mut TextFieldBuilder {
        &mut self.text
    }

    pub fn doc_values_analyzer(&mut self, analyzer: NamedAnalyzer) -> &mut Self {
        self.doc_values_analyzer = Some(analyzer);
        self
    }

    /// Cutoff in characters for deriving the doc value. `<= 0` disables it.
    pub fn ignore_above(&mut self, ignore_above: i32) -> &mut Self {
        self.ignore_above = ignore_above;
        self
    }

    pub fn ignore_above_target(&mut self, target: IgnoreAboveTarget) -> &mut Self {
        self.ignore_above_target = target;
        self
    }

    /// Build the mapper.
    ///
    /// Falls back to the built-in `dvlwc` analyzer when no doc values analyzer
    /// is configured, and re-wraps it with the position offset gap like the
    /// text analyzers.
    pub fn build_mapper(&self, ctx: &BuilderContext<'_>) -> Result<DvStringFieldMapper> {
        let text = self.text.build(ctx)?;

        let mut doc_values_analyzer = match &self.doc_values_analyzer {
            Some(analyzer) => analyzer.clone(),
            None => doc_values_lowercase_analyzer(),
        };
        if text.position_offset_gap() > 0 {
            doc_values_analyzer =
                doc_values_analyzer.with_position_offset_gap(text.position_offset_gap());
        }

        debug!(
            "built dvstring field [{}] with doc values analyzer [{}], ignore_above {} on {}",
            text.names().index_name(),
            doc_values_analyzer.name(),
            self.ignore_above,
            self.ignore_above_target.as_str()
        );

        Ok(DvStringFieldMapper {
            text,
            doc_values_analyzer,
            ignore_above: self.ignore_above,
            ignore_above_target: self.ignore_above_target,
        })
    }
}

impl MapperBuilder for DvStringFieldBuilder {
    fn name(&self) -> &str {
        self.text.name()
    }

    fn build(&self, ctx: &BuilderContext<'_>) -> Result<Arc<dyn FieldMapper>> {
        Ok(Arc::new(self.build_mapper(ctx)?))
    }
}

/// A built `dvstring` field.
///
/// Immutable; [`extract`](Self::extract) may be called from any number of
/// threads at once.
#[derive(Clone, Debug)]
pub struct DvStringFieldMapper {
    text: TextField,
    doc_values_analyzer: NamedAnalyzer,
    ignore_above: i32,
    ignore_above_target: IgnoreAboveTarget,
}

impl DvStringFieldMapper {
    pub fn text(&self) -> &TextField {
        &self.text
    }

    pub fn doc_values_analyzer(&self) -> &NamedAnalyzer {
        &self.doc_values_analyzer
    }

    pub fn ignore_above(&self) -> i32 {
        self.ignore_above
    }

    pub fn ignore_above_target(&self) -> IgnoreAboveTarget {
        self.ignore_above_target
    }

    /// Parse one occurrence of the field.
    ///
    /// An absent value falls back to the null value; with neither, nothing is
    /// produced. Otherwise the value is indexed as text (never as a raw doc
    /// value) and the first token of the doc values analyzer becomes the doc
    /// value, unless the `ignore_above` cutoff applies.
    pub fn extract(&self, value: Option<&str>) -> Result<ParsedField> {
        let Some(value) = self.text.resolve_value(value) else {
            return Ok(ParsedField::empty());
        };

        let mut parsed = self.text.index(value, false)?;
        parsed.doc_value = self.derive(value)?;
        parsed.doc_values_attempted = true;
        Ok(parsed)
    }

    fn derive(&self, value: &str) -> Result<Option<DocValue>> {
        let field = self.text.names().index_name();

        if self.ignore_above_target == IgnoreAboveTarget::Value && self.exceeds_cutoff(value) {
            debug!(
                "value of field [{field}] longer than ignore_above [{}], no doc value derived",
                self.ignore_above
            );
            return Ok(None);
        }

        let Some(token) = first_token(&self.doc_values_analyzer, value)? else {
            trace!("doc values analyzer of field [{field}] produced no token");
            return Ok(None);
        };

        if self.ignore_above_target == IgnoreAboveTarget::Token && self.exceeds_cutoff(&token.text)
        {
            debug!(
                "token of field [{field}] longer than ignore_above [{}], doc value dropped",
                self.ignore_above
            );
            return Ok(None);
        }

        trace!("field [{field}] derived doc value [{}]", token.text);
        Ok(Some(DocValue::new(field, token.text)))
    }

    fn exceeds_cutoff(&self, text: &str) -> bool {
        self.ignore_above > 0 && text.chars().count() > self.ignore_above as usize
    }
}

impl FieldMapper for DvStringFieldMapper {
    fn names(&self) -> &FieldNames {
        self.text.names()
    }

    fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    fn has_doc_values(&self) -> bool {
        true
    }

    fn parse(&self, value: Option<&str>) -> Result<ParsedField> {
        self.extract(value)
    }

    fn multi_fields(&self) -> &[Arc<dyn FieldMapper>] {
        self.text.multi_fields()
    }

    fn copy_to(&self) -> &[String] {
        self.text.copy_to()
    }

    fn to_mapping(&self) -> Value {
        let mut mapping = Map::new();
        mapping.insert("type".into(), json!(CONTENT_TYPE));
        self.text.write_mapping(&mut mapping);

        if self.doc_values_analyzer.name() != DOC_VALUES_LOWERCASE_ANALYZER {
            mapping.insert(
                "index_docvalues_analyzer".into(),
                json!(self.doc_values_analyzer.name()),
            );
        }
        if self.ignore_above > 0 {
            mapping.insert("ignore_above".into(), json!(self.ignore_above));
        }
        if self.ignore_above_target != IgnoreAboveTarget::Value {
            mapping.insert(
                "ignore_above_mode".into(),
                json!(self.ignore_above_target.as_str()),
            );
        }
        Value::Object(mapping)
    }
}

/// Parses `{"type": "dvstring", ...}`.
///
/// Takes every `string` option plus `index_docvalues_analyzer`,
/// `ignore_above` and `ignore_above_mode`.
pub struct DvStringTypeParser;

impl TypeParser for DvStringTypeParser {
    fn parse(
        &self,
        name: &str,
        node: &Map<String, Value>,
        ctx: &ParserContext<'_>,
    ) -> Result<Box<dyn MapperBuilder>> {
        let mut builder = DvStringFieldBuilder::new(name);

        for (key, value) in normalize_keys(node) {
            if parse_text_option(builder.text(), name, &key, &value, ctx)?
                || parse_string_option(builder.text(), name, &key, &value, ctx)?
            {
                continue;
            }
            match key.as_str() {
                "index_docvalues_analyzer" => {
                    builder.doc_values_analyzer(node_analyzer(name, &key, &value, ctx)?);
                }
                "ignore_above" => {
                    builder.ignore_above(node_i32(name, &key, &value)?);
                }
                "ignore_above_mode" => {
                    let mode = node_string(name, &key, &value)?;
                    let target = IgnoreAboveTarget::parse(&mode).ok_or_else(|| {
                        DvStringError::mapper_parsing(
                            name,
                            &key,
                            format!("unknown mode [{mode}], expected value or token"),
                        )
                    })?;
                    builder.ignore_above_target(target);
                }
                _ => {
                    if !parse_multi_field_option(builder.text(), name, &key, &value, ctx)? {
                        return Err(unknown_option(name, &key));
                    }
                }
            }
        }

        Ok(Box::new(builder))
    }
}
