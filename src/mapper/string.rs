//! The plain `string` field type.
//!
//! An analyzed (or not analyzed) text field. With `doc_values: true` the raw
//! value is also kept as the field's doc value, which only makes sense for
//! fields that are not analyzed. Values longer than `ignore_above` characters
//! are not indexed at all.

use std::sync::Arc;

use log::debug;
use serde_json::{Map, Value, json};

use crate::error::{DvStringError, Result};
use crate::mapper::parser::{
    node_i32, normalize_keys, parse_multi_field_option, parse_string_option, parse_text_option,
    unknown_option,
};
use crate::mapper::registry::{BuilderContext, MapperBuilder, ParserContext, TypeParser};
use crate::mapper::text::{TextField, TextFieldBuilder};
use crate::mapper::{FieldMapper, FieldNames, ParsedField};

pub const CONTENT_TYPE: &str = "string";

/// Builds a [`StringFieldMapper`].
pub struct StringFieldBuilder {
    text: TextFieldBuilder,
    ignore_above: i32,
}

impl StringFieldBuilder {
    pub fn new<S: Into<String>>(name: S) -> Self {
        StringFieldBuilder {
            text: TextFieldBuilder::new(name),
            ignore_above: -1,
        }
    }

    /// The generic text field options.
    pub fn text(&mut self) -> &mut TextFieldBuilder {
        &mut self.text
    }

    /// Values longer than `ignore_above` characters are skipped. `<= 0` disables.
    pub fn ignore_above(&mut self, ignore_above: i32) -> &mut Self {
        self.ignore_above = ignore_above;
        self
    }

    pub fn build_mapper(&self, ctx: &BuilderContext<'_>) -> Result<StringFieldMapper> {
        let field_type = self.text.field_type();
        if field_type.doc_values && field_type.indexed && field_type.tokenized {
            return Err(DvStringError::mapper_parsing(
                self.text.name(),
                "doc_values",
                "field cannot be analyzed and have doc values",
            ));
        }

        Ok(StringFieldMapper {
            text: self.text.build(ctx)?,
            ignore_above: self.ignore_above,
        })
    }
}

impl MapperBuilder for StringFieldBuilder {
    fn name(&self) -> &str {
        self.text.name()
    }

    fn build(&self, ctx: &BuilderContext<'_>) -> Result<Arc<dyn FieldMapper>> {
        Ok(Arc::new(self.build_mapper(ctx)?))
    }
}

/// A plain string field.
#[derive(Clone, Debug)]
pub struct StringFieldMapper {
    text: TextField,
    ignore_above: i32,
}

impl StringFieldMapper {
    pub fn text(&self) -> &TextField {
        &self.text
    }

    pub fn ignore_above(&self) -> i32 {
        self.ignore_above
    }
}

impl FieldMapper for StringFieldMapper {
    fn names(&self) -> &FieldNames {
        self.text.names()
    }

    fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    fn has_doc_values(&self) -> bool {
        self.text.field_type().doc_values
    }

    fn parse(&self, value: Option<&str>) -> Result<ParsedField> {
        let Some(value) = self.text.resolve_value(value) else {
            return Ok(ParsedField::empty());
        };

        if self.ignore_above > 0 && value.chars().count() > self.ignore_above as usize {
            debug!(
                "skipping value of field [{}] longer than ignore_above [{}]",
                self.text.names().index_name(),
                self.ignore_above
            );
            return Ok(ParsedField::empty());
        }

        self.text.index(value, self.text.field_type().doc_values)
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
        if self.ignore_above > 0 {
            mapping.insert("ignore_above".into(), json!(self.ignore_above));
        }
        Value::Object(mapping)
    }
}

/// Parses `{"type": "string", ...}`.
pub struct StringTypeParser;

impl TypeParser for StringTypeParser {
    fn parse(
        &self,
        name: &str,
        node: &Map<String, Value>,
        ctx: &ParserContext<'_>,
    ) -> Result<Box<dyn MapperBuilder>> {
        let mut builder = StringFieldBuilder::new(name);

        for (key, value) in normalize_keys(node) {
            if parse_text_option(builder.text(), name, &key, &value, ctx)?
                || parse_string_option(builder.text(), name, &key, &value, ctx)?
            {
                continue;
            }
            if key == "ignore_above" {
                builder.ignore_above(node_i32(name, &key, &value)?);
                continue;
            }
            if !parse_multi_field_option(builder.text(), name, &key, &value, ctx)? {
                return Err(unknown_option(name, &key));
            }
        }

        Ok(Box::new(builder))
    }
}
