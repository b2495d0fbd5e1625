//! Mapping option parsing shared by the string type parsers.
//!
//! Every helper takes the field name and the option key so errors can name
//! both. The `parse_*_option` functions return `Ok(true)` when they consumed
//! the option and `Ok(false)` when it belongs to someone else.

use serde_json::{Map, Value};

use crate::analysis::analyzer::NamedAnalyzer;
use crate::error::{DvStringError, Result};
use crate::mapper::field_type::{IndexOptions, TermVector};
use crate::mapper::registry::ParserContext;
use crate::mapper::text::{MultiFieldPath, TextFieldBuilder};

/// Similarities a field may name.
pub const SIMILARITIES: &[&str] = &["default", "classic", "BM25"];

/// `camelCase` to `snake_case`. Already snake-cased keys are unchanged.
pub fn to_underscore_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 4);
    for (i, c) in value.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// A copy of `node` with every key in snake case.
pub fn normalize_keys(node: &Map<String, Value>) -> Map<String, Value> {
    node.iter()
        .map(|(key, value)| (to_underscore_case(key), value.clone()))
        .collect()
}

/// The error for an option no parser recognized.
pub fn unknown_option(field: &str, option: &str) -> DvStringError {
    DvStringError::mapper_parsing(field, option, "unknown mapping option")
}

pub fn node_bool(field: &str, option: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => match s.as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(DvStringError::mapper_parsing(
                field,
                option,
                format!("expected a boolean, got [{s}]"),
            )),
        },
        other => Err(DvStringError::mapper_parsing(
            field,
            option,
            format!("expected a boolean, got [{other}]"),
        )),
    }
}

pub fn node_f32(field: &str, option: &str, value: &Value) -> Result<f32> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.map(|n| n as f32).ok_or_else(|| {
        DvStringError::mapper_parsing(field, option, format!("expected a number, got [{value}]"))
    })
}

pub fn node_i32(field: &str, option: &str, value: &Value) -> Result<i32> {
    let number = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    number
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| {
            DvStringError::mapper_parsing(
                field,
                option,
                format!("expected an integer, got [{value}]"),
            )
        })
}

/// Strings as is; numbers and booleans in their JSON form.
pub fn node_string(field: &str, option: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(DvStringError::mapper_parsing(
            field,
            option,
            format!("expected a string, got [{other}]"),
        )),
    }
}

/// A single string or an array of strings.
pub fn node_string_list(field: &str, option: &str, value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Array(values) => values
            .iter()
            .map(|value| node_string(field, option, value))
            .collect(),
        value => Ok(vec![node_string(field, option, value)?]),
    }
}

/// Resolve the analyzer named by `value`.
pub fn node_analyzer(
    field: &str,
    option: &str,
    value: &Value,
    ctx: &ParserContext<'_>,
) -> Result<NamedAnalyzer> {
    let name = node_string(field, option, value)?;
    ctx.analyzers().require(&name, field)
}

/// Options every string-like field understands.
pub fn parse_text_option(
    builder: &mut TextFieldBuilder,
    field: &str,
    key: &str,
    value: &Value,
    ctx: &ParserContext<'_>,
) -> Result<bool> {
    match key {
        "type" => {}
        "index" => match node_string(field, key, value)?.as_str() {
            "analyzed" => {
                builder.indexed(true).tokenized(true);
            }
            "not_analyzed" => {
                builder.indexed(true).tokenized(false);
            }
            "no" => {
                builder.indexed(false).tokenized(false);
            }
            other => {
                return Err(DvStringError::mapper_parsing(
                    field,
                    key,
                    format!("unknown index mode [{other}], expected analyzed, not_analyzed or no"),
                ));
            }
        },
        "store" => {
            builder.stored(node_bool(field, key, value)?);
        }
        "boost" => {
            builder.boost(node_f32(field, key, value)?);
        }
        "analyzer" => {
            let analyzer = node_analyzer(field, key, value, ctx)?;
            builder.index_analyzer(analyzer.clone()).search_analyzer(analyzer);
        }
        "index_analyzer" => {
            builder.index_analyzer(node_analyzer(field, key, value, ctx)?);
        }
        "search_analyzer" => {
            builder.search_analyzer(node_analyzer(field, key, value, ctx)?);
        }
        "index_options" => {
            let name = node_string(field, key, value)?;
            let options = IndexOptions::parse(&name).ok_or_else(|| {
                DvStringError::mapper_parsing(
                    field,
                    key,
                    format!("unknown index options [{name}]"),
                )
            })?;
            builder.index_options(options);
        }
        "omit_norms" => {
            builder.omit_norms(node_bool(field, key, value)?);
        }
        "norms" => parse_norms(builder, field, value)?,
        "term_vector" => {
            let name = node_string(field, key, value)?;
            let term_vector = TermVector::parse(&name).ok_or_else(|| {
                DvStringError::mapper_parsing(
                    field,
                    key,
                    format!("unknown term vector setting [{name}]"),
                )
            })?;
            builder.term_vector(term_vector);
        }
        "doc_values" => {
            builder.doc_values(node_bool(field, key, value)?);
        }
        "include_in_all" => {
            builder.include_in_all(node_bool(field, key, value)?);
        }
        "copy_to" => {
            builder.copy_to(node_string_list(field, key, value)?);
        }
        "similarity" => {
            let name = node_string(field, key, value)?;
            if !SIMILARITIES.contains(&name.as_str()) {
                return Err(DvStringError::mapper_parsing(
                    field,
                    key,
                    format!("unknown similarity [{name}]"),
                ));
            }
            builder.similarity(name);
        }
        "fielddata" => {
            if !value.is_object() {
                return Err(DvStringError::mapper_parsing(
                    field,
                    key,
                    "fielddata settings must be an object",
                ));
            }
            builder.fielddata(value.clone());
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_norms(builder: &mut TextFieldBuilder, field: &str, value: &Value) -> Result<()> {
    let norms = value
        .as_object()
        .ok_or_else(|| DvStringError::mapper_parsing(field, "norms", "expected an object"))?;

    for (key, value) in normalize_keys(norms) {
        let option = format!("norms.{key}");
        match key.as_str() {
            "enabled" => {
                builder.omit_norms(!node_bool(field, &option, &value)?);
            }
            "loading" => {
                let loading = node_string(field, &option, &value)?;
                if loading != "eager" && loading != "lazy" {
                    return Err(DvStringError::mapper_parsing(
                        field,
                        option,
                        format!("unknown loading mode [{loading}]"),
                    ));
                }
                builder.norms_loading(loading);
            }
            _ => return Err(unknown_option(field, &option)),
        }
    }
    Ok(())
}

/// Options of the `string` family that are not generic to every field:
/// `null_value`, `search_quote_analyzer` and `position_offset_gap`.
pub fn parse_string_option(
    builder: &mut TextFieldBuilder,
    field: &str,
    key: &str,
    value: &Value,
    ctx: &ParserContext<'_>,
) -> Result<bool> {
    match key {
        "null_value" => {
            if value.is_null() {
                return Err(DvStringError::mapper_parsing(field, key, "cannot be null"));
            }
            builder.null_value(node_string(field, key, value)?);
        }
        "search_quote_analyzer" => {
            builder.search_quote_analyzer(node_analyzer(field, key, value, ctx)?);
        }
        "position_offset_gap" => {
            let gap = node_i32(field, key, value)?;
            let gap = u32::try_from(gap)
                .map_err(|_| DvStringError::mapper_parsing(field, key, "must not be negative"))?;
            builder.position_offset_gap(gap);
        }
        _ => return Ok(false),
    }
    Ok(true)
}

/// Multi-field options: `fields` and `path`.
pub fn parse_multi_field_option(
    builder: &mut TextFieldBuilder,
    field: &str,
    key: &str,
    value: &Value,
    ctx: &ParserContext<'_>,
) -> Result<bool> {
    match key {
        "fields" => {
            let fields = value.as_object().ok_or_else(|| {
                DvStringError::mapper_parsing(field, key, "expected an object of sub-fields")
            })?;
            for (sub_name, sub_node) in fields {
                let sub_builder =
                    ctx.mappers()
                        .parse_field(sub_name, sub_node, ctx.analyzers())?;
                builder.add_multi_field(sub_builder);
            }
        }
        "path" => {
            let path = node_string(field, key, value)?;
            let path = MultiFieldPath::parse(&path).ok_or_else(|| {
                DvStringError::mapper_parsing(
                    field,
                    key,
                    format!("unknown path [{path}], expected full or just_name"),
                )
            })?;
            builder.multi_field_path(path);
        }
        _ => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_to_underscore_case() {
        assert_eq!(to_underscore_case("indexDocvaluesAnalyzer"), "index_docvalues_analyzer");
        assert_eq!(to_underscore_case("ignore_above"), "ignore_above");
        assert_eq!(to_underscore_case("nullValue"), "null_value");
        assert_eq!(to_underscore_case("search_quoteAnalyzer"), "search_quote_analyzer");
    }

    #[test]
    fn test_node_bool() {
        assert!(node_bool("f", "store", &json!(true)).unwrap());
        assert!(node_bool("f", "store", &json!("yes")).unwrap());
        assert!(!node_bool("f", "store", &json!("off")).unwrap());
        assert!(!node_bool("f", "store", &json!(0)).unwrap());
        assert!(node_bool("f", "store", &json!("maybe")).is_err());
        assert!(node_bool("f", "store", &json!(null)).is_err());
    }

    #[test]
    fn test_node_numbers() {
        assert_eq!(node_i32("f", "ignore_above", &json!(256)).unwrap(), 256);
        assert_eq!(node_i32("f", "ignore_above", &json!("10")).unwrap(), 10);
        assert!(node_i32("f", "ignore_above", &json!(1.5)).is_err());
        assert!(node_i32("f", "ignore_above", &json!(i64::MAX)).is_err());
        assert_eq!(node_f32("f", "boost", &json!(2)).unwrap(), 2.0);
        assert_eq!(node_f32("f", "boost", &json!("0.5")).unwrap(), 0.5);
    }

    #[test]
    fn test_node_strings() {
        assert_eq!(node_string("f", "null_value", &json!(42)).unwrap(), "42");
        assert_eq!(
            node_string_list("f", "copy_to", &json!("all")).unwrap(),
            vec!["all".to_string()]
        );
        assert_eq!(
            node_string_list("f", "copy_to", &json!(["a", "b"])).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        let err = node_string("f", "null_value", &json!({"x": 1})).unwrap_err();
        assert!(err.to_string().contains("option [null_value]"));
    }
}
