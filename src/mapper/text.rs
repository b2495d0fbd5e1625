//! The generic analyzed text field.
//!
//! [`TextField`] holds everything a string-like field needs to produce its
//! full-text index entries: field type flags, analyzers, null value and
//! multi-fields. The `string` and `dvstring` mappers both compose with it and
//! only decide what happens around [`TextField::index`].

use std::sync::Arc;

use log::{debug, trace};
use serde_json::{Map, Value, json};

use crate::analysis::analyzer::NamedAnalyzer;
use crate::analysis::token::Token;
use crate::analysis::token_stream::ScopedTokenStream;
use crate::error::Result;
use crate::mapper::field_type::{IndexOptions, TermVector, TextFieldType};
use crate::mapper::registry::{BuilderContext, MapperBuilder};
use crate::mapper::{DocValue, FieldMapper, FieldNames, IndexEntry, ParsedField};

/// How the index names of multi-fields are formed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MultiFieldPath {
    /// `field.sub`
    #[default]
    Full,
    /// `sub`
    JustName,
}

impl MultiFieldPath {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "full" => Some(MultiFieldPath::Full),
            "just_name" => Some(MultiFieldPath::JustName),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MultiFieldPath::Full => "full",
            MultiFieldPath::JustName => "just_name",
        }
    }
}

/// Collects the options of a text field.
///
/// Setters return `&mut Self` so option parsers can apply options one at a
/// time.
pub struct TextFieldBuilder {
    name: String,
    field_type: TextFieldType,
    omit_norms_set: bool,
    index_options_set: bool,
    boost: f32,
    index_analyzer: Option<NamedAnalyzer>,
    search_analyzer: Option<NamedAnalyzer>,
    search_quote_analyzer: Option<NamedAnalyzer>,
    null_value: Option<String>,
    position_offset_gap: u32,
    include_in_all: Option<bool>,
    similarity: Option<String>,
    norms_loading: Option<String>,
    fielddata: Option<Value>,
    copy_to: Vec<String>,
    multi_fields: Vec<Box<dyn MapperBuilder>>,
    multi_field_path: MultiFieldPath,
}

impl TextFieldBuilder {
    pub fn new<S: Into<String>>(name: S) -> Self {
        TextFieldBuilder {
            name: name.into(),
            field_type: TextFieldType::default(),
            omit_norms_set: false,
            index_options_set: false,
            boost: 1.0,
            index_analyzer: None,
            search_analyzer: None,
            search_quote_analyzer: None,
            null_value: None,
            position_offset_gap: 0,
            include_in_all: None,
            similarity: None,
            norms_loading: None,
            fielddata: None,
            copy_to: Vec::new(),
            multi_fields: Vec::new(),
            multi_field_path: MultiFieldPath::Full,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &TextFieldType {
        &self.field_type
    }

    pub fn indexed(&mut self, indexed: bool) -> &mut Self {
        self.field_type.indexed = indexed;
        self
    }

    pub fn tokenized(&mut self, tokenized: bool) -> &mut Self {
        self.field_type.tokenized = tokenized;
        self
    }

    pub fn stored(&mut self, stored: bool) -> &mut Self {
        self.field_type.stored = stored;
        self
    }

    pub fn omit_norms(&mut self, omit_norms: bool) -> &mut Self {
        self.field_type.omit_norms = omit_norms;
        self.omit_norms_set = true;
        self
    }

    pub fn index_options(&mut self, index_options: IndexOptions) -> &mut Self {
        self.field_type.index_options = index_options;
        self.index_options_set = true;
        self
    }

    pub fn term_vector(&mut self, term_vector: TermVector) -> &mut Self {
        self.field_type.term_vector = term_vector;
        self
    }

    pub fn doc_values(&mut self, doc_values: bool) -> &mut Self {
        self.field_type.doc_values = doc_values;
        self
    }

    pub fn boost(&mut self, boost: f32) -> &mut Self {
        self.boost = boost;
        self
    }

    pub fn index_analyzer(&mut self, analyzer: NamedAnalyzer) -> &mut Self {
        self.index_analyzer = Some(analyzer);
        self
    }

    /// Also becomes the search quote analyzer unless one is set.
    pub fn search_analyzer(&mut self, analyzer: NamedAnalyzer) -> &mut Self {
        if self.search_quote_analyzer.is_none() {
            self.search_quote_analyzer = Some(analyzer.clone());
        }
        self.search_analyzer = Some(analyzer);
        self
    }

    pub fn search_quote_analyzer(&mut self, analyzer: NamedAnalyzer) -> &mut Self {
        self.search_quote_analyzer = Some(analyzer);
        self
    }

    pub fn null_value<S: Into<String>>(&mut self, null_value: S) -> &mut Self {
        self.null_value = Some(null_value.into());
        self
    }

    pub fn position_offset_gap(&mut self, gap: u32) -> &mut Self {
        self.position_offset_gap = gap;
        self
    }

    pub fn include_in_all(&mut self, include_in_all: bool) -> &mut Self {
        self.include_in_all = Some(include_in_all);
        self
    }

    pub fn similarity<S: Into<String>>(&mut self, similarity: S) -> &mut Self {
        self.similarity = Some(similarity.into());
        self
    }

    pub fn norms_loading<S: Into<String>>(&mut self, loading: S) -> &mut Self {
        self.norms_loading = Some(loading.into());
        self
    }

    pub fn fielddata(&mut self, fielddata: Value) -> &mut Self {
        self.fielddata = Some(fielddata);
        self
    }

    pub fn copy_to(&mut self, targets: Vec<String>) -> &mut Self {
        self.copy_to = targets;
        self
    }

    pub fn add_multi_field(&mut self, builder: Box<dyn MapperBuilder>) -> &mut Self {
        self.multi_fields.push(builder);
        self
    }

    pub fn multi_field_path(&mut self, path: MultiFieldPath) -> &mut Self {
        self.multi_field_path = path;
        self
    }

    /// Resolve defaults and build the field.
    ///
    /// Analyzers that were not configured come from the registry of `ctx`. A
    /// positive position offset gap re-wraps the index, search and search
    /// quote analyzers with that gap. Indexed fields that are not tokenized
    /// index document ids only, and omit norms unless boosted, unless
    /// configured otherwise.
    pub fn build(&self, ctx: &BuilderContext<'_>) -> Result<TextField> {
        let analyzers = ctx.analyzers();

        let mut field_type = self.field_type.clone();
        if !self.omit_norms_set && self.boost == 1.0 {
            field_type.omit_norms = field_type.default_omit_norms();
        }
        if !self.index_options_set {
            field_type.index_options = field_type.default_index_options();
        }

        let mut index_analyzer = self
            .index_analyzer
            .clone()
            .unwrap_or_else(|| analyzers.default_index_analyzer().clone());
        let mut search_analyzer = self
            .search_analyzer
            .clone()
            .unwrap_or_else(|| analyzers.default_search_analyzer().clone());
        let mut search_quote_analyzer = self
            .search_quote_analyzer
            .clone()
            .unwrap_or_else(|| analyzers.default_search_quote_analyzer().clone());

        if self.position_offset_gap > 0 {
            let gap = self.position_offset_gap;
            index_analyzer = index_analyzer.with_position_offset_gap(gap);
            search_analyzer = search_analyzer.with_position_offset_gap(gap);
            search_quote_analyzer = search_quote_analyzer.with_position_offset_gap(gap);
        }

        let multi_field_ctx = match self.multi_field_path {
            MultiFieldPath::Full => ctx.child(&self.name),
            MultiFieldPath::JustName => ctx.root(),
        };
        let multi_fields = self
            .multi_fields
            .iter()
            .map(|builder| builder.build(&multi_field_ctx))
            .collect::<Result<Vec<_>>>()?;

        let names = FieldNames::new(self.name.clone(), ctx.full_name(&self.name));
        debug!(
            "built text field [{}]: index [{}], analyzer [{}], search analyzer [{}], search quote analyzer [{}], position offset gap {}",
            names.index_name(),
            field_type.index_mode(),
            index_analyzer.name(),
            search_analyzer.name(),
            search_quote_analyzer.name(),
            self.position_offset_gap
        );

        Ok(TextField {
            names,
            field_type,
            boost: self.boost,
            index_analyzer,
            search_analyzer,
            search_quote_analyzer,
            default_analyzers: [
                analyzers.default_index_analyzer().name().to_string(),
                analyzers.default_search_analyzer().name().to_string(),
            ],
            null_value: self.null_value.clone(),
            position_offset_gap: self.position_offset_gap,
            include_in_all: self.include_in_all,
            similarity: self.similarity.clone(),
            norms_loading: self.norms_loading.clone(),
            fielddata: self.fielddata.clone(),
            copy_to: self.copy_to.clone(),
            multi_fields,
            multi_field_path: self.multi_field_path,
        })
    }
}

/// A built text field.
#[derive(Clone, Debug)]
pub struct TextField {
    names: FieldNames,
    field_type: TextFieldType,
    boost: f32,
    index_analyzer: NamedAnalyzer,
    search_analyzer: NamedAnalyzer,
    search_quote_analyzer: NamedAnalyzer,
    // Index and search analyzer names the registry defaulted to at build time.
    default_analyzers: [String; 2],
    null_value: Option<String>,
    position_offset_gap: u32,
    include_in_all: Option<bool>,
    similarity: Option<String>,
    norms_loading: Option<String>,
    fielddata: Option<Value>,
    copy_to: Vec<String>,
    multi_fields: Vec<Arc<dyn FieldMapper>>,
    multi_field_path: MultiFieldPath,
}

impl TextField {
    pub fn names(&self) -> &FieldNames {
        &self.names
    }

    pub fn field_type(&self) -> &TextFieldType {
        &self.field_type
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    pub fn index_analyzer(&self) -> &NamedAnalyzer {
        &self.index_analyzer
    }

    pub fn search_analyzer(&self) -> &NamedAnalyzer {
        &self.search_analyzer
    }

    pub fn search_quote_analyzer(&self) -> &NamedAnalyzer {
        &self.search_quote_analyzer
    }

    pub fn null_value(&self) -> Option<&str> {
        self.null_value.as_deref()
    }

    pub fn position_offset_gap(&self) -> u32 {
        self.position_offset_gap
    }

    pub fn include_in_all(&self) -> Option<bool> {
        self.include_in_all
    }

    pub fn multi_fields(&self) -> &[Arc<dyn FieldMapper>] {
        &self.multi_fields
    }

    pub fn copy_to(&self) -> &[String] {
        &self.copy_to
    }

    /// The value to index: `value`, else the null value substitute.
    pub fn resolve_value<'a>(&'a self, value: Option<&'a str>) -> Option<&'a str> {
        value.or(self.null_value.as_deref())
    }

    /// Produce the index entries for `value`.
    ///
    /// Analyzed fields run the index analyzer, not analyzed fields index the
    /// whole value as one term, and fields that are neither indexed nor stored
    /// produce no entry. With `emit_doc_values` the raw value also becomes the
    /// doc value of the field.
    pub fn index(&self, value: &str, emit_doc_values: bool) -> Result<ParsedField> {
        let mut parsed = ParsedField::empty();
        let field_type = &self.field_type;

        if field_type.indexed || field_type.stored {
            let terms = if !field_type.indexed {
                Vec::new()
            } else if field_type.tokenized {
                self.analyze(value)?
            } else {
                vec![Token::with_offsets(value, 0, 0, value.len())]
            };

            trace!(
                "field [{}] produced {} term(s)",
                self.names.index_name(),
                terms.len()
            );
            parsed.entries.push(IndexEntry {
                name: self.names.index_name().to_string(),
                value: value.to_string(),
                field_type: field_type.clone(),
                boost: self.boost,
                terms,
                position_increment_gap: self.index_analyzer.position_increment_gap(),
            });
        }

        if emit_doc_values {
            parsed.doc_value = Some(DocValue::new(self.names.index_name(), value));
        }

        Ok(parsed)
    }

    fn analyze(&self, value: &str) -> Result<Vec<Token>> {
        let mut stream = ScopedTokenStream::open(&self.index_analyzer, value);
        stream.reset()?;

        let mut terms = Vec::new();
        while let Some(token) = stream.increment_token()? {
            terms.push(token);
        }

        stream.end()?;
        stream.close();
        Ok(terms)
    }

    /// Write the non-default options of this field into `mapping`.
    pub fn write_mapping(&self, mapping: &mut Map<String, Value>) {
        let field_type = &self.field_type;

        if field_type.index_mode() != "analyzed" {
            mapping.insert("index".into(), json!(field_type.index_mode()));
        }
        if field_type.stored {
            mapping.insert("store".into(), json!(true));
        }
        if self.boost != 1.0 {
            mapping.insert("boost".into(), json!(self.boost));
        }
        if field_type.doc_values {
            mapping.insert("doc_values".into(), json!(true));
        }
        if field_type.term_vector != TermVector::No {
            mapping.insert("term_vector".into(), json!(field_type.term_vector.as_str()));
        }
        if field_type.index_options != field_type.default_index_options() {
            mapping.insert(
                "index_options".into(),
                json!(field_type.index_options.as_str()),
            );
        }
        if field_type.omit_norms != field_type.default_omit_norms() {
            mapping.insert("omit_norms".into(), json!(field_type.omit_norms));
        }
        if let Some(loading) = &self.norms_loading {
            mapping.insert("norms".into(), json!({ "loading": loading }));
        }

        let index = self.index_analyzer.name();
        let search = self.search_analyzer.name();
        let [default_index, default_search] = &self.default_analyzers;
        if index == search {
            if index != default_index || search != default_search {
                mapping.insert("analyzer".into(), json!(index));
            }
        } else {
            if index != default_index {
                mapping.insert("index_analyzer".into(), json!(index));
            }
            if search != default_search {
                mapping.insert("search_analyzer".into(), json!(search));
            }
        }
        if self.search_quote_analyzer.name() != search {
            mapping.insert(
                "search_quote_analyzer".into(),
                json!(self.search_quote_analyzer.name()),
            );
        }

        if let Some(null_value) = &self.null_value {
            mapping.insert("null_value".into(), json!(null_value));
        }
        if self.position_offset_gap > 0 {
            mapping.insert("position_offset_gap".into(), json!(self.position_offset_gap));
        }
        if let Some(include_in_all) = self.include_in_all {
            mapping.insert("include_in_all".into(), json!(include_in_all));
        }
        if let Some(similarity) = &self.similarity {
            mapping.insert("similarity".into(), json!(similarity));
        }
        if let Some(fielddata) = &self.fielddata {
            mapping.insert("fielddata".into(), fielddata.clone());
        }
        if !self.copy_to.is_empty() {
            mapping.insert("copy_to".into(), json!(self.copy_to));
        }

        if !self.multi_fields.is_empty() {
            let fields: Map<String, Value> = self
                .multi_fields
                .iter()
                .map(|field| (field.names().name().to_string(), field.to_mapping()))
                .collect();
            mapping.insert("fields".into(), Value::Object(fields));
            if self.multi_field_path != MultiFieldPath::Full {
                mapping.insert("path".into(), json!(self.multi_field_path.as_str()));
            }
        }
    }
}
