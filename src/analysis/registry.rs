//! Analyzer lookup by name.
//!
//! Mappings reference analyzers by name (`analyzer`, `search_analyzer`,
//! `index_docvalues_analyzer`, ...). The [`AnalyzerRegistry`] resolves those
//! names and knows the index-wide defaults. Besides the built-in analyzers it
//! can be populated from [`AnalysisSettings`], which declare custom analyzers
//! as a tokenizer plus a filter chain:
//!
//! ```
//! use dvstring::analysis::registry::{AnalysisSettings, AnalyzerRegistry};
//!
//! let settings: AnalysisSettings = serde_json::from_str(r#"{
//!     "analyzer": {
//!         "first_word": {
//!             "tokenizer": "whitespace",
//!             "filter": ["lowercase", "limit"]
//!         }
//!     }
//! }"#).unwrap();
//!
//! let registry = AnalyzerRegistry::from_settings(&settings).unwrap();
//! let analyzer = registry.analyzer("first_word").unwrap();
//! let tokens: Vec<_> = analyzer.analyze("Tony Stark").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "tony");
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{
    Analyzer, KeywordAnalyzer, LowercaseKeywordAnalyzer, NamedAnalyzer, NoOpAnalyzer,
    PipelineAnalyzer, SimpleAnalyzer, StandardAnalyzer,
};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::limit::LimitFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::analysis::tokenizer::whole::WholeTokenizer;
use crate::error::{DvStringError, Result};

/// Name of the default doc values analyzer: keyword tokenizer + lowercase.
pub const DOC_VALUES_LOWERCASE_ANALYZER: &str = "dvlwc";

/// The default doc values analyzer. Fields that name no doc values analyzer
/// always get this one; settings cannot redefine it.
pub fn doc_values_lowercase_analyzer() -> NamedAnalyzer {
    NamedAnalyzer::new(
        DOC_VALUES_LOWERCASE_ANALYZER,
        Arc::new(LowercaseKeywordAnalyzer::new()),
    )
}

fn reserved_name_error(name: &str) -> DvStringError {
    DvStringError::analysis(format!(
        "Analyzer name [{name}] is reserved for the default doc values analyzer"
    ))
}

/// Alias resolving to the index-wide default analyzer.
pub const DEFAULT_ANALYZER_ALIAS: &str = "default";

fn default_analyzer_name() -> String {
    "standard".to_string()
}

/// Index analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Analyzer used for indexing when a field does not name one.
    #[serde(default = "default_analyzer_name")]
    pub default_analyzer: String,

    /// Analyzer used for searching when a field does not name one.
    /// Falls back to `default_analyzer`.
    #[serde(default)]
    pub default_search_analyzer: Option<String>,

    /// Analyzer used for quoted (phrase) searches when a field does not name one.
    /// Falls back to the default search analyzer.
    #[serde(default)]
    pub default_search_quote_analyzer: Option<String>,

    /// Custom analyzers by name.
    #[serde(default)]
    pub analyzer: BTreeMap<String, CustomAnalyzerConfig>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            default_analyzer: default_analyzer_name(),
            default_search_analyzer: None,
            default_search_quote_analyzer: None,
            analyzer: BTreeMap::new(),
        }
    }
}

/// A custom analyzer: one tokenizer followed by named filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomAnalyzerConfig {
    /// `keyword` (or `whole`), `whitespace`, `standard`, `letter`,
    /// `unicode_word` or `pattern`.
    pub tokenizer: String,

    /// `lowercase`, `stop` or `limit`, applied in order.
    #[serde(default)]
    pub filter: Vec<String>,

    /// Split pattern of the `pattern` tokenizer (default `\W+`).
    #[serde(default)]
    pub pattern: Option<String>,

    /// Stop words of the `stop` filter (default: English stop words).
    #[serde(default)]
    pub stopwords: Option<Vec<String>>,

    /// Token budget of the `limit` filter (default 1).
    #[serde(default)]
    pub max_token_count: Option<usize>,
}

/// Resolves analyzer names for mappings.
#[derive(Clone, Debug)]
pub struct AnalyzerRegistry {
    analyzers: AHashMap<String, NamedAnalyzer>,
    default_index: NamedAnalyzer,
    default_search: NamedAnalyzer,
    default_search_quote: NamedAnalyzer,
}

impl AnalyzerRegistry {
    /// A registry holding only the built-in analyzers, with `standard` as default.
    pub fn new() -> Self {
        let analyzers = Self::builtin_analyzers();
        let standard = analyzers["standard"].clone();

        AnalyzerRegistry {
            analyzers,
            default_index: standard.clone(),
            default_search: standard.clone(),
            default_search_quote: standard,
        }
    }

    /// Build a registry from analysis settings.
    ///
    /// Fails if a custom analyzer references an unknown tokenizer or filter,
    /// uses a reserved name, or if a default names an analyzer that does not
    /// exist.
    pub fn from_settings(settings: &AnalysisSettings) -> Result<Self> {
        let mut analyzers = Self::builtin_analyzers();

        for (name, config) in &settings.analyzer {
            if name == DOC_VALUES_LOWERCASE_ANALYZER || name == DEFAULT_ANALYZER_ALIAS {
                return Err(reserved_name_error(name));
            }
            let analyzer = build_custom_analyzer(name, config)?;
            debug!(
                "registered custom analyzer [{name}] with tokenizer [{}] and filters {:?}",
                config.tokenizer, config.filter
            );
            analyzers.insert(name.clone(), NamedAnalyzer::new(name.clone(), analyzer));
        }

        let lookup = |name: &str, setting: &str| {
            analyzers.get(name).cloned().ok_or_else(|| {
                DvStringError::analysis(format!(
                    "Analyzer [{name}] configured as [{setting}] is not defined"
                ))
            })
        };

        let default_index = lookup(&settings.default_analyzer, "default_analyzer")?;
        let default_search = match &settings.default_search_analyzer {
            Some(name) => lookup(name, "default_search_analyzer")?,
            None => default_index.clone(),
        };
        let default_search_quote = match &settings.default_search_quote_analyzer {
            Some(name) => lookup(name, "default_search_quote_analyzer")?,
            None => default_search.clone(),
        };

        Ok(AnalyzerRegistry {
            analyzers,
            default_index,
            default_search,
            default_search_quote,
        })
    }

    fn builtin_analyzers() -> AHashMap<String, NamedAnalyzer> {
        let mut analyzers: AHashMap<String, NamedAnalyzer> = AHashMap::new();
        let mut add = |name: &str, analyzer: Arc<dyn Analyzer>| {
            analyzers.insert(name.to_string(), NamedAnalyzer::new(name, analyzer));
        };

        let letters = Arc::new(RegexTokenizer::letters());
        add(
            "standard",
            Arc::new(StandardAnalyzer::without_stop_words()),
        );
        add(
            "simple",
            Arc::new(
                PipelineAnalyzer::new(letters.clone())
                    .add_filter(Arc::new(LowercaseFilter::new()))
                    .with_name("simple"),
            ),
        );
        add(
            "stop",
            Arc::new(
                PipelineAnalyzer::new(letters)
                    .add_filter(Arc::new(LowercaseFilter::new()))
                    .add_filter(Arc::new(StopFilter::new()))
                    .with_name("stop"),
            ),
        );
        add(
            "whitespace",
            Arc::new(SimpleAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))),
        );
        add("keyword", Arc::new(KeywordAnalyzer::new()));
        add("noop", Arc::new(NoOpAnalyzer::new()));
        analyzers.insert(
            DOC_VALUES_LOWERCASE_ANALYZER.to_string(),
            doc_values_lowercase_analyzer(),
        );

        analyzers
    }

    /// Look up an analyzer by name. `default` resolves to the index default.
    pub fn analyzer(&self, name: &str) -> Option<NamedAnalyzer> {
        if name == DEFAULT_ANALYZER_ALIAS {
            return Some(self.default_index.clone());
        }
        self.analyzers.get(name).cloned()
    }

    /// Look up an analyzer referenced by `field`, failing with a mapping error.
    pub fn require(&self, name: &str, field: &str) -> Result<NamedAnalyzer> {
        self.analyzer(name)
            .ok_or_else(|| DvStringError::analyzer_not_found(name, field))
    }

    /// Register (or replace) an analyzer under `name`.
    ///
    /// `dvlwc` and `default` are reserved.
    pub fn register<S: Into<String>>(&mut self, name: S, analyzer: Arc<dyn Analyzer>) -> Result<()> {
        let name = name.into();
        if name == DOC_VALUES_LOWERCASE_ANALYZER || name == DEFAULT_ANALYZER_ALIAS {
            return Err(reserved_name_error(&name));
        }
        self.analyzers
            .insert(name.clone(), NamedAnalyzer::new(name, analyzer));
        Ok(())
    }

    pub fn default_index_analyzer(&self) -> &NamedAnalyzer {
        &self.default_index
    }

    pub fn default_search_analyzer(&self) -> &NamedAnalyzer {
        &self.default_search
    }

    pub fn default_search_quote_analyzer(&self) -> &NamedAnalyzer {
        &self.default_search_quote
    }

    /// Names of all registered analyzers, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.analyzers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn build_custom_analyzer(name: &str, config: &CustomAnalyzerConfig) -> Result<Arc<dyn Analyzer>> {
    let tokenizer: Arc<dyn Tokenizer> = match config.tokenizer.as_str() {
        "keyword" | "whole" => Arc::new(WholeTokenizer::new()),
        "whitespace" => Arc::new(WhitespaceTokenizer::new()),
        "standard" => Arc::new(RegexTokenizer::words()),
        "letter" => Arc::new(RegexTokenizer::letters()),
        "unicode_word" => Arc::new(UnicodeWordTokenizer::new()),
        "pattern" => Arc::new(RegexTokenizer::with_gaps(
            config.pattern.as_deref().unwrap_or(r"\W+"),
        )?),
        other => {
            return Err(DvStringError::analysis(format!(
                "Unknown tokenizer [{other}] for analyzer [{name}]"
            )));
        }
    };

    let mut pipeline = PipelineAnalyzer::new(tokenizer).with_name(name);
    for filter_name in &config.filter {
        let filter: Arc<dyn Filter> = match filter_name.as_str() {
            "lowercase" => Arc::new(LowercaseFilter::new()),
            "stop" => match &config.stopwords {
                Some(words) => Arc::new(StopFilter::from_words(words.iter().cloned())),
                None => Arc::new(StopFilter::new()),
            },
            "limit" => Arc::new(LimitFilter::new(config.max_token_count.unwrap_or(1))),
            other => {
                return Err(DvStringError::analysis(format!(
                    "Unknown filter [{other}] for analyzer [{name}]"
                )));
            }
        };
        pipeline = pipeline.add_filter(filter);
    }

    Ok(Arc::new(pipeline))
}
