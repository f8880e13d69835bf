//! Engine options and their translation from sparse configuration records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::document::JsonDocument;
use crate::engine::{ContextCache, DocumentCache, LoaderHandle};
use crate::error::AdapterError;

mod record;
mod translate;

pub use record::{ConfigurationRecord, OptionKey, OptionValue};
pub use translate::{translate, translate_strict};

/// Fully populated options handed to a [`JsonLdEngine`](crate::JsonLdEngine).
///
/// `Default` is the engine-wide default configuration; the translator only
/// ever moves a field away from it when the caller supplied that field.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineOptions {
    pub base: Option<Url>,
    pub compact_arrays: bool,
    pub compact_to_relative: bool,
    /// `None` lets the engine use its own context cache.
    pub context_cache: Option<ContextCache>,
    pub document_cache: Option<DocumentCache>,
    /// `None` lets the engine use its own document loader.
    pub document_loader: Option<LoaderHandle>,
    pub embed: Embed,
    pub explicit: bool,
    pub expand_context: Option<ExpandContext>,
    pub extract_all_scripts: bool,
    pub numeric_id: bool,
    pub omit_default: bool,
    /// `None` defers to the processing mode, see [`EngineOptions::omit_graph`].
    pub omit_graph: Option<bool>,
    pub ordered: bool,
    pub processing_mode: ProcessingMode,
    pub produce_generalized_rdf: bool,
    pub rdf_direction: Option<RdfDirection>,
    pub rdf_star: bool,
    pub required_all: bool,
    pub uri_validation: bool,
    pub use_native_types: bool,
    pub use_rdf_type: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            base: None,
            compact_arrays: true,
            compact_to_relative: true,
            context_cache: None,
            document_cache: None,
            document_loader: None,
            embed: Embed::Once,
            explicit: false,
            expand_context: None,
            extract_all_scripts: false,
            numeric_id: false,
            omit_default: false,
            omit_graph: None,
            ordered: false,
            processing_mode: ProcessingMode::JsonLd11,
            produce_generalized_rdf: true,
            rdf_direction: None,
            rdf_star: false,
            required_all: false,
            uri_validation: true,
            use_native_types: false,
            use_rdf_type: false,
        }
    }
}

impl EngineOptions {
    /// Effective `omitGraph` flag: explicit value, else true under JSON-LD 1.1.
    pub fn omit_graph(&self) -> bool {
        self.omit_graph
            .unwrap_or(self.processing_mode == ProcessingMode::JsonLd11)
    }
}

impl TryFrom<&ConfigurationRecord> for EngineOptions {
    type Error = AdapterError;

    fn try_from(record: &ConfigurationRecord) -> Result<Self, Self::Error> {
        translate(record)
    }
}

/// Context applied before expansion, in one of the shapes engines take natively.
#[derive(Clone, Debug, PartialEq)]
pub enum ExpandContext {
    /// Context named by a location string, resolved by the engine.
    Location(String),
    Iri(Url),
    Document(JsonDocument),
}

/// Framing `@embed` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Embed {
    #[serde(rename = "@always")]
    Always,
    #[serde(rename = "@never")]
    Never,
    #[serde(rename = "@once")]
    Once,
}

impl fmt::Display for Embed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "@always"),
            Self::Never => write!(f, "@never"),
            Self::Once => write!(f, "@once"),
        }
    }
}

/// Accepts the keyword with or without the leading `@`.
impl FromStr for Embed {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('@').to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            "once" => Ok(Self::Once),
            _ => Err(AdapterError::config(format!("invalid embed value: {s}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessingMode {
    #[serde(rename = "json-ld-1.0")]
    JsonLd10,
    #[serde(rename = "json-ld-1.1")]
    JsonLd11,
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonLd10 => write!(f, "json-ld-1.0"),
            Self::JsonLd11 => write!(f, "json-ld-1.1"),
        }
    }
}

impl FromStr for ProcessingMode {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json-ld-1.0" => Ok(Self::JsonLd10),
            "json-ld-1.1" => Ok(Self::JsonLd11),
            _ => Err(AdapterError::config(format!(
                "invalid processing mode: {s}"
            ))),
        }
    }
}

/// How `@direction` is represented when converting to RDF.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RdfDirection {
    I18nDatatype,
    CompoundLiteral,
}

impl fmt::Display for RdfDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I18nDatatype => write!(f, "i18n-datatype"),
            Self::CompoundLiteral => write!(f, "compound-literal"),
        }
    }
}

impl FromStr for RdfDirection {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "i18n-datatype" => Ok(Self::I18nDatatype),
            "compound-literal" => Ok(Self::CompoundLiteral),
            _ => Err(AdapterError::config(format!("invalid rdf direction: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omit_graph_follows_processing_mode() {
        let mut options = EngineOptions::default();
        assert!(options.omit_graph());
        options.processing_mode = ProcessingMode::JsonLd10;
        assert!(!options.omit_graph());
        options.omit_graph = Some(true);
        assert!(options.omit_graph());
    }

    #[test]
    fn keywords_round_trip_through_display() {
        for embed in [Embed::Always, Embed::Never, Embed::Once] {
            assert_eq!(embed.to_string().parse::<Embed>().unwrap(), embed);
        }
        for mode in [ProcessingMode::JsonLd10, ProcessingMode::JsonLd11] {
            assert_eq!(mode.to_string().parse::<ProcessingMode>().unwrap(), mode);
        }
        for direction in [RdfDirection::I18nDatatype, RdfDirection::CompoundLiteral] {
            assert_eq!(direction.to_string().parse::<RdfDirection>().unwrap(), direction);
        }
    }

    #[test]
    fn embed_accepts_bare_keyword() {
        assert_eq!("never".parse::<Embed>().unwrap(), Embed::Never);
        assert!("sometimes".parse::<Embed>().is_err());
    }

    #[test]
    fn serde_uses_keyword_spelling() {
        assert_eq!(
            serde_json::to_value(RdfDirection::CompoundLiteral).unwrap(),
            "compound-literal"
        );
        assert_eq!(serde_json::to_value(Embed::Always).unwrap(), "@always");
        let mode: ProcessingMode = serde_json::from_value("json-ld-1.0".into()).unwrap();
        assert_eq!(mode, ProcessingMode::JsonLd10);
    }
}
