use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{Embed, ProcessingMode, RdfDirection};
use crate::document::{DocumentReference, JsonDocument};
use crate::engine::{ContextCache, DocumentCache, LoaderHandle};
use crate::error::{AdapterError, Result};
use crate::media_type::MediaType;

/// The closed vocabulary of configuration option names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    Base,
    ContextCache,
    DocumentCache,
    DocumentLoader,
    Embed,
    ProcessingMode,
    RdfDirection,
    CompactArrays,
    CompactToRelative,
    Explicit,
    ExtractAllScripts,
    NumericId,
    OmitDefault,
    OmitGraph,
    Ordered,
    ProduceGeneralizedRdf,
    RdfStar,
    RequiredAll,
    UriValidation,
    UseNativeTypes,
    UseRdfType,
    ExpandContext,
}

impl OptionKey {
    pub const ALL: [OptionKey; 22] = [
        Self::Base,
        Self::ContextCache,
        Self::DocumentCache,
        Self::DocumentLoader,
        Self::Embed,
        Self::ProcessingMode,
        Self::RdfDirection,
        Self::CompactArrays,
        Self::CompactToRelative,
        Self::Explicit,
        Self::ExtractAllScripts,
        Self::NumericId,
        Self::OmitDefault,
        Self::OmitGraph,
        Self::Ordered,
        Self::ProduceGeneralizedRdf,
        Self::RdfStar,
        Self::RequiredAll,
        Self::UriValidation,
        Self::UseNativeTypes,
        Self::UseRdfType,
        Self::ExpandContext,
    ];

    /// Name of the option in a configuration record.
    pub fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::ContextCache => "context-cache",
            Self::DocumentCache => "document-cache",
            Self::DocumentLoader => "document-loader",
            Self::Embed => "embed",
            Self::ProcessingMode => "processing-mode",
            Self::RdfDirection => "rdf-direction",
            Self::CompactArrays => "compact-arrays?",
            Self::CompactToRelative => "compact-to-relative?",
            Self::Explicit => "explicit?",
            Self::ExtractAllScripts => "extract-all-scripts?",
            Self::NumericId => "numeric-id?",
            Self::OmitDefault => "omit-default?",
            Self::OmitGraph => "omit-graph?",
            Self::Ordered => "ordered?",
            Self::ProduceGeneralizedRdf => "produce-generalized-rdf?",
            Self::RdfStar => "rdf-star?",
            Self::RequiredAll => "required-all?",
            Self::UriValidation => "uri-validation?",
            Self::UseNativeTypes => "use-native-types?",
            Self::UseRdfType => "use-rdf-type?",
            Self::ExpandContext => "expand-context",
        }
    }

    /// Boolean options carry a trailing `?` in their name.
    pub fn is_flag(self) -> bool {
        self.name().ends_with('?')
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptionKey {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| AdapterError::UnknownOption(s.to_string()))
    }
}

/// A configuration value. Which variant a key accepts is fixed by the key.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Iri(Url),
    Embed(Embed),
    ProcessingMode(ProcessingMode),
    RdfDirection(RdfDirection),
    ContextCache(ContextCache),
    DocumentCache(DocumentCache),
    DocumentLoader(LoaderHandle),
    /// Text, IRI or JSON document naming the context to expand against.
    ExpandContext(DocumentReference),
    /// Uninterpreted JSON, as read for a name outside the vocabulary.
    Json(Value),
}

impl OptionValue {
    pub fn expand_context(reference: impl Into<DocumentReference>) -> Self {
        Self::ExpandContext(reference.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Iri(_) => "IRI",
            Self::Embed(_) => "embed",
            Self::ProcessingMode(_) => "processing mode",
            Self::RdfDirection(_) => "rdf direction",
            Self::ContextCache(_) => "context cache",
            Self::DocumentCache(_) => "document cache",
            Self::DocumentLoader(_) => "document loader",
            Self::ExpandContext(_) => "expand context",
            Self::Json(_) => "JSON value",
        }
    }

    /// Reads the declarative JSON form of `key`'s value.
    fn from_json(key: OptionKey, value: &Value) -> Result<Self> {
        if key.is_flag() {
            return value
                .as_bool()
                .map(Self::Bool)
                .ok_or_else(|| AdapterError::config(format!("'{key}' must be a boolean")));
        }

        let text = value.as_str();
        match key {
            OptionKey::Base => {
                let base = text
                    .ok_or_else(|| AdapterError::config("'base' must be an IRI string"))?;
                Url::parse(base)
                    .map(Self::Iri)
                    .map_err(|e| AdapterError::config(format!("invalid base IRI ({base}): {e}")))
            }
            OptionKey::Embed => keyword(key, text).map(Self::Embed),
            OptionKey::ProcessingMode => keyword(key, text).map(Self::ProcessingMode),
            OptionKey::RdfDirection => keyword(key, text).map(Self::RdfDirection),
            OptionKey::ExpandContext => match value {
                Value::String(location) => Ok(match Url::parse(location) {
                    Ok(url) => Self::expand_context(url),
                    Err(_) => Self::expand_context(location.as_str()),
                }),
                Value::Object(_) => Ok(Self::expand_context(JsonDocument::from_value(
                    value.clone(),
                    MediaType::JsonLd,
                ))),
                _ => Err(AdapterError::config(
                    "'expand-context' must be an IRI string or a JSON object",
                )),
            },
            OptionKey::ContextCache | OptionKey::DocumentCache | OptionKey::DocumentLoader => Err(
                AdapterError::config(format!("'{key}' takes a handle and cannot be read from JSON")),
            ),
            _ => Err(AdapterError::config(format!("'{key}' has no JSON form"))),
        }
    }
}

fn keyword<T: FromStr<Err = AdapterError>>(key: OptionKey, text: Option<&str>) -> Result<T> {
    text.ok_or_else(|| AdapterError::config(format!("'{key}' must be a string")))?
        .parse()
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Url> for OptionValue {
    fn from(value: Url) -> Self {
        Self::Iri(value)
    }
}

impl From<Embed> for OptionValue {
    fn from(value: Embed) -> Self {
        Self::Embed(value)
    }
}

impl From<ProcessingMode> for OptionValue {
    fn from(value: ProcessingMode) -> Self {
        Self::ProcessingMode(value)
    }
}

impl From<RdfDirection> for OptionValue {
    fn from(value: RdfDirection) -> Self {
        Self::RdfDirection(value)
    }
}

impl From<ContextCache> for OptionValue {
    fn from(value: ContextCache) -> Self {
        Self::ContextCache(value)
    }
}

impl From<DocumentCache> for OptionValue {
    fn from(value: DocumentCache) -> Self {
        Self::DocumentCache(value)
    }
}

impl From<LoaderHandle> for OptionValue {
    fn from(value: LoaderHandle) -> Self {
        Self::DocumentLoader(value)
    }
}

/// Sparse, caller-supplied configuration: option name to value.
///
/// A missing name means "engine default". Names outside [`OptionKey`] are
/// kept so that strict translation can report them, but are otherwise ignored.
///
/// ```rust
/// use affinidi_jsonld::options::{ConfigurationRecord, OptionKey, RdfDirection};
///
/// let record = ConfigurationRecord::new()
///     .with(OptionKey::Ordered, true)
///     .with(OptionKey::RdfDirection, RdfDirection::I18nDatatype);
/// assert_eq!(record.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigurationRecord {
    entries: BTreeMap<String, OptionValue>,
}

impl ConfigurationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: OptionKey, value: impl Into<OptionValue>) -> Self {
        self.entries.insert(key.name().to_string(), value.into());
        self
    }

    /// Insert by raw name, returning the previous value if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        self.entries.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Names present in the record that are not part of the vocabulary.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.keys().filter(|name| name.parse::<OptionKey>().is_err())
    }

    /// Build a record from a declarative JSON object.
    ///
    /// Flags take booleans; `base` an IRI string; `embed`, `processing-mode`
    /// and `rdf-direction` their keyword strings; `expand-context` an IRI,
    /// a context location string, or an inline context object. Unknown names
    /// are kept verbatim as [`OptionValue::Json`].
    pub fn from_json(config: &Value) -> Result<Self> {
        let object = config
            .as_object()
            .ok_or_else(|| AdapterError::config("configuration must be a JSON object"))?;

        let mut record = Self::new();
        for (name, value) in object {
            let value = match name.parse::<OptionKey>() {
                Ok(key) => OptionValue::from_json(key, value)?,
                Err(_) => {
                    debug!(option = %name, "keeping unrecognized configuration key");
                    OptionValue::Json(value.clone())
                }
            };
            record.entries.insert(name.clone(), value);
        }
        Ok(record)
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for ConfigurationRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
