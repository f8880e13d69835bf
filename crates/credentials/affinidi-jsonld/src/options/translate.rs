use tracing::{debug, trace};

use super::{ConfigurationRecord, EngineOptions, ExpandContext, OptionKey, OptionValue};
use crate::document::{DocumentFamily, DocumentReference, ResolvedDocument};
use crate::error::{AdapterError, Result};

type Setter = fn(&mut EngineOptions, OptionKey, &OptionValue) -> Result<()>;

/// One typed setter per vocabulary entry.
static OPTION_SETTERS: [(OptionKey, Setter); 22] = [
    (OptionKey::Base, |o, k, v| {
        o.base = Some(match v {
            OptionValue::Iri(url) => url.clone(),
            other => return Err(AdapterError::invalid_value(k, "an IRI", other)),
        });
        Ok(())
    }),
    (OptionKey::ContextCache, |o, k, v| {
        o.context_cache = Some(match v {
            OptionValue::ContextCache(cache) => cache.clone(),
            other => return Err(AdapterError::invalid_value(k, "a context cache", other)),
        });
        Ok(())
    }),
    (OptionKey::DocumentCache, |o, k, v| {
        o.document_cache = Some(match v {
            OptionValue::DocumentCache(cache) => cache.clone(),
            other => return Err(AdapterError::invalid_value(k, "a document cache", other)),
        });
        Ok(())
    }),
    (OptionKey::DocumentLoader, |o, k, v| {
        o.document_loader = Some(match v {
            OptionValue::DocumentLoader(loader) => loader.clone(),
            other => return Err(AdapterError::invalid_value(k, "a document loader", other)),
        });
        Ok(())
    }),
    (OptionKey::Embed, |o, k, v| {
        o.embed = match v {
            OptionValue::Embed(embed) => *embed,
            other => return Err(AdapterError::invalid_value(k, "an embed keyword", other)),
        };
        Ok(())
    }),
    (OptionKey::ProcessingMode, |o, k, v| {
        o.processing_mode = match v {
            OptionValue::ProcessingMode(mode) => *mode,
            other => return Err(AdapterError::invalid_value(k, "a processing mode", other)),
        };
        Ok(())
    }),
    (OptionKey::RdfDirection, |o, k, v| {
        o.rdf_direction = Some(match v {
            OptionValue::RdfDirection(direction) => *direction,
            other => return Err(AdapterError::invalid_value(k, "an rdf direction", other)),
        });
        Ok(())
    }),
    (OptionKey::CompactArrays, |o, k, v| {
        o.compact_arrays = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::CompactToRelative, |o, k, v| {
        o.compact_to_relative = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::Explicit, |o, k, v| {
        o.explicit = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::ExtractAllScripts, |o, k, v| {
        o.extract_all_scripts = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::NumericId, |o, k, v| {
        o.numeric_id = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::OmitDefault, |o, k, v| {
        o.omit_default = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::OmitGraph, |o, k, v| {
        o.omit_graph = Some(flag(k, v)?);
        Ok(())
    }),
    (OptionKey::Ordered, |o, k, v| {
        o.ordered = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::ProduceGeneralizedRdf, |o, k, v| {
        o.produce_generalized_rdf = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::RdfStar, |o, k, v| {
        o.rdf_star = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::RequiredAll, |o, k, v| {
        o.required_all = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::UriValidation, |o, k, v| {
        o.uri_validation = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::UseNativeTypes, |o, k, v| {
        o.use_native_types = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::UseRdfType, |o, k, v| {
        o.use_rdf_type = flag(k, v)?;
        Ok(())
    }),
    (OptionKey::ExpandContext, |o, k, v| {
        o.expand_context = Some(expand_context(k, v)?);
        Ok(())
    }),
];

fn flag(key: OptionKey, value: &OptionValue) -> Result<bool> {
    match value {
        OptionValue::Bool(b) => Ok(*b),
        other => Err(AdapterError::invalid_value(key, "a boolean", other)),
    }
}

/// Contexts are not full documents: text names a location, an IRI stays an
/// IRI, and only JSON-family handles are accepted as-is.
fn expand_context(key: OptionKey, value: &OptionValue) -> Result<ExpandContext> {
    let OptionValue::ExpandContext(reference) = value else {
        return Err(AdapterError::invalid_value(key, "an expand context", value));
    };

    match reference {
        DocumentReference::Text(location) => Ok(ExpandContext::Location(location.clone())),
        DocumentReference::Iri(url) => Ok(ExpandContext::Iri(url.clone())),
        DocumentReference::Resolved(ResolvedDocument::Json(doc)) => {
            Ok(ExpandContext::Document(doc.clone()))
        }
        other => Err(AdapterError::unsupported(other.kind(), DocumentFamily::Json)),
    }
}

/// Translate a configuration record into engine options.
///
/// Only keys present in the record are applied; everything else keeps its
/// [`EngineOptions::default`] value. Names outside the vocabulary are ignored.
pub fn translate(record: &ConfigurationRecord) -> Result<EngineOptions> {
    let mut options = EngineOptions::default();

    for (key, setter) in &OPTION_SETTERS {
        if let Some(value) = record.get(key.name()) {
            setter(&mut options, *key, value)?;
            trace!(option = %key, "applied engine option");
        }
    }

    for name in record.unknown_keys() {
        debug!(option = name, "ignoring unrecognized configuration key");
    }

    Ok(options)
}

/// Like [`translate`], but rejects names outside the vocabulary.
pub fn translate_strict(record: &ConfigurationRecord) -> Result<EngineOptions> {
    if let Some(name) = record.unknown_keys().next() {
        return Err(AdapterError::UnknownOption(name.to_string()));
    }
    translate(record)
}
