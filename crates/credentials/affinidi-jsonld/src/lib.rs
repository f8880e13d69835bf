/*!
 * JSON-LD processing adapter.
 *
 * Lets callers run the JSON-LD transformations (compact, expand, flatten,
 * frame, to-RDF, from-RDF) through one polymorphic entry point while a
 * pluggable [`JsonLdEngine`] does the actual graph work.
 *
 * The crate owns two things:
 * - **Document resolution** ([`document::resolve`]): raw text, an IRI, a
 *   parsed value or an existing handle becomes a family-tagged
 *   [`ResolvedDocument`] with a media type. No I/O happens here.
 * - **Options translation** ([`options::translate`]): a sparse
 *   [`ConfigurationRecord`] becomes a complete [`EngineOptions`], touching
 *   only the fields the caller set.
 *
 * [`Processor`] composes both and calls the engine once per operation.
 *
 * ```rust,ignore
 * use affinidi_jsonld::{ConfigurationRecord, OptionKey, Processor};
 *
 * let processor = Processor::new(my_engine);
 * let config = ConfigurationRecord::new().with(OptionKey::CompactArrays, false);
 * let compacted = processor.compact(
 *     url::Url::parse("https://example.org/alice.jsonld")?,
 *     r#"{"@context": {"@vocab": "https://schema.org/"}}"#,
 *     &config,
 * )?;
 * ```
 */

pub mod cache;
pub mod document;
pub mod engine;
pub mod error;
pub mod loader;
pub mod media_type;
pub mod options;
pub mod processor;
pub mod rdf;

pub use document::{
    DocumentFamily, DocumentReference, JsonDocument, RdfDocument, ResolvedDocument, SourceKind,
    resolve,
};
pub use engine::{Cache, DocumentLoader, JsonLdEngine};
pub use error::{AdapterError, DispatchError, LoaderError, Result};
pub use media_type::MediaType;
pub use options::{ConfigurationRecord, EngineOptions, OptionKey, OptionValue, translate};
pub use processor::{ArgKind, Operation, Output, Processor};
pub use rdf::Dataset;
