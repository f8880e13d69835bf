/*!
 * Document references and their resolution into engine document handles.
 *
 * A [`DocumentReference`] is whatever the caller has in hand: raw text, an
 * IRI, an already-parsed value, or a handle built earlier. [`resolve`]
 * normalizes it into a [`ResolvedDocument`] of the requested
 * [`DocumentFamily`], pairing text and IRI sources with a media type.
 *
 * Resolution never performs I/O. An IRI becomes a [`JsonContent::Remote`] or
 * [`RdfContent::Remote`] handle that the engine dereferences through its own
 * document loader.
 */

use std::fmt;

use serde_json::Value;
use tracing::trace;
use url::Url;

use crate::error::{AdapterError, Result};
use crate::media_type::MediaType;
use crate::rdf::Dataset;

/// The two non-interchangeable document families an engine accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentFamily {
    Json,
    Rdf,
}

impl DocumentFamily {
    /// Media type applied when a text or IRI source comes without one.
    pub fn default_media_type(self) -> MediaType {
        match self {
            Self::Json => MediaType::Json,
            Self::Rdf => MediaType::NQuads,
        }
    }
}

impl fmt::Display for DocumentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Rdf => write!(f, "RDF"),
        }
    }
}

/// Runtime shape of a [`DocumentReference`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Text,
    Iri,
    JsonValue,
    RdfDataset,
    JsonDocument,
    RdfDocument,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Iri => write!(f, "iri"),
            Self::JsonValue => write!(f, "json-value"),
            Self::RdfDataset => write!(f, "rdf-dataset"),
            Self::JsonDocument => write!(f, "json-document"),
            Self::RdfDocument => write!(f, "rdf-document"),
        }
    }
}

/// Source of a JSON-family document.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonContent {
    /// Unparsed character stream.
    Text(String),
    /// Lazy reference, dereferenced by the engine's document loader.
    Remote(Url),
    Parsed(Value),
}

/// Engine handle for a JSON-LD (or plain JSON) document.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonDocument {
    media_type: MediaType,
    content: JsonContent,
    document_url: Option<Url>,
    context_url: Option<Url>,
}

impl JsonDocument {
    pub fn from_text(text: impl Into<String>, media_type: MediaType) -> Self {
        Self::with_content(JsonContent::Text(text.into()), media_type)
    }

    pub fn from_value(value: Value, media_type: MediaType) -> Self {
        Self::with_content(JsonContent::Parsed(value), media_type)
    }

    /// The identifier doubles as the document URL.
    pub fn from_iri(url: Url, media_type: MediaType) -> Self {
        Self::with_content(JsonContent::Remote(url.clone()), media_type).with_document_url(url)
    }

    fn with_content(content: JsonContent, media_type: MediaType) -> Self {
        Self {
            media_type,
            content,
            document_url: None,
            context_url: None,
        }
    }

    pub fn with_document_url(mut self, url: Url) -> Self {
        self.document_url = Some(url);
        self
    }

    /// URL of a context linked from the document (e.g. an HTTP `Link` header).
    pub fn with_context_url(mut self, url: Url) -> Self {
        self.context_url = Some(url);
        self
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    pub fn content(&self) -> &JsonContent {
        &self.content
    }

    pub fn document_url(&self) -> Option<&Url> {
        self.document_url.as_ref()
    }

    pub fn context_url(&self) -> Option<&Url> {
        self.context_url.as_ref()
    }

    pub fn into_content(self) -> JsonContent {
        self.content
    }
}

/// Source of an RDF-family document.
#[derive(Clone, Debug, PartialEq)]
pub enum RdfContent {
    Text(String),
    Remote(Url),
    Parsed(Dataset),
}

/// Engine handle for an RDF dataset document.
#[derive(Clone, Debug, PartialEq)]
pub struct RdfDocument {
    media_type: MediaType,
    content: RdfContent,
    document_url: Option<Url>,
}

impl RdfDocument {
    pub fn from_text(text: impl Into<String>, media_type: MediaType) -> Self {
        Self::with_content(RdfContent::Text(text.into()), media_type)
    }

    pub fn from_dataset(dataset: Dataset, media_type: MediaType) -> Self {
        Self::with_content(RdfContent::Parsed(dataset), media_type)
    }

    pub fn from_iri(url: Url, media_type: MediaType) -> Self {
        Self::with_content(RdfContent::Remote(url.clone()), media_type).with_document_url(url)
    }

    fn with_content(content: RdfContent, media_type: MediaType) -> Self {
        Self {
            media_type,
            content,
            document_url: None,
        }
    }

    pub fn with_document_url(mut self, url: Url) -> Self {
        self.document_url = Some(url);
        self
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    pub fn content(&self) -> &RdfContent {
        &self.content
    }

    pub fn document_url(&self) -> Option<&Url> {
        self.document_url.as_ref()
    }

    pub fn into_content(self) -> RdfContent {
        self.content
    }
}

/// A document handle tagged with its family.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedDocument {
    Json(JsonDocument),
    Rdf(RdfDocument),
}

impl ResolvedDocument {
    pub fn family(&self) -> DocumentFamily {
        match self {
            Self::Json(_) => DocumentFamily::Json,
            Self::Rdf(_) => DocumentFamily::Rdf,
        }
    }

    pub fn media_type(&self) -> &MediaType {
        match self {
            Self::Json(doc) => doc.media_type(),
            Self::Rdf(doc) => doc.media_type(),
        }
    }

    pub fn document_url(&self) -> Option<&Url> {
        match self {
            Self::Json(doc) => doc.document_url(),
            Self::Rdf(doc) => doc.document_url(),
        }
    }

    pub fn with_document_url(self, url: Url) -> Self {
        match self {
            Self::Json(doc) => Self::Json(doc.with_document_url(url)),
            Self::Rdf(doc) => Self::Rdf(doc.with_document_url(url)),
        }
    }

    fn kind(&self) -> SourceKind {
        match self {
            Self::Json(_) => SourceKind::JsonDocument,
            Self::Rdf(_) => SourceKind::RdfDocument,
        }
    }
}

impl From<JsonDocument> for ResolvedDocument {
    fn from(doc: JsonDocument) -> Self {
        Self::Json(doc)
    }
}

impl From<RdfDocument> for ResolvedDocument {
    fn from(doc: RdfDocument) -> Self {
        Self::Rdf(doc)
    }
}

/// Anything a caller can pass where a document is expected.
#[derive(Clone, Debug, PartialEq)]
pub enum DocumentReference {
    Text(String),
    Iri(Url),
    /// Parsed JSON; only resolvable in the JSON family.
    Json(Value),
    /// Parsed RDF; only resolvable in the RDF family.
    Dataset(Dataset),
    Resolved(ResolvedDocument),
}

impl DocumentReference {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Text(_) => SourceKind::Text,
            Self::Iri(_) => SourceKind::Iri,
            Self::Json(_) => SourceKind::JsonValue,
            Self::Dataset(_) => SourceKind::RdfDataset,
            Self::Resolved(doc) => doc.kind(),
        }
    }
}

impl From<&str> for DocumentReference {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DocumentReference {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Url> for DocumentReference {
    fn from(url: Url) -> Self {
        Self::Iri(url)
    }
}

impl From<Value> for DocumentReference {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Dataset> for DocumentReference {
    fn from(dataset: Dataset) -> Self {
        Self::Dataset(dataset)
    }
}

impl From<ResolvedDocument> for DocumentReference {
    fn from(doc: ResolvedDocument) -> Self {
        Self::Resolved(doc)
    }
}

impl From<JsonDocument> for DocumentReference {
    fn from(doc: JsonDocument) -> Self {
        Self::Resolved(ResolvedDocument::Json(doc))
    }
}

impl From<RdfDocument> for DocumentReference {
    fn from(doc: RdfDocument) -> Self {
        Self::Resolved(ResolvedDocument::Rdf(doc))
    }
}

/// Resolve a reference into a document handle of the given family.
///
/// `media_type` defaults to [`DocumentFamily::default_media_type`]. It tags
/// text, IRI and parsed sources; a reference that is already a handle of the
/// right family is returned unchanged, keeping its own media type.
pub fn resolve(
    reference: DocumentReference,
    media_type: Option<MediaType>,
    family: DocumentFamily,
) -> Result<ResolvedDocument> {
    match family {
        DocumentFamily::Json => resolve_json(reference, media_type).map(ResolvedDocument::Json),
        DocumentFamily::Rdf => resolve_rdf(reference, media_type).map(ResolvedDocument::Rdf),
    }
}

pub(crate) fn resolve_json(
    reference: DocumentReference,
    media_type: Option<MediaType>,
) -> Result<JsonDocument> {
    let kind = reference.kind();
    let media_type = media_type.unwrap_or_else(|| DocumentFamily::Json.default_media_type());

    let document = match reference {
        DocumentReference::Text(text) => JsonDocument::from_text(text, media_type),
        DocumentReference::Iri(url) => JsonDocument::from_iri(url, media_type),
        DocumentReference::Json(value) => JsonDocument::from_value(value, media_type),
        DocumentReference::Resolved(ResolvedDocument::Json(doc)) => doc,
        DocumentReference::Dataset(_) | DocumentReference::Resolved(ResolvedDocument::Rdf(_)) => {
            return Err(AdapterError::unsupported(kind, DocumentFamily::Json));
        }
    };

    trace!(%kind, media_type = %document.media_type(), "resolved JSON document");
    Ok(document)
}

pub(crate) fn resolve_rdf(
    reference: DocumentReference,
    media_type: Option<MediaType>,
) -> Result<RdfDocument> {
    let kind = reference.kind();
    let media_type = media_type.unwrap_or_else(|| DocumentFamily::Rdf.default_media_type());

    let document = match reference {
        DocumentReference::Text(text) => RdfDocument::from_text(text, media_type),
        DocumentReference::Iri(url) => RdfDocument::from_iri(url, media_type),
        DocumentReference::Dataset(dataset) => RdfDocument::from_dataset(dataset, media_type),
        DocumentReference::Resolved(ResolvedDocument::Rdf(doc)) => doc,
        DocumentReference::Json(_) | DocumentReference::Resolved(ResolvedDocument::Json(_)) => {
            return Err(AdapterError::unsupported(kind, DocumentFamily::Rdf));
        }
    };

    trace!(%kind, media_type = %document.media_type(), "resolved RDF document");
    Ok(document)
}
