/*!
 * The seam to the JSON-LD processing engine.
 *
 * The adapter never runs JSON-LD algorithms itself. An engine implements
 * [`JsonLdEngine`]; [`Processor`](crate::Processor) resolves arguments and
 * options and hands them over. Caches and document loaders are owned by the
 * caller, passed through [`EngineOptions`] and only ever used by the engine.
 */

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::document::{JsonDocument, RdfDocument, ResolvedDocument};
use crate::error::LoaderError;
use crate::options::EngineOptions;
use crate::rdf::Dataset;

/// A JSON-LD processor exposing the six transformation entry points.
///
/// Implementations are expected to be pure with respect to the adapter: any
/// state they need (caches, loaders) arrives through [`EngineOptions`].
pub trait JsonLdEngine {
    /// Engine failure type, surfaced to callers unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    fn compact(
        &self,
        document: JsonDocument,
        context: JsonDocument,
        options: &EngineOptions,
    ) -> Result<Value, Self::Error>;

    fn expand(&self, document: JsonDocument, options: &EngineOptions)
    -> Result<Value, Self::Error>;

    fn flatten(
        &self,
        document: JsonDocument,
        options: &EngineOptions,
    ) -> Result<Value, Self::Error>;

    fn frame(
        &self,
        document: JsonDocument,
        frame: JsonDocument,
        options: &EngineOptions,
    ) -> Result<Value, Self::Error>;

    fn to_rdf(
        &self,
        document: JsonDocument,
        options: &EngineOptions,
    ) -> Result<Dataset, Self::Error>;

    fn from_rdf(
        &self,
        document: RdfDocument,
        options: &EngineOptions,
    ) -> Result<Value, Self::Error>;
}

/// Options an engine passes to its [`DocumentLoader`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub extract_all_scripts: bool,
    pub profile: Option<String>,
    pub request_profile: Vec<String>,
}

/// Dereferences remote documents and contexts on behalf of the engine.
pub trait DocumentLoader: Send + Sync {
    fn load(&self, url: &Url, options: &LoadOptions) -> Result<ResolvedDocument, LoaderError>;
}

/// String-keyed cache shared between engine invocations.
pub trait Cache<V>: Send + Sync {
    fn get(&self, key: &str) -> Option<V>;

    fn insert(&self, key: String, value: V);
}

/// Shared handle to a caller-owned cache or loader.
///
/// Two handles are equal when they point at the same object, which keeps
/// [`EngineOptions`] comparable without requiring anything of the target.
pub struct Handle<T: ?Sized>(Arc<T>);

impl<T: ?Sized> Handle<T> {
    pub fn new(inner: Arc<T>) -> Self {
        Self(inner)
    }

    pub fn as_arc(&self) -> &Arc<T> {
        &self.0
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Eq for Handle<T> {}

impl<T: ?Sized> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:p})", Arc::as_ptr(&self.0))
    }
}

impl<T: ?Sized> Deref for Handle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> From<Arc<T>> for Handle<T> {
    fn from(inner: Arc<T>) -> Self {
        Self(inner)
    }
}

/// Cache of processed contexts, keyed by context IRI.
pub type ContextCache = Handle<dyn Cache<Value>>;

/// Cache of loaded documents, keyed by document IRI.
pub type DocumentCache = Handle<dyn Cache<ResolvedDocument>>;

pub type LoaderHandle = Handle<dyn DocumentLoader>;
