//! Offline [`DocumentLoader`] serving pre-resolved documents from memory.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::document::ResolvedDocument;
use crate::engine::{DocumentLoader, LoadOptions, LoaderHandle};
use crate::error::LoaderError;

/// Maps URLs to documents registered up front, e.g. bundled contexts.
///
/// Unknown URLs fail with [`LoaderError::NotFound`]; nothing is fetched.
#[derive(Clone, Debug, Default)]
pub struct StaticDocumentLoader {
    documents: HashMap<Url, ResolvedDocument>,
}

impl StaticDocumentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: Url, document: impl Into<ResolvedDocument>) -> Self {
        self.insert(url, document);
        self
    }

    pub fn insert(&mut self, url: Url, document: impl Into<ResolvedDocument>) {
        self.documents.insert(url, document.into());
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.documents.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn into_handle(self) -> LoaderHandle {
        let shared: Arc<dyn DocumentLoader> = Arc::new(self);
        LoaderHandle::new(shared)
    }
}

impl DocumentLoader for StaticDocumentLoader {
    /// Returned documents carry `url` as their document URL unless one was
    /// registered with the document itself.
    fn load(&self, url: &Url, _options: &LoadOptions) -> Result<ResolvedDocument, LoaderError> {
        let Some(document) = self.documents.get(url) else {
            debug!(%url, "no static document registered");
            return Err(LoaderError::NotFound(url.clone()));
        };

        Ok(match document.document_url() {
            Some(_) => document.clone(),
            None => document.clone().with_document_url(url.clone()),
        })
    }
}
