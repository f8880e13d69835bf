use std::fmt;

use url::Url;

use crate::document::{DocumentFamily, DocumentReference, SourceKind};
use crate::options::{OptionKey, OptionValue};
use crate::processor::Operation;

/// Errors raised by the adapter itself, before any engine call is made.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// The reference cannot be turned into a document of the requested family.
    #[error("Unsupported source kind: {kind} cannot be resolved in the {family} family")]
    UnsupportedSourceKind {
        kind: SourceKind,
        family: DocumentFamily,
    },

    /// The positional arguments do not match any signature of the operation.
    #[error("No applicable operation: {operation} does not accept ({signature})")]
    NoApplicableOperation {
        operation: Operation,
        signature: String,
    },

    /// An option was supplied with a value of the wrong shape.
    #[error("Invalid value for option '{key}': expected {expected}, found {found}")]
    InvalidOptionValue {
        key: OptionKey,
        expected: &'static str,
        found: &'static str,
    },

    /// Raised by strict translation for names outside the option vocabulary.
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

impl AdapterError {
    pub fn unsupported(kind: SourceKind, family: DocumentFamily) -> Self {
        Self::UnsupportedSourceKind { kind, family }
    }

    pub fn no_applicable(operation: Operation, args: &[DocumentReference]) -> Self {
        let signature = args
            .iter()
            .map(|arg| arg.kind().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::NoApplicableOperation {
            operation,
            signature,
        }
    }

    pub fn invalid_value(key: OptionKey, expected: &'static str, found: &OptionValue) -> Self {
        Self::InvalidOptionValue {
            key,
            expected,
            found: found.type_name(),
        }
    }

    pub fn config(msg: impl fmt::Display) -> Self {
        Self::ConfigError(msg.to_string())
    }
}

/// Error returned by [`Processor`](crate::Processor) operations.
///
/// Engine failures are carried as-is in [`DispatchError::Engine`]; the adapter
/// never inspects or rewrites them.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError<E> {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Engine(E),
}

impl<E> DispatchError<E> {
    /// The adapter error, if the failure happened before the engine was called.
    pub fn adapter(&self) -> Option<&AdapterError> {
        match self {
            Self::Adapter(err) => Some(err),
            Self::Engine(_) => None,
        }
    }

    /// Consumes the error, returning the engine's own error value if there is one.
    pub fn into_engine(self) -> Option<E> {
        match self {
            Self::Engine(err) => Some(err),
            Self::Adapter(_) => None,
        }
    }
}

/// Error type for [`DocumentLoader`](crate::engine::DocumentLoader) implementations.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// No document is known for the URL.
    #[error("Document not found: {0}")]
    NotFound(Url),

    /// The loader does not handle this URL scheme or media type.
    #[error("Unsupported document: {0}")]
    Unsupported(String),

    /// Wraps an arbitrary error source.
    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl LoaderError {
    /// Create an `Other` error from any error type.
    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
