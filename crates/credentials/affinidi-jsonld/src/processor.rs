/*!
 * Operation dispatch.
 *
 * Each operation declares, per positional argument, the document family it
 * needs and the argument kinds it accepts. The accepted kind combinations
 * are enumerated up front in static signature tables: one-argument
 * operations accept 3 signatures, two-argument operations 9. Anything else is
 * rejected with [`AdapterError::NoApplicableOperation`] before the engine is
 * touched, except a parsed value handed to a column of the other family
 * (a dataset where JSON is required), which is an
 * [`AdapterError::UnsupportedSourceKind`].
 *
 * # Return Convention
 *
 * Engine results are returned unchanged. Engine errors come back as
 * [`DispatchError::Engine`] holding the engine's own error value.
 */

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::document::{DocumentFamily, DocumentReference, resolve_json, resolve_rdf};
use crate::engine::JsonLdEngine;
use crate::error::{AdapterError, DispatchError};
use crate::options::{ConfigurationRecord, translate};
use crate::rdf::Dataset;

/// The six transformations an engine provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Compact,
    Expand,
    Flatten,
    Frame,
    ToRdf,
    FromRdf,
}

/// Kind of a positional argument, as seen by the dispatch tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Text,
    Iri,
    /// A pre-resolved document handle of either family.
    Document,
}

impl ArgKind {
    /// `None` for references that have no place in any signature (parsed
    /// JSON values and datasets).
    pub fn of(reference: &DocumentReference) -> Option<Self> {
        match reference {
            DocumentReference::Text(_) => Some(Self::Text),
            DocumentReference::Iri(_) => Some(Self::Iri),
            DocumentReference::Resolved(_) => Some(Self::Document),
            DocumentReference::Json(_) | DocumentReference::Dataset(_) => None,
        }
    }
}

/// An accepted combination of argument kinds, one per positional argument.
pub type Signature = &'static [ArgKind];

use ArgKind::{Document as D, Iri as I, Text as T};

static UNARY: [Signature; 3] = [&[T], &[I], &[D]];

static BINARY: [Signature; 9] = [
    &[T, T],
    &[T, I],
    &[T, D],
    &[I, T],
    &[I, I],
    &[I, D],
    &[D, T],
    &[D, I],
    &[D, D],
];

impl Operation {
    pub const ALL: [Operation; 6] = [
        Self::Compact,
        Self::Expand,
        Self::Flatten,
        Self::Frame,
        Self::ToRdf,
        Self::FromRdf,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Expand => "expand",
            Self::Flatten => "flatten",
            Self::Frame => "frame",
            Self::ToRdf => "to-rdf",
            Self::FromRdf => "from-rdf",
        }
    }

    /// Family required by each positional argument, in order.
    pub fn families(self) -> &'static [DocumentFamily] {
        use DocumentFamily::{Json, Rdf};
        match self {
            Self::Compact | Self::Frame => &[Json, Json],
            Self::Expand | Self::Flatten | Self::ToRdf => &[Json],
            Self::FromRdf => &[Rdf],
        }
    }

    pub fn arity(self) -> usize {
        self.families().len()
    }

    pub fn signatures(self) -> &'static [Signature] {
        match self.arity() {
            1 => &UNARY,
            _ => &BINARY,
        }
    }

    pub fn accepts(self, kinds: &[ArgKind]) -> bool {
        self.signatures().iter().any(|signature| *signature == kinds)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| AdapterError::config(format!("unknown operation: {s}")))
    }
}

/// Result of [`Processor::dispatch`].
#[derive(Clone, Debug, PartialEq)]
pub enum Output {
    Document(Value),
    Dataset(Dataset),
}

impl Output {
    pub fn into_document(self) -> Option<Value> {
        match self {
            Self::Document(value) => Some(value),
            Self::Dataset(_) => None,
        }
    }

    pub fn into_dataset(self) -> Option<Dataset> {
        match self {
            Self::Dataset(dataset) => Some(dataset),
            Self::Document(_) => None,
        }
    }
}

/// Family a parsed value belongs to; `None` for text, IRIs and handles.
fn parsed_family(reference: &DocumentReference) -> Option<DocumentFamily> {
    match reference {
        DocumentReference::Json(_) => Some(DocumentFamily::Json),
        DocumentReference::Dataset(_) => Some(DocumentFamily::Rdf),
        _ => None,
    }
}

/// Checks the argument kinds against the operation's signature table.
///
/// A parsed value sitting in a column of the other family is reported as
/// [`AdapterError::UnsupportedSourceKind`]; one of the right family still has
/// no signature.
fn admit<const N: usize>(
    operation: Operation,
    args: [DocumentReference; N],
) -> Result<[DocumentReference; N], AdapterError> {
    for (arg, family) in args.iter().zip(operation.families()) {
        if parsed_family(arg).is_some_and(|parsed| parsed != *family) {
            return Err(AdapterError::unsupported(arg.kind(), *family));
        }
    }

    let kinds: Option<Vec<ArgKind>> = args.iter().map(ArgKind::of).collect();
    match kinds {
        Some(kinds) if operation.accepts(&kinds) => {
            debug!(%operation, ?kinds, "dispatching JSON-LD operation");
            Ok(args)
        }
        _ => Err(AdapterError::no_applicable(operation, &args)),
    }
}

fn positional<const N: usize>(
    operation: Operation,
    args: Vec<DocumentReference>,
) -> Result<[DocumentReference; N], AdapterError> {
    args.try_into()
        .map_err(|args: Vec<DocumentReference>| AdapterError::no_applicable(operation, &args))
}

/// Uniform entry point over a [`JsonLdEngine`].
///
/// Holds no state besides the engine; every call resolves its own arguments
/// and builds fresh [`EngineOptions`](crate::EngineOptions).
///
/// Arguments accept anything convertible into a [`DocumentReference`]: `&str`
/// and `String` are raw text, [`url::Url`] is an identifier, and
/// [`JsonDocument`](crate::JsonDocument) / [`RdfDocument`](crate::RdfDocument)
/// are pre-resolved handles.
#[derive(Clone, Debug, Default)]
pub struct Processor<E> {
    engine: E,
}

impl<E: JsonLdEngine> Processor<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Compact `document` against `context`.
    pub fn compact(
        &self,
        document: impl Into<DocumentReference>,
        context: impl Into<DocumentReference>,
        config: &ConfigurationRecord,
    ) -> Result<Value, DispatchError<E::Error>> {
        let [document, context] = admit(Operation::Compact, [document.into(), context.into()])?;
        let document = resolve_json(document, None)?;
        let context = resolve_json(context, None)?;
        let options = translate(config)?;
        self.engine
            .compact(document, context, &options)
            .map_err(DispatchError::Engine)
    }

    pub fn expand(
        &self,
        document: impl Into<DocumentReference>,
        config: &ConfigurationRecord,
    ) -> Result<Value, DispatchError<E::Error>> {
        let [document] = admit(Operation::Expand, [document.into()])?;
        let document = resolve_json(document, None)?;
        let options = translate(config)?;
        self.engine
            .expand(document, &options)
            .map_err(DispatchError::Engine)
    }

    pub fn flatten(
        &self,
        document: impl Into<DocumentReference>,
        config: &ConfigurationRecord,
    ) -> Result<Value, DispatchError<E::Error>> {
        let [document] = admit(Operation::Flatten, [document.into()])?;
        let document = resolve_json(document, None)?;
        let options = translate(config)?;
        self.engine
            .flatten(document, &options)
            .map_err(DispatchError::Engine)
    }

    /// Reshape `document` to match the `frame` template.
    pub fn frame(
        &self,
        document: impl Into<DocumentReference>,
        frame: impl Into<DocumentReference>,
        config: &ConfigurationRecord,
    ) -> Result<Value, DispatchError<E::Error>> {
        let [document, frame] = admit(Operation::Frame, [document.into(), frame.into()])?;
        let document = resolve_json(document, None)?;
        let frame = resolve_json(frame, None)?;
        let options = translate(config)?;
        self.engine
            .frame(document, frame, &options)
            .map_err(DispatchError::Engine)
    }

    pub fn to_rdf(
        &self,
        document: impl Into<DocumentReference>,
        config: &ConfigurationRecord,
    ) -> Result<Dataset, DispatchError<E::Error>> {
        let [document] = admit(Operation::ToRdf, [document.into()])?;
        let document = resolve_json(document, None)?;
        let options = translate(config)?;
        self.engine
            .to_rdf(document, &options)
            .map_err(DispatchError::Engine)
    }

    /// Convert an RDF document (N-Quads text by default) to expanded JSON-LD.
    pub fn from_rdf(
        &self,
        document: impl Into<DocumentReference>,
        config: &ConfigurationRecord,
    ) -> Result<Value, DispatchError<E::Error>> {
        let [document] = admit(Operation::FromRdf, [document.into()])?;
        let document = resolve_rdf(document, None)?;
        let options = translate(config)?;
        self.engine
            .from_rdf(document, &options)
            .map_err(DispatchError::Engine)
    }

    /// Run `operation` with positional arguments given as a list.
    ///
    /// A list whose length differs from the operation's arity is rejected
    /// like any other undeclared signature.
    pub fn dispatch(
        &self,
        operation: Operation,
        args: Vec<DocumentReference>,
        config: &ConfigurationRecord,
    ) -> Result<Output, DispatchError<E::Error>> {
        Ok(match operation {
            Operation::Compact => {
                let [document, context] = positional(operation, args)?;
                Output::Document(self.compact(document, context, config)?)
            }
            Operation::Expand => {
                let [document] = positional(operation, args)?;
                Output::Document(self.expand(document, config)?)
            }
            Operation::Flatten => {
                let [document] = positional(operation, args)?;
                Output::Document(self.flatten(document, config)?)
            }
            Operation::Frame => {
                let [document, frame] = positional(operation, args)?;
                Output::Document(self.frame(document, frame, config)?)
            }
            Operation::ToRdf => {
                let [document] = positional(operation, args)?;
                Output::Dataset(self.to_rdf(document, config)?)
            }
            Operation::FromRdf => {
                let [document] = positional(operation, args)?;
                Output::Document(self.from_rdf(document, config)?)
            }
        })
    }
}
