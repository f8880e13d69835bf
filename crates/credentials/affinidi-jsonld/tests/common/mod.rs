#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use affinidi_jsonld::rdf::{Literal, Quad, Term};
use affinidi_jsonld::{
    Dataset, EngineOptions, JsonDocument, JsonLdEngine, Operation, RdfDocument,
};
use serde_json::{Value, json};
use tracing_subscriber::filter::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A document handle as received by the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Json(JsonDocument),
    Rdf(RdfDocument),
}

/// One engine invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub operation: Operation,
    pub inputs: Vec<Input>,
    pub options: EngineOptions,
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("engine failure: {0}")]
pub struct EngineFailure(pub String);

/// Engine double that records every call and answers with canned results.
#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<Call>>,
    responses: HashMap<Operation, Value>,
    failure: Option<String>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_response(mut self, operation: Operation, response: Value) -> Self {
        self.responses.insert(operation, response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// The single recorded call; panics if there is not exactly one.
    pub fn only_call(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one engine call: {calls:?}");
        calls.into_iter().next().unwrap()
    }

    fn record(
        &self,
        operation: Operation,
        inputs: Vec<Input>,
        options: &EngineOptions,
    ) -> Result<Value, EngineFailure> {
        self.calls.lock().unwrap().push(Call {
            operation,
            inputs,
            options: options.clone(),
        });
        match &self.failure {
            Some(message) => Err(EngineFailure(message.clone())),
            None => Ok(self
                .responses
                .get(&operation)
                .cloned()
                .unwrap_or_else(|| json!({ "operation": operation.name() }))),
        }
    }
}

pub fn alice_quad() -> Quad {
    Quad::new(
        Term::iri("http://example.org/alice"),
        Term::iri("https://schema.org/name"),
        Literal::new("Alice"),
    )
}

impl JsonLdEngine for RecordingEngine {
    type Error = EngineFailure;

    fn compact(
        &self,
        document: JsonDocument,
        context: JsonDocument,
        options: &EngineOptions,
    ) -> Result<Value, Self::Error> {
        self.record(
            Operation::Compact,
            vec![Input::Json(document), Input::Json(context)],
            options,
        )
    }

    fn expand(&self, document: JsonDocument, options: &EngineOptions) -> Result<Value, Self::Error> {
        self.record(Operation::Expand, vec![Input::Json(document)], options)
    }

    fn flatten(
        &self,
        document: JsonDocument,
        options: &EngineOptions,
    ) -> Result<Value, Self::Error> {
        self.record(Operation::Flatten, vec![Input::Json(document)], options)
    }

    fn frame(
        &self,
        document: JsonDocument,
        frame: JsonDocument,
        options: &EngineOptions,
    ) -> Result<Value, Self::Error> {
        self.record(
            Operation::Frame,
            vec![Input::Json(document), Input::Json(frame)],
            options,
        )
    }

    fn to_rdf(
        &self,
        document: JsonDocument,
        options: &EngineOptions,
    ) -> Result<Dataset, Self::Error> {
        self.record(Operation::ToRdf, vec![Input::Json(document)], options)?;
        Ok([alice_quad()].into_iter().collect())
    }

    fn from_rdf(
        &self,
        document: RdfDocument,
        options: &EngineOptions,
    ) -> Result<Value, Self::Error> {
        self.record(Operation::FromRdf, vec![Input::Rdf(document)], options)
    }
}
