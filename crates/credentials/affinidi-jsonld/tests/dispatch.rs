mod common;

use affinidi_jsonld::document::{JsonContent, RdfContent};
use affinidi_jsonld::options::RdfDirection;
use affinidi_jsonld::{
    AdapterError, ArgKind, ConfigurationRecord, Dataset, DispatchError, DocumentFamily,
    DocumentReference, EngineOptions, JsonDocument, MediaType, OptionKey, Operation, Output,
    Processor, RdfDocument, SourceKind,
};
use common::{EngineFailure, Input, RecordingEngine, alice_quad, init_tracing};
use serde_json::json;
use url::Url;

const PERSON: &str = r#"{"@context": {"@vocab": "https://schema.org/"}, "name": "Alice"}"#;

fn person_iri() -> Url {
    Url::parse("https://example.org/people/alice.jsonld").unwrap()
}

/// A reference of `kind` that fits an argument slot of `family`.
fn reference(kind: ArgKind, family: DocumentFamily) -> DocumentReference {
    match (kind, family) {
        (ArgKind::Text, _) => PERSON.into(),
        (ArgKind::Iri, _) => person_iri().into(),
        (ArgKind::Document, DocumentFamily::Json) => {
            JsonDocument::from_text(PERSON, MediaType::JsonLd).into()
        }
        (ArgKind::Document, DocumentFamily::Rdf) => {
            RdfDocument::from_dataset([alice_quad()].into_iter().collect(), MediaType::NQuads)
                .into()
        }
    }
}

fn assert_no_applicable(
    err: DispatchError<EngineFailure>,
    expected: Operation,
) {
    match err.adapter() {
        Some(AdapterError::NoApplicableOperation { operation, .. }) => {
            assert_eq!(*operation, expected)
        }
        other => panic!("expected NoApplicableOperation for {expected}, got {other:?}"),
    }
}

#[test]
fn every_declared_signature_reaches_the_engine_once() {
    init_tracing();

    for operation in Operation::ALL {
        for signature in operation.signatures() {
            let processor = Processor::new(RecordingEngine::new());
            let args = signature
                .iter()
                .zip(operation.families())
                .map(|(kind, family)| reference(*kind, *family))
                .collect();

            let output = processor
                .dispatch(operation, args, &ConfigurationRecord::new())
                .unwrap_or_else(|err| panic!("{operation} {signature:?}: {err}"));

            let call = processor.engine().only_call();
            assert_eq!(call.operation, operation);
            assert_eq!(call.inputs.len(), operation.arity());
            assert_eq!(call.options, EngineOptions::default());
            match operation {
                Operation::ToRdf => assert!(matches!(output, Output::Dataset(_))),
                _ => assert!(matches!(output, Output::Document(_))),
            }
        }
    }
}

#[test]
fn parsed_values_of_the_right_family_have_no_applicable_operation() {
    init_tracing();

    for operation in Operation::ALL {
        let value = match operation.families()[0] {
            DocumentFamily::Json => DocumentReference::from(json!({"name": "Alice"})),
            DocumentFamily::Rdf => DocumentReference::from(Dataset::new()),
        };
        let processor = Processor::new(RecordingEngine::new());
        let args = vec![value; operation.arity()];
        let err = processor
            .dispatch(operation, args, &ConfigurationRecord::new())
            .unwrap_err();
        assert_no_applicable(err, operation);
        assert!(processor.engine().calls().is_empty());
    }
}

#[test]
fn parsed_values_of_the_other_family_are_unsupported() {
    init_tracing();

    for operation in Operation::ALL {
        let (value, kind) = match operation.families()[0] {
            DocumentFamily::Json => (DocumentReference::from(Dataset::new()), SourceKind::RdfDataset),
            DocumentFamily::Rdf => (
                DocumentReference::from(json!({"name": "Alice"})),
                SourceKind::JsonValue,
            ),
        };
        let processor = Processor::new(RecordingEngine::new());
        let args = vec![value; operation.arity()];
        let err = processor
            .dispatch(operation, args, &ConfigurationRecord::new())
            .unwrap_err();
        match err.adapter() {
            Some(AdapterError::UnsupportedSourceKind { kind: found, family }) => {
                assert_eq!(*found, kind, "{operation}");
                assert_eq!(*family, operation.families()[0], "{operation}");
            }
            other => panic!("expected UnsupportedSourceKind for {operation}, got {other:?}"),
        }
        assert!(processor.engine().calls().is_empty());
    }
}

#[test]
fn parsed_value_in_a_single_slot_is_rejected() {
    let processor = Processor::new(RecordingEngine::new());
    let err = processor
        .compact(PERSON, json!({"@vocab": "https://schema.org/"}), &ConfigurationRecord::new())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "No applicable operation: compact does not accept (text, json-value)"
    );
    assert!(processor.engine().calls().is_empty());
}

#[test]
fn wrong_arity_has_no_applicable_operation() {
    for operation in Operation::ALL {
        for count in [0, operation.arity() + 1] {
            let processor = Processor::new(RecordingEngine::new());
            let args = vec![DocumentReference::from(PERSON); count];
            let err = processor
                .dispatch(operation, args, &ConfigurationRecord::new())
                .unwrap_err();
            assert_no_applicable(err, operation);
            assert!(processor.engine().calls().is_empty());
        }
    }
}

#[test]
fn text_gets_the_family_default_media_type() {
    let processor = Processor::new(RecordingEngine::new());
    processor.expand(PERSON, &ConfigurationRecord::new()).unwrap();
    processor
        .from_rdf(
            "<http://example.org/alice> <https://schema.org/name> \"Alice\" .\n",
            &ConfigurationRecord::new(),
        )
        .unwrap();

    let calls = processor.engine().calls();
    let Input::Json(expanded) = &calls[0].inputs[0] else {
        panic!("expand received a non-JSON document");
    };
    assert_eq!(expanded.media_type(), &MediaType::Json);
    assert_eq!(expanded.content(), &JsonContent::Text(PERSON.to_string()));

    let Input::Rdf(quads) = &calls[1].inputs[0] else {
        panic!("from-rdf received a non-RDF document");
    };
    assert_eq!(quads.media_type(), &MediaType::NQuads);
    assert!(matches!(quads.content(), RdfContent::Text(_)));
}

#[test]
fn iri_stays_a_lazy_reference() {
    let processor = Processor::new(RecordingEngine::new());
    processor
        .flatten(person_iri(), &ConfigurationRecord::new())
        .unwrap();

    let Input::Json(document) = &processor.engine().only_call().inputs[0] else {
        panic!("flatten received a non-JSON document");
    };
    assert_eq!(document.content(), &JsonContent::Remote(person_iri()));
    assert_eq!(document.document_url(), Some(&person_iri()));
}

#[test]
fn handles_pass_through_unchanged() {
    let handle = JsonDocument::from_value(json!({"name": "Alice"}), MediaType::JsonLd)
        .with_document_url(person_iri());
    let processor = Processor::new(RecordingEngine::new());
    processor
        .compact(handle.clone(), handle.clone(), &ConfigurationRecord::new())
        .unwrap();

    assert_eq!(
        processor.engine().only_call().inputs,
        vec![Input::Json(handle.clone()), Input::Json(handle)]
    );
}

#[test]
fn rdf_handle_in_a_json_slot_is_unsupported() {
    let rdf = RdfDocument::from_text("", MediaType::NQuads);
    let processor = Processor::new(RecordingEngine::new());

    let err = processor
        .compact(PERSON, rdf, &ConfigurationRecord::new())
        .unwrap_err();
    assert!(matches!(
        err.adapter(),
        Some(AdapterError::UnsupportedSourceKind {
            family: DocumentFamily::Json,
            ..
        })
    ));
    assert!(processor.engine().calls().is_empty());
}

#[test]
fn json_handle_in_an_rdf_slot_is_unsupported() {
    let processor = Processor::new(RecordingEngine::new());
    let err = processor
        .from_rdf(
            JsonDocument::from_text(PERSON, MediaType::JsonLd),
            &ConfigurationRecord::new(),
        )
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Unsupported source kind: json-document cannot be resolved in the RDF family"
    );
    assert!(processor.engine().calls().is_empty());
}

#[test]
fn engine_errors_are_returned_verbatim() {
    let processor = Processor::new(RecordingEngine::failing("invalid @context"));

    let err = processor
        .to_rdf(PERSON, &ConfigurationRecord::new())
        .unwrap_err();
    assert!(err.adapter().is_none());
    assert_eq!(err.to_string(), "engine failure: invalid @context");
    assert_eq!(
        err.into_engine(),
        Some(EngineFailure("invalid @context".to_string()))
    );
    assert_eq!(processor.engine().calls().len(), 1);
}

#[test]
fn option_errors_stop_before_the_engine() {
    let processor = Processor::new(RecordingEngine::new());
    let config = ConfigurationRecord::new().with(OptionKey::RdfDirection, true);

    let err = processor.to_rdf(PERSON, &config).unwrap_err();
    assert!(matches!(
        err.adapter(),
        Some(AdapterError::InvalidOptionValue {
            key: OptionKey::RdfDirection,
            ..
        })
    ));
    assert!(processor.engine().calls().is_empty());
}

#[test]
fn each_call_translates_its_own_options() {
    let processor = Processor::new(RecordingEngine::new());
    let compound = ConfigurationRecord::new().with(OptionKey::RdfDirection, RdfDirection::CompoundLiteral);

    processor.to_rdf(PERSON, &compound).unwrap();
    processor.to_rdf(PERSON, &ConfigurationRecord::new()).unwrap();

    let calls = processor.engine().calls();
    assert_eq!(calls[0].options.rdf_direction, Some(RdfDirection::CompoundLiteral));
    assert_eq!(calls[1].options, EngineOptions::default());
}
