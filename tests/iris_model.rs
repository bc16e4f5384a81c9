//! The iris mock wrapped the way a serving layer would use it: registered,
//! decorated in place, listed and queried.

use mantle::prelude::*;
use mantle::{
    MemoryTelemetry, ModelResult, RegistryError, SchemaConflictError, TelemetryHooks,
};
use serde_json::json;
use std::sync::Arc;

const SPECIES: [&str; 3] = ["Iris setosa", "Iris versicolor", "Iris virginica"];

struct IrisModelMock {
    input: Schema,
    output: Schema,
}

impl IrisModelMock {
    fn new() -> Self {
        // Contracts loaded from configuration rather than built in code.
        let input = serde_json::from_value(json!({
            "name": "ModelInput",
            "fields": [
                {"name": "sepal_length", "type": "float", "constraints": [{"gt": 5.0}, {"lt": 8.0}]},
                {"name": "sepal_width", "type": "float", "constraints": [{"gt": 2.0}, {"lt": 6.0}]},
                {"name": "petal_length", "type": "float", "constraints": [{"gt": 1.0}, {"lt": 6.8}]},
                {"name": "petal_width", "type": "float", "constraints": [{"gt": 0.0}, {"lt": 3.0}]}
            ]
        }))
        .unwrap();
        let output = Schema::builder("ModelOutput")
            .field(Field::enumeration("species", SPECIES))
            .build()
            .unwrap();
        Self { input, output }
    }
}

impl Model for IrisModelMock {
    fn display_name(&self) -> &str {
        "Iris Model"
    }

    fn qualified_name(&self) -> &str {
        "iris_model"
    }

    fn description(&self) -> String {
        "A model to predict the species of a flower based on its measurements.".to_string()
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn input_schema(&self) -> Result<Schema, SchemaConflictError> {
        Ok(self.input.clone())
    }

    fn output_schema(&self) -> Result<Schema, SchemaConflictError> {
        Ok(self.output.clone())
    }

    fn predict(&self, _input: &Record) -> ModelResult<Record> {
        Ok(self.output.validate(&json!({"species": "Iris setosa"}))?)
    }
}

fn flower() -> FieldValue {
    json!({
        "sepal_length": 6.0,
        "sepal_width": 3.0,
        "petal_length": 4.0,
        "petal_width": 1.5
    })
}

#[test]
fn test_every_invalid_measurement_is_reported() {
    let model = IrisModelMock::new();
    let err = model
        .predict_value(&json!({
            "sepal_length": 4.0,
            "sepal_width": 7.0,
            "petal_length": 4.0
        }))
        .unwrap_err();
    match err {
        ModelError::Validation(e) => {
            assert_eq!(e.schema, "ModelInput");
            assert_eq!(e.fields(), vec!["sepal_length", "sepal_width", "petal_width"]);
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn test_registry_decorates_in_place() {
    let mut registry = ModelRegistry::new();
    registry.register(Arc::new(IrisModelMock::new())).unwrap();

    let before = registry.metadata("iris_model").unwrap();
    assert_eq!(before.metadata.display_name, "Iris Model");
    assert!(before.input_schema["properties"].get("prediction_id").is_none());

    registry
        .decorate("iris_model", PredictionIdDecorator::new)
        .unwrap();
    registry
        .decorate("iris_model", |inner| InstrumentationDecorator::new(inner, LogHooks))
        .unwrap();

    let after = registry.metadata("iris_model").unwrap();
    assert_eq!(after.metadata.qualified_name, "iris_model");
    assert_eq!(after.metadata.version, "1.0.0");
    assert_eq!(
        after.input_schema["properties"]["prediction_id"]["default"],
        FieldValue::Null
    );
    assert_eq!(
        after.output_schema["properties"]["species"]["enum"],
        json!(SPECIES)
    );

    let model = registry.get("iris_model").unwrap();
    assert_eq!(
        model.repr(),
        "InstrumentationDecorator(PredictionIdDecorator(iris_model))"
    );
    let out = model.predict_value(&flower()).unwrap();
    assert_eq!(out.get_str("species"), Some("Iris setosa"));
    assert!(out.get_str("prediction_id").is_some());

    let listed = registry.models();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].description.starts_with("A model to predict"));
}

#[test]
fn test_unknown_model() {
    let mut registry = ModelRegistry::new();
    let err = registry
        .decorate("missing", PredictionIdDecorator::new)
        .unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(ref n) if n == "missing"));
}

#[test]
fn test_traces_carry_decorated_output() {
    let telemetry = Arc::new(MemoryTelemetry::new());
    let model = Chain::new(IrisModelMock::new())
        .with_prediction_id()
        .with_hooks(TelemetryHooks::new(telemetry.clone()))
        .build()
        .unwrap();

    let raw = {
        let mut raw = flower();
        raw["prediction_id"] = json!("trace-me");
        raw
    };
    model.predict_value(&raw).unwrap();

    let traces = telemetry.get_traces();
    assert_eq!(traces.len(), 1);
    // The hooks observe the tagging layer, which reports the concrete model's identity.
    assert_eq!(traces[0].qualified_name, "iris_model");
    assert_eq!(traces[0].inputs["prediction_id"], "trace-me");
    assert_eq!(
        traces[0].outputs,
        Some(json!({"species": "Iris setosa", "prediction_id": "trace-me"}))
    );
}
