//! A complete example showing how a serving layer uses Mantle.
//!
//! This example demonstrates:
//! - Defining a concrete model with input and output schemas
//! - Tagging predictions with an identifier without touching the model
//! - Observing predictions with hooks and telemetry
//! - Registering the model and decorating it in place
//! - What a caller sees when the input is invalid

use mantle::prelude::*;
use mantle::{MemoryTelemetry, ModelResult, SchemaConflictError, TelemetryHooks};
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// Step 1: The concrete model
// ============================================================================

/// Always answers "Iris setosa", which is all a mock needs to do.
/// Stateless, so concurrent calls are fine.
struct IrisModel;

impl Model for IrisModel {
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
        Schema::builder("ModelInput")
            .field(Field::float("sepal_length").gt(5.0).lt(8.0))
            .field(Field::float("sepal_width").gt(2.0).lt(6.0))
            .field(Field::float("petal_length").gt(1.0).lt(6.8))
            .field(Field::float("petal_width").gt(0.0).lt(3.0))
            .build()
    }

    fn output_schema(&self) -> Result<Schema, SchemaConflictError> {
        Schema::builder("ModelOutput")
            .field(Field::enumeration(
                "species",
                ["Iris setosa", "Iris versicolor", "Iris virginica"],
            ))
            .build()
    }

    fn predict(&self, _input: &Record) -> ModelResult<Record> {
        Ok(self.output_schema()?.validate(&json!({"species": "Iris setosa"}))?)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let flower = json!({
        "sepal_length": 6.0,
        "sepal_width": 3.0,
        "petal_length": 4.0,
        "petal_width": 1.5
    });

    // ========================================================================
    // Step 2: Build a chain
    // ========================================================================

    let telemetry = Arc::new(MemoryTelemetry::new());
    let model = Chain::new(IrisModel)
        .with_prediction_id()
        .with_hooks(TelemetryHooks::new(telemetry.clone()))
        .build()?;

    println!("Chain: {}", model.repr());
    println!("Description: {}", model.description());
    println!(
        "Input schema: {}",
        serde_json::to_string_pretty(&model.input_schema()?.to_json_schema())?
    );

    // ========================================================================
    // Step 3: Predict, with and without an identifier
    // ========================================================================

    let generated = model.predict_value(&flower)?;
    println!("Generated id: {}", serde_json::to_string(&generated)?);

    let mut tagged = flower.clone();
    tagged["prediction_id"] = json!("abc-123");
    let echoed = model.predict_value(&tagged)?;
    println!("Supplied id:  {}", serde_json::to_string(&echoed)?);

    println!("Recorded {} trace(s)", telemetry.get_traces().len());

    // ========================================================================
    // Step 4: Invalid input
    // ========================================================================

    match model.predict_value(&json!({"sepal_length": 15.0})) {
        Ok(_) => println!("Unexpectedly accepted"),
        Err(e) => println!("Rejected: {e}"),
    }

    // ========================================================================
    // Step 5: Registry
    // ========================================================================

    let mut registry = ModelRegistry::new();
    registry.register(Arc::new(IrisModel))?;
    registry.decorate("iris_model", PredictionIdDecorator::new)?;
    println!(
        "Registered: {}",
        serde_json::to_string_pretty(&registry.metadata("iris_model")?)?
    );

    Ok(())
}
