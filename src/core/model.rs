use crate::core::FieldValue;
use crate::core::schema::{Record, Schema};
use crate::error::{ModelResult, SchemaConflictError};
use serde::{Deserialize, Serialize};

/// A prediction unit: an identity, an input contract, an output contract and
/// a prediction operation.
///
/// Schemas are returned by value and may be computed on every call (a
/// decorator derives its schemas from its inner model's *current* ones),
/// which is why reading them can fail with a [`SchemaConflictError`].
///
/// Implementors that are meant to be shared across threads must make
/// `predict` safe to call concurrently and should say so in their docs.
pub trait Model: Send + Sync {
    /// Human readable name.
    fn display_name(&self) -> &str;

    /// Globally unique identifier.
    fn qualified_name(&self) -> &str;

    fn description(&self) -> String;

    fn version(&self) -> &str;

    fn input_schema(&self) -> Result<Schema, SchemaConflictError>;

    fn output_schema(&self) -> Result<Schema, SchemaConflictError>;

    /// Map a conforming input record to a conforming output record.
    fn predict(&self, input: &Record) -> ModelResult<Record>;

    /// Validate raw data against the current input schema, then predict.
    fn predict_value(&self, raw: &FieldValue) -> ModelResult<Record> {
        let input = self.input_schema()?.validate(raw)?;
        self.predict(&input)
    }

    /// Short rendering of the model and everything it wraps,
    /// e.g. `PredictionIdDecorator(iris_model)`.
    fn repr(&self) -> String {
        self.qualified_name().to_string()
    }
}

/// Identity of a model, as listed by a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub display_name: String,
    pub qualified_name: String,
    pub description: String,
    pub version: String,
}

impl ModelMetadata {
    pub fn of(model: &dyn Model) -> Self {
        Self {
            display_name: model.display_name().to_string(),
            qualified_name: model.qualified_name().to_string(),
            description: model.description(),
            version: model.version().to_string(),
        }
    }
}

/// Identity plus both contracts rendered as JSON Schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDetails {
    #[serde(flatten)]
    pub metadata: ModelMetadata,
    pub input_schema: FieldValue,
    pub output_schema: FieldValue,
}

impl ModelDetails {
    pub fn of(model: &dyn Model) -> Result<Self, SchemaConflictError> {
        Ok(Self {
            metadata: ModelMetadata::of(model),
            input_schema: model.input_schema()?.to_json_schema(),
            output_schema: model.output_schema()?.to_json_schema(),
        })
    }
}
