use super::Decorator;
use crate::core::FieldValue;
use crate::core::ids::{IdGenerator, UuidV4};
use crate::core::model::Model;
use crate::core::schema::{Field, Record, Schema};
use crate::error::{ModelResult, SchemaConflictError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Settings for [`PredictionIdDecorator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionIdConfig {
    /// Name of the identifier field added to both schemas.
    pub field_name: String,
    /// Text appended to the inner description. Generated from `field_name`
    /// when not set.
    pub description: Option<String>,
}

impl Default for PredictionIdConfig {
    fn default() -> Self {
        Self {
            field_name: "prediction_id".to_string(),
            description: None,
        }
    }
}

impl PredictionIdConfig {
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn description_suffix(&self) -> String {
        match &self.description {
            Some(text) => text.clone(),
            None => format!(
                " This model also has an optional input called '{0}' that accepts a UUID \
                 string to uniquely identify the prediction returned. If the prediction id is \
                 not provided, a UUID is generated and returned in a field called '{0}' in the \
                 model output.",
                self.field_name
            ),
        }
    }
}

/// Tags every prediction with an identifier.
///
/// The caller may supply the identifier through an optional input field;
/// when it is absent, null or empty a fresh one is generated. Either way it
/// is returned in a required output field of the same name.
pub struct PredictionIdDecorator {
    inner: Arc<dyn Model>,
    config: PredictionIdConfig,
    ids: Arc<dyn IdGenerator>,
}

impl PredictionIdDecorator {
    pub fn new(inner: Arc<dyn Model>) -> Self {
        Self::with_config(inner, PredictionIdConfig::default())
    }

    pub fn with_config(inner: Arc<dyn Model>, config: PredictionIdConfig) -> Self {
        Self {
            inner,
            config,
            ids: Arc::new(UuidV4),
        }
    }

    /// Replace the identifier source (random UUIDs by default).
    pub fn with_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    pub fn config(&self) -> &PredictionIdConfig {
        &self.config
    }

    fn resolve_id(&self, input: &Record) -> String {
        match input.get_str(&self.config.field_name) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let id = self.ids.generate();
                log::debug!(
                    "{}: generated {} '{}'",
                    self.inner.qualified_name(),
                    self.config.field_name,
                    id
                );
                id
            }
        }
    }
}

impl Decorator for PredictionIdDecorator {
    fn inner(&self) -> &dyn Model {
        self.inner.as_ref()
    }

    fn decorator_name(&self) -> &str {
        "PredictionIdDecorator"
    }

    fn description(&self) -> String {
        self.inner.description() + &self.config.description_suffix()
    }

    fn input_schema(&self) -> Result<Schema, SchemaConflictError> {
        self.inner
            .input_schema()?
            .extended([Field::string(&self.config.field_name).nullable()])
    }

    fn output_schema(&self) -> Result<Schema, SchemaConflictError> {
        self.inner
            .output_schema()?
            .extended([Field::string(&self.config.field_name)])
    }

    fn predict(&self, input: &Record) -> ModelResult<Record> {
        let id = self.resolve_id(input);
        let prediction = self.inner.predict(input)?;

        let mut values = prediction.into_map();
        values.insert(self.config.field_name.clone(), FieldValue::String(id));
        let output = Decorator::output_schema(self)?.validate(&FieldValue::Object(values))?;
        Ok(output)
    }
}
