use super::instrumentation::{InstrumentationDecorator, PredictHooks};
use super::prediction_id::{PredictionIdConfig, PredictionIdDecorator};
use crate::core::model::Model;
use crate::error::SchemaConflictError;
use std::sync::Arc;

/// Builds a decorator chain from the innermost model outwards.
///
/// ```rust
/// use mantle::prelude::*;
/// # use mantle::{ModelResult, Record, SchemaConflictError};
/// # struct Iris;
/// # impl Model for Iris {
/// #     fn display_name(&self) -> &str { "Iris Model" }
/// #     fn qualified_name(&self) -> &str { "iris_model" }
/// #     fn description(&self) -> String { String::new() }
/// #     fn version(&self) -> &str { "1.0.0" }
/// #     fn input_schema(&self) -> Result<Schema, SchemaConflictError> { Ok(mantle::schema!("In { a: float }")) }
/// #     fn output_schema(&self) -> Result<Schema, SchemaConflictError> { Ok(mantle::schema!("Out { label: string }")) }
/// #     fn predict(&self, _: &Record) -> ModelResult<Record> { unimplemented!() }
/// # }
/// let model = Chain::new(Iris)
///     .with_prediction_id()
///     .with_hooks(LogHooks)
///     .build()
///     .unwrap();
/// assert_eq!(model.repr(), "InstrumentationDecorator(PredictionIdDecorator(iris_model))");
/// ```
pub struct Chain {
    model: Arc<dyn Model>,
}

impl Chain {
    pub fn new<M: Model + 'static>(model: M) -> Self {
        Self::from_shared(Arc::new(model))
    }

    /// Start from a model that other chains may also wrap.
    pub fn from_shared(model: Arc<dyn Model>) -> Self {
        Self { model }
    }

    /// Wrap the current chain in another layer.
    pub fn decorate<D, F>(self, wrap: F) -> Self
    where
        D: Model + 'static,
        F: FnOnce(Arc<dyn Model>) -> D,
    {
        Self {
            model: Arc::new(wrap(self.model)),
        }
    }

    pub fn with_prediction_id(self) -> Self {
        self.decorate(PredictionIdDecorator::new)
    }

    pub fn with_prediction_id_config(self, config: PredictionIdConfig) -> Self {
        self.decorate(|inner| PredictionIdDecorator::with_config(inner, config))
    }

    pub fn with_hooks<H: PredictHooks + 'static>(self, hooks: H) -> Self {
        self.decorate(|inner| InstrumentationDecorator::new(inner, hooks))
    }

    /// Finish the chain, resolving both schemas once so that conflicting
    /// layers are reported now rather than on first use.
    pub fn build(self) -> Result<Arc<dyn Model>, SchemaConflictError> {
        let checked = self
            .model
            .input_schema()
            .and_then(|_| self.model.output_schema());
        if let Err(e) = checked {
            log::warn!("Chain {} has conflicting schemas: {}", self.model.repr(), e);
            return Err(e);
        }
        Ok(self.model)
    }

    /// Finish the chain without resolving schemas.
    pub fn build_lazy(self) -> Arc<dyn Model> {
        self.model
    }
}
