use crate::core::model::{Model, ModelDetails, ModelMetadata};
use crate::error::RegistryError;
use std::collections::HashMap;
use std::sync::Arc;

/// Models keyed by qualified name.
///
/// The registry owns one handle per model; [`decorate`](Self::decorate)
/// swaps that handle for a decorated version, so later lookups see the
/// whole chain.
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<dyn Model>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under its qualified name.
    pub fn register(&mut self, model: Arc<dyn Model>) -> Result<(), RegistryError> {
        let key = model.qualified_name().to_string();
        if self.models.contains_key(&key) {
            return Err(RegistryError::AlreadyRegistered(key));
        }
        log::debug!("Registered {} ({})", key, model.repr());
        self.models.insert(key, model);
        Ok(())
    }

    pub fn remove(&mut self, qualified_name: &str) -> Result<Arc<dyn Model>, RegistryError> {
        let model = self
            .models
            .remove(qualified_name)
            .ok_or_else(|| RegistryError::NotFound(qualified_name.to_string()))?;
        log::debug!("Removed {}", qualified_name);
        Ok(model)
    }

    pub fn get(&self, qualified_name: &str) -> Option<Arc<dyn Model>> {
        self.models.get(qualified_name).cloned()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Identity of every registered model, sorted by qualified name.
    pub fn models(&self) -> Vec<ModelMetadata> {
        let mut list: Vec<ModelMetadata> = self
            .models
            .values()
            .map(|m| ModelMetadata::of(m.as_ref()))
            .collect();
        list.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
        list
    }

    /// Identity and JSON schemas of one model.
    pub fn metadata(&self, qualified_name: &str) -> Result<ModelDetails, RegistryError> {
        let model = self
            .models
            .get(qualified_name)
            .ok_or_else(|| RegistryError::NotFound(qualified_name.to_string()))?;
        Ok(ModelDetails::of(model.as_ref())?)
    }

    /// Replace a registered model with `wrap(model)`.
    ///
    /// The new chain's schemas are resolved before it is stored; on a
    /// conflict the original model stays registered.
    pub fn decorate<D, F>(&mut self, qualified_name: &str, wrap: F) -> Result<(), RegistryError>
    where
        D: Model + 'static,
        F: FnOnce(Arc<dyn Model>) -> D,
    {
        let current = self
            .models
            .get(qualified_name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(qualified_name.to_string()))?;

        let decorated: Arc<dyn Model> = Arc::new(wrap(current));
        if let Err(e) = decorated
            .input_schema()
            .and_then(|_| decorated.output_schema())
        {
            log::warn!("Not decorating {}: {}", qualified_name, e);
            return Err(e.into());
        }

        log::debug!("Decorated {} as {}", qualified_name, decorated.repr());
        self.models.insert(qualified_name.to_string(), decorated);
        Ok(())
    }
}
