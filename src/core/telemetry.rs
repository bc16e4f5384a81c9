use crate::core::FieldValue;
use crate::core::decorator::instrumentation::PredictHooks;
use crate::core::model::Model;
use crate::core::schema::Record;
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// A single observed prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub timestamp: u64,
    pub qualified_name: String,
    pub version: String,
    pub inputs: FieldValue,
    pub outputs: Option<FieldValue>,
    pub error: Option<String>,
    pub metadata: HashMap<String, String>,
}

/// Trait for recording prediction traces.
pub trait Telemetry: Send + Sync {
    fn record(&self, entry: TraceEntry);

    /// Push buffered entries out. Called when a [`TelemetryHooks`] is dropped.
    fn flush(&self) {}
}

/// Simple in-memory collector for traces.
#[derive(Default)]
pub struct MemoryTelemetry {
    traces: Mutex<Vec<TraceEntry>>,
}

impl MemoryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_traces(&self) -> Vec<TraceEntry> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TraceEntry>> {
        // A panicking recorder cannot leave a half-pushed entry behind.
        self.traces.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Telemetry for MemoryTelemetry {
    fn record(&self, entry: TraceEntry) {
        self.lock().push(entry);
    }
}

/// Hooks that send one [`TraceEntry`] per prediction to a sink.
pub struct TelemetryHooks {
    sink: Arc<dyn Telemetry>,
    metadata: HashMap<String, String>,
}

impl TelemetryHooks {
    pub fn new(sink: Arc<dyn Telemetry>) -> Self {
        Self {
            sink,
            metadata: HashMap::new(),
        }
    }

    /// Attach a static key/value to every recorded entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    fn entry(&self, model: &dyn Model, input: &Record) -> TraceEntry {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        TraceEntry {
            timestamp,
            qualified_name: model.qualified_name().to_string(),
            version: model.version().to_string(),
            inputs: input.to_value(),
            outputs: None,
            error: None,
            metadata: self.metadata.clone(),
        }
    }
}

impl Drop for TelemetryHooks {
    fn drop(&mut self) {
        self.sink.flush();
    }
}

impl PredictHooks for TelemetryHooks {
    fn after(&self, model: &dyn Model, input: &Record, output: &Record) {
        let mut entry = self.entry(model, input);
        entry.outputs = Some(output.to_value());
        self.sink.record(entry);
    }

    fn failed(&self, model: &dyn Model, input: &Record, error: &ModelError) {
        let mut entry = self.entry(model, input);
        entry.error = Some(error.to_string());
        self.sink.record(entry);
    }
}
