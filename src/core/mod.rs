pub mod decorator;
pub mod ids;
pub mod model;
pub mod registry;
pub mod schema;
pub mod telemetry;

/// The Alias for serde_json::Value, the raw form of every field value
pub type FieldValue = serde_json::Value;
