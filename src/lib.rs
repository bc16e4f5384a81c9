//! # Mantle
//!
//! Composable decorators for prediction models: attach behavior such as
//! identifier tagging, schema augmentation or pre/post hooks to a model
//! without touching the model's own code.
//!
//! ## Features
//!
//! - **Explicit Contracts**: every model exposes an input and output [`Schema`];
//!   raw data is validated into a [`Record`] and every violation is reported at once
//! - **Forwarding by Default**: a [`Decorator`] only names its inner model and
//!   overrides what it changes; everything else reads through to the model it wraps
//! - **Safe Extension**: decorators grow schemas with [`extend`], which never
//!   mutates the original and refuses to shadow an existing field
//! - **Recursive Chains**: decorators wrap decorators exactly the way they wrap models
//!
//! ## Quick Start
//!
//! ```rust
//! use mantle::prelude::*;
//! use mantle::{ModelResult, Record, SchemaConflictError};
//! use serde_json::json;
//!
//! struct Labeler;
//!
//! impl Model for Labeler {
//!     fn display_name(&self) -> &str { "Labeler" }
//!     fn qualified_name(&self) -> &str { "labeler" }
//!     fn description(&self) -> String { "Labels a number.".to_string() }
//!     fn version(&self) -> &str { "1.0.0" }
//!
//!     fn input_schema(&self) -> Result<Schema, SchemaConflictError> {
//!         Schema::builder("ModelInput")
//!             .field(Field::float("a").gt(0.0).lt(10.0))
//!             .build()
//!     }
//!
//!     fn output_schema(&self) -> Result<Schema, SchemaConflictError> {
//!         Ok(mantle::schema!("ModelOutput { label: string }"))
//!     }
//!
//!     fn predict(&self, input: &Record) -> ModelResult<Record> {
//!         let label = if input.get_f64("a") > Some(5.0) { "high" } else { "low" };
//!         Ok(self.output_schema()?.validate(&json!({ "label": label }))?)
//!     }
//! }
//!
//! let model = Chain::new(Labeler).with_prediction_id().build().unwrap();
//! let output = model
//!     .predict_value(&json!({ "a": 5.0, "prediction_id": "fixed-id" }))
//!     .unwrap();
//! assert_eq!(output.get_str("label"), Some("low"));
//! assert_eq!(output.get_str("prediction_id"), Some("fixed-id"));
//! ```
//!
//! ## Module Organization
//!
//! - [`schema`]: schema descriptors, validated records and schema extension
//! - [`decorator`]: the decorator trait, the provided decorators and [`Chain`]
//! - [`registry`]: models keyed by qualified name
//! - [`telemetry`]: trace collection for instrumented chains
//! - [`prelude`]: Commonly used types and traits (import with `use mantle::prelude::*`)

// ============================================================================
// Core Module
// ============================================================================

mod core;
pub mod error;

// ============================================================================
// Public Re-exports - Granular Imports
// ============================================================================

pub use crate::core::{decorator, ids, model, registry, schema, telemetry};

// Core types
pub use crate::core::FieldValue;
pub use crate::core::model::{Model, ModelDetails, ModelMetadata};

// Schemas
pub use crate::core::schema::{Constraint, Field, FieldType, Presence, Record, Schema, SchemaBuilder, extend};

// Decorators
pub use crate::core::decorator::Decorator;
pub use crate::core::decorator::chain::Chain;
pub use crate::core::decorator::instrumentation::{FnHooks, InstrumentationDecorator, LogHooks, PredictHooks};
pub use crate::core::decorator::prediction_id::{PredictionIdConfig, PredictionIdDecorator};

// Supporting pieces
pub use crate::core::ids::{IdGenerator, UuidV4};
pub use crate::core::registry::ModelRegistry;
pub use crate::core::telemetry::{MemoryTelemetry, Telemetry, TelemetryHooks, TraceEntry};

// Errors
pub use error::{
    ModelError, ModelResult, PredictionError, RegistryError, SchemaConflictError,
    ValidationError, Violation, ViolationKind,
};

// ============================================================================
// Prelude Module - Convenient Bulk Imports
// ============================================================================

/// The main prelude: the model trait, schemas and the provided decorators.
///
/// `Decorator` is not included since its methods share names with `Model`'s.
/// Import it where you implement a decorator.
///
/// # Example
/// ```rust
/// use mantle::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        Chain, Field, FieldType, FieldValue, FnHooks, InstrumentationDecorator, LogHooks,
        Model, ModelError, ModelRegistry, PredictHooks, PredictionIdConfig,
        PredictionIdDecorator, Record, Schema,
    };
}

// ============================================================================
// Re-export commonly used external types for convenience
// ============================================================================

pub use serde_json::Value as JsonValue;

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
