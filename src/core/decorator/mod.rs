//! Decorators: models that wrap exactly one inner model.
//!
//! A type implementing [`Decorator`] only has to say which model it wraps.
//! Every member of the [`Model`] capability set has a default body that
//! delegates to that inner model, so a decorator overrides just the members
//! it changes and is a [`Model`] itself through the blanket impl below.
//! Since the inner model is only ever seen as `dyn Model`, wrapping a
//! decorator and wrapping a concrete model are the same operation.
//!
//! Decorators receive their inner model when constructed and never give
//! it up, so a chain cannot loop back onto itself.

pub mod chain;
pub mod instrumentation;
pub mod prediction_id;

use crate::core::model::Model;
use crate::core::schema::{Record, Schema};
use crate::error::{ModelResult, SchemaConflictError};

/// A [`Model`] that forwards to an inner model unless told otherwise.
///
/// Overrides must read the inner model's value at call time and must not
/// cache it, so that changes further down the chain are always visible.
pub trait Decorator: Send + Sync {
    /// The wrapped model.
    fn inner(&self) -> &dyn Model;

    /// Name used when rendering the chain. Defaults to the type's name.
    fn decorator_name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    fn display_name(&self) -> &str {
        self.inner().display_name()
    }

    fn qualified_name(&self) -> &str {
        self.inner().qualified_name()
    }

    fn description(&self) -> String {
        self.inner().description()
    }

    fn version(&self) -> &str {
        self.inner().version()
    }

    fn input_schema(&self) -> Result<Schema, SchemaConflictError> {
        self.inner().input_schema()
    }

    fn output_schema(&self) -> Result<Schema, SchemaConflictError> {
        self.inner().output_schema()
    }

    fn predict(&self, input: &Record) -> ModelResult<Record> {
        self.inner().predict(input)
    }
}

impl<D: Decorator> Model for D {
    fn display_name(&self) -> &str {
        Decorator::display_name(self)
    }

    fn qualified_name(&self) -> &str {
        Decorator::qualified_name(self)
    }

    fn description(&self) -> String {
        Decorator::description(self)
    }

    fn version(&self) -> &str {
        Decorator::version(self)
    }

    fn input_schema(&self) -> Result<Schema, SchemaConflictError> {
        Decorator::input_schema(self)
    }

    fn output_schema(&self) -> Result<Schema, SchemaConflictError> {
        Decorator::output_schema(self)
    }

    fn predict(&self, input: &Record) -> ModelResult<Record> {
        Decorator::predict(self, input)
    }

    fn repr(&self) -> String {
        format!("{}({})", self.decorator_name(), self.inner().repr())
    }
}

/// `my_crate::decorators::Foo<Bar>` -> `Foo`
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
