use super::Decorator;
use crate::core::model::Model;
use crate::core::schema::Record;
use crate::error::{ModelError, ModelResult};
use std::sync::Arc;

/// Side effects run around a prediction.
///
/// All methods default to doing nothing. `model` is the wrapped model, the
/// one whose prediction is being observed.
pub trait PredictHooks: Send + Sync {
    /// Runs immediately before the inner prediction.
    fn before(&self, _model: &dyn Model, _input: &Record) {}

    /// Runs immediately after a successful inner prediction.
    fn after(&self, _model: &dyn Model, _input: &Record, _output: &Record) {}

    /// Runs when the inner prediction fails. The error is returned to the
    /// caller untouched afterwards.
    fn failed(&self, _model: &dyn Model, _input: &Record, _error: &ModelError) {}
}

/// Observes predictions without touching schemas or results.
pub struct InstrumentationDecorator<H> {
    inner: Arc<dyn Model>,
    hooks: H,
}

impl<H: PredictHooks> InstrumentationDecorator<H> {
    pub fn new(inner: Arc<dyn Model>, hooks: H) -> Self {
        Self { inner, hooks }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }
}

impl InstrumentationDecorator<LogHooks> {
    /// Instrument with [`LogHooks`].
    pub fn logged(inner: Arc<dyn Model>) -> Self {
        Self::new(inner, LogHooks)
    }
}

impl<H: PredictHooks> Decorator for InstrumentationDecorator<H> {
    fn inner(&self) -> &dyn Model {
        self.inner.as_ref()
    }

    fn decorator_name(&self) -> &str {
        "InstrumentationDecorator"
    }

    fn predict(&self, input: &Record) -> ModelResult<Record> {
        let model = self.inner.as_ref();
        self.hooks.before(model, input);
        match model.predict(input) {
            Ok(output) => {
                self.hooks.after(model, input, &output);
                Ok(output)
            }
            Err(e) => {
                self.hooks.failed(model, input, &e);
                Err(e)
            }
        }
    }
}

/// Reports predictions through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHooks;

impl PredictHooks for LogHooks {
    fn before(&self, model: &dyn Model, _input: &Record) {
        log::info!("Executing before prediction of {}.", model.qualified_name());
    }

    fn after(&self, model: &dyn Model, _input: &Record, _output: &Record) {
        log::info!("Executing after prediction of {}.", model.qualified_name());
    }

    fn failed(&self, model: &dyn Model, _input: &Record, error: &ModelError) {
        log::warn!("Prediction of {} failed: {}", model.qualified_name(), error);
    }
}

/// Hooks built from two closures.
pub struct FnHooks<B, A> {
    before: B,
    after: A,
}

impl<B, A> FnHooks<B, A>
where
    B: Fn(&Record) + Send + Sync,
    A: Fn(&Record, &Record) + Send + Sync,
{
    pub fn new(before: B, after: A) -> Self {
        Self { before, after }
    }
}

impl<B, A> PredictHooks for FnHooks<B, A>
where
    B: Fn(&Record) + Send + Sync,
    A: Fn(&Record, &Record) + Send + Sync,
{
    fn before(&self, _model: &dyn Model, input: &Record) {
        (self.before)(input)
    }

    fn after(&self, _model: &dyn Model, input: &Record, output: &Record) {
        (self.after)(input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::Schema;
    use crate::error::{PredictionError, SchemaConflictError};
    use serde_json::json;
    use std::sync::Mutex;

    struct Doubler {
        fail: bool,
    }

    impl Model for Doubler {
        fn display_name(&self) -> &str {
            "Doubler"
        }
        fn qualified_name(&self) -> &str {
            "doubler"
        }
        fn description(&self) -> String {
            "Doubles x.".to_string()
        }
        fn version(&self) -> &str {
            "1.0.0"
        }
        fn input_schema(&self) -> Result<Schema, SchemaConflictError> {
            Ok(crate::schema!("In { x: float }"))
        }
        fn output_schema(&self) -> Result<Schema, SchemaConflictError> {
            Ok(crate::schema!("Out { y: float }"))
        }
        fn predict(&self, input: &Record) -> ModelResult<Record> {
            if self.fail {
                return Err(PredictionError::new("doubler", "refused").into());
            }
            let x = input.get_f64("x").unwrap_or_default();
            Ok(Model::output_schema(self)?.validate(&json!({ "y": x * 2.0 }))?)
        }
    }

    #[test]
    fn test_hooks_run_in_order_and_result_is_unchanged() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let (b, a) = (events.clone(), events.clone());
        let hooks = FnHooks::new(
            move |_: &Record| b.lock().unwrap().push("before"),
            move |_: &Record, _: &Record| a.lock().unwrap().push("after"),
        );
        let inner: Arc<dyn Model> = Arc::new(Doubler { fail: false });
        let d = InstrumentationDecorator::new(inner.clone(), hooks);

        let out = d.predict_value(&json!({"x": 2.0})).unwrap();
        let direct = inner.predict_value(&json!({"x": 2.0})).unwrap();
        assert_eq!(out, direct);
        assert_eq!(*events.lock().unwrap(), vec!["before", "after"]);
    }

    #[test]
    fn test_schemas_are_forwarded() {
        let d = InstrumentationDecorator::logged(Arc::new(Doubler { fail: false }));
        assert_eq!(Model::input_schema(&d).unwrap(), crate::schema!("In { x: float }"));
        assert_eq!(Model::description(&d), "Doubles x.");
        assert_eq!(d.repr(), "InstrumentationDecorator(doubler)");
    }

    #[test]
    fn test_failure_skips_after_and_propagates() {
        struct Counting(Mutex<(u32, u32, u32)>);
        impl PredictHooks for Counting {
            fn before(&self, _: &dyn Model, _: &Record) {
                self.0.lock().unwrap().0 += 1;
            }
            fn after(&self, _: &dyn Model, _: &Record, _: &Record) {
                self.0.lock().unwrap().1 += 1;
            }
            fn failed(&self, _: &dyn Model, _: &Record, _: &ModelError) {
                self.0.lock().unwrap().2 += 1;
            }
        }

        let d = InstrumentationDecorator::new(
            Arc::new(Doubler { fail: true }),
            Counting(Mutex::new((0, 0, 0))),
        );
        let err = d.predict_value(&json!({"x": 1.0})).unwrap_err();
        assert!(matches!(err, ModelError::Prediction(ref e) if e.message == "refused"));
        assert_eq!(*d.hooks().0.lock().unwrap(), (1, 0, 1));
    }
}
