use std::fmt;
use thiserror::Error;

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// A required field was not supplied.
    Missing,
    /// A required field was supplied as `null`.
    Null,
    /// The value has the wrong JSON type.
    WrongType { expected: String, found: String },
    /// A numeric bound was not respected.
    OutOfBounds { bound: String, value: f64 },
    /// A string length bound was not respected.
    Length { bound: String, length: usize },
    /// The value is not one of the allowed enumeration members.
    NotAllowed { value: String, allowed: Vec<String> },
    /// The raw input itself was not a JSON object.
    NotAnObject { found: String },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Missing => write!(f, "field required"),
            ViolationKind::Null => write!(f, "field may not be null"),
            ViolationKind::WrongType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ViolationKind::OutOfBounds { bound, value } => {
                write!(f, "value {value} does not satisfy {bound}")
            }
            ViolationKind::Length { bound, length } => {
                write!(f, "length {length} does not satisfy {bound}")
            }
            ViolationKind::NotAllowed { value, allowed } => {
                write!(f, "'{value}' is not one of [{}]", allowed.join(", "))
            }
            ViolationKind::NotAnObject { found } => {
                write!(f, "expected an object, found {found}")
            }
        }
    }
}

/// One failed check, attributed to a field.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Raised when raw data does not conform to a schema.
///
/// Carries every violation found, not only the first.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} validation error(s) for {schema}: {}", .violations.len(), join(.violations))]
pub struct ValidationError {
    pub schema: String,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Field name used for violations of the input as a whole.
    pub const ROOT: &'static str = "__root__";

    /// Names of the fields that failed, in the order they were checked.
    /// Violations of the whole input are not listed.
    pub fn fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for v in &self.violations {
            if v.field != Self::ROOT && !names.contains(&v.field.as_str()) {
                names.push(&v.field);
            }
        }
        names
    }

    /// Whether any violation names `field`.
    pub fn cites(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raised when a schema would end up with two fields of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' already exists in schema '{schema}'")]
pub struct SchemaConflictError {
    pub schema: String,
    pub field: String,
}

/// Raised by a model's own prediction logic.
#[derive(Debug, Error)]
#[error("prediction failed in '{model}': {message}")]
pub struct PredictionError {
    pub model: String,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PredictionError {
    pub fn new(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

/// Everything that can go wrong while resolving schemas or predicting.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    SchemaConflict(#[from] SchemaConflictError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no model registered under '{0}'")]
    NotFound(String),

    #[error("a model is already registered under '{0}'")]
    AlreadyRegistered(String),

    #[error("schema error while describing model: {0}")]
    Schema(#[from] SchemaConflictError),
}
