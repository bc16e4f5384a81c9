use crate::core::FieldValue;
use crate::error::{Violation, ViolationKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic type of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Float,
    Integer,
    String,
    Boolean,
    /// A string restricted to the listed members.
    Enum(Vec<String>),
}

impl FieldType {
    fn accepts(&self, value: &FieldValue) -> bool {
        match self {
            FieldType::Float => value.is_number(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::String | FieldType::Enum(_) => value.is_string(),
            FieldType::Boolean => value.is_boolean(),
        }
    }

    pub(crate) fn json_type(&self) -> &'static str {
        match self {
            FieldType::Float => "number",
            FieldType::Integer => "integer",
            FieldType::String | FieldType::Enum(_) => "string",
            FieldType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Float => write!(f, "float"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::String => write!(f, "string"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Enum(members) => write!(f, "enum({})", members.join("|")),
        }
    }
}

/// A validation rule attached to a field.
///
/// Numeric bounds apply to `Float` and `Integer` fields, length bounds to
/// `String` and `Enum` fields. A rule that does not apply to the field's type
/// is never checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Gt(f64),
    Ge(f64),
    Lt(f64),
    Le(f64),
    MinLength(usize),
    MaxLength(usize),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Gt(b) => write!(f, "> {b}"),
            Constraint::Ge(b) => write!(f, ">= {b}"),
            Constraint::Lt(b) => write!(f, "< {b}"),
            Constraint::Le(b) => write!(f, "<= {b}"),
            Constraint::MinLength(n) => write!(f, "min_length {n}"),
            Constraint::MaxLength(n) => write!(f, "max_length {n}"),
        }
    }
}

impl Constraint {
    fn check(&self, value: &FieldValue) -> Option<ViolationKind> {
        match self {
            Constraint::Gt(_) | Constraint::Ge(_) | Constraint::Lt(_) | Constraint::Le(_) => {
                let x = value.as_f64()?;
                let ok = match *self {
                    Constraint::Gt(b) => x > b,
                    Constraint::Ge(b) => x >= b,
                    Constraint::Lt(b) => x < b,
                    Constraint::Le(b) => x <= b,
                    _ => true,
                };
                (!ok).then(|| ViolationKind::OutOfBounds {
                    bound: self.to_string(),
                    value: x,
                })
            }
            Constraint::MinLength(n) | Constraint::MaxLength(n) => {
                let len = value.as_str()?.chars().count();
                let ok = match self {
                    Constraint::MinLength(_) => len >= *n,
                    _ => len <= *n,
                };
                (!ok).then(|| ViolationKind::Length {
                    bound: self.to_string(),
                    length: len,
                })
            }
        }
    }
}

/// Whether a field must be supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Required,
    /// May be omitted or `null`; either way the default is used.
    Optional { default: FieldValue },
}

/// A named, typed, constrained entry of a [`Schema`](super::Schema).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
    #[serde(default = "required")]
    pub presence: Presence,
}

fn required() -> Presence {
    Presence::Required
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            constraints: Vec::new(),
            presence: Presence::Required,
        }
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Float)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub fn enumeration<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            FieldType::Enum(members.into_iter().map(Into::into).collect()),
        )
    }

    pub fn gt(self, bound: f64) -> Self {
        self.constraint(Constraint::Gt(bound))
    }

    pub fn ge(self, bound: f64) -> Self {
        self.constraint(Constraint::Ge(bound))
    }

    pub fn lt(self, bound: f64) -> Self {
        self.constraint(Constraint::Lt(bound))
    }

    pub fn le(self, bound: f64) -> Self {
        self.constraint(Constraint::Le(bound))
    }

    pub fn min_length(self, n: usize) -> Self {
        self.constraint(Constraint::MinLength(n))
    }

    pub fn max_length(self, n: usize) -> Self {
        self.constraint(Constraint::MaxLength(n))
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Make the field optional, filling in `default` when it is omitted or null.
    ///
    /// A non-null default must satisfy the field's type and constraints;
    /// otherwise omitting the field is reported as a violation.
    pub fn optional(mut self, default: impl Into<FieldValue>) -> Self {
        self.presence = Presence::Optional {
            default: default.into(),
        };
        self
    }

    /// Optional with a `null` default.
    pub fn nullable(self) -> Self {
        self.optional(FieldValue::Null)
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    /// Resolve the value this field takes for a raw input, collecting every
    /// violation into `out`. Returns `None` when the field failed.
    pub(crate) fn resolve(
        &self,
        raw: Option<&FieldValue>,
        out: &mut Vec<Violation>,
    ) -> Option<FieldValue> {
        let value = match (raw, &self.presence) {
            (None | Some(FieldValue::Null), Presence::Optional { default }) => {
                if default.is_null() {
                    return Some(FieldValue::Null);
                }
                // A default is held to the same checks as a supplied value.
                default
            }
            (None, Presence::Required) => {
                out.push(Violation::new(&self.name, ViolationKind::Missing));
                return None;
            }
            (Some(FieldValue::Null), Presence::Required) => {
                out.push(Violation::new(&self.name, ViolationKind::Null));
                return None;
            }
            (Some(value), _) => value,
        };

        if !self.field_type.accepts(value) {
            out.push(Violation::new(
                &self.name,
                ViolationKind::WrongType {
                    expected: self.field_type.to_string(),
                    found: json_kind(value).to_string(),
                },
            ));
            return None;
        }

        let before = out.len();
        if let (FieldType::Enum(members), Some(s)) = (&self.field_type, value.as_str()) {
            if !members.iter().any(|m| m == s) {
                out.push(Violation::new(
                    &self.name,
                    ViolationKind::NotAllowed {
                        value: s.to_string(),
                        allowed: members.clone(),
                    },
                ));
            }
        }
        for constraint in &self.constraints {
            if let Some(kind) = constraint.check(value) {
                out.push(Violation::new(&self.name, kind));
            }
        }

        (out.len() == before).then(|| value.clone())
    }
}

pub(crate) fn json_kind(value: &FieldValue) -> &'static str {
    match value {
        FieldValue::Null => "null",
        FieldValue::Bool(_) => "boolean",
        FieldValue::Number(n) if n.is_f64() => "float",
        FieldValue::Number(_) => "integer",
        FieldValue::String(_) => "string",
        FieldValue::Array(_) => "array",
        FieldValue::Object(_) => "object",
    }
}
