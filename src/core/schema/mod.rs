//! Schema descriptors: the input and output contracts of a model.
//!
//! A [`Schema`] is an immutable, ordered list of uniquely named [`Field`]s.
//! It validates raw JSON into a [`Record`], reporting every violation at once,
//! and can be grown into a new schema with [`extend`].

pub mod extend;
pub mod field;
pub mod record;
pub mod shorthand;

pub use extend::extend;
pub use field::{Constraint, Field, FieldType, Presence};
pub use record::Record;

use crate::core::FieldValue;
use crate::error::{SchemaConflictError, ValidationError, Violation, ViolationKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, json};

/// An immutable description of a set of named, typed, constrained fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDef")]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

/// Unchecked wire form, so deserialization goes through the same
/// uniqueness check as the builder.
#[derive(Deserialize)]
struct SchemaDef {
    name: String,
    fields: Vec<Field>,
}

impl TryFrom<SchemaDef> for Schema {
    type Error = SchemaConflictError;

    fn try_from(def: SchemaDef) -> Result<Self, Self::Error> {
        Schema::new(def.name, def.fields)
    }
}

impl Schema {
    /// Build a schema, rejecting duplicate field names.
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Result<Self, SchemaConflictError> {
        let name = name.into();
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaConflictError {
                    schema: name,
                    field: field.name.clone(),
                });
            }
        }
        Ok(Self { name, fields })
    }

    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Validate raw data and construct a conforming [`Record`].
    ///
    /// Keys that are not fields of this schema are dropped. On failure the
    /// error lists every violated field, in field order.
    pub fn validate(&self, raw: &FieldValue) -> Result<Record, ValidationError> {
        let Some(object) = raw.as_object() else {
            return Err(ValidationError {
                schema: self.name.clone(),
                violations: vec![Violation::new(
                    ValidationError::ROOT,
                    ViolationKind::NotAnObject {
                        found: field::json_kind(raw).to_string(),
                    },
                )],
            });
        };

        let mut violations = Vec::new();
        let mut values = Map::new();
        for field in &self.fields {
            if let Some(value) = field.resolve(object.get(&field.name), &mut violations) {
                values.insert(field.name.clone(), value);
            }
        }

        if !violations.is_empty() {
            return Err(ValidationError {
                schema: self.name.clone(),
                violations,
            });
        }

        let dropped: Vec<&str> = object
            .keys()
            .filter(|k| !self.contains(k))
            .map(String::as_str)
            .collect();
        if !dropped.is_empty() {
            log::debug!("{}: ignoring unknown fields {:?}", self.name, dropped);
        }

        Ok(Record::from_map(values))
    }

    /// Whether an existing record satisfies this schema.
    pub fn conforms(&self, record: &Record) -> bool {
        self.validate(&record.to_value()).is_ok()
    }

    /// Render the schema as a JSON Schema object.
    pub fn to_json_schema(&self) -> FieldValue {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut prop = Map::new();
            prop.insert("title".into(), json!(title_case(&field.name)));
            prop.insert("type".into(), json!(field.field_type.json_type()));
            if let FieldType::Enum(members) = &field.field_type {
                prop.insert("enum".into(), json!(members));
            }
            for constraint in &field.constraints {
                let (key, value) = match constraint {
                    Constraint::Gt(b) => ("exclusiveMinimum", json!(b)),
                    Constraint::Ge(b) => ("minimum", json!(b)),
                    Constraint::Lt(b) => ("exclusiveMaximum", json!(b)),
                    Constraint::Le(b) => ("maximum", json!(b)),
                    Constraint::MinLength(n) => ("minLength", json!(n)),
                    Constraint::MaxLength(n) => ("maxLength", json!(n)),
                };
                prop.insert(key.into(), value);
            }
            match &field.presence {
                Presence::Required => required.push(field.name.clone()),
                Presence::Optional { default } => {
                    prop.insert("default".into(), default.clone());
                }
            }
            properties.insert(field.name.clone(), FieldValue::Object(prop));
        }

        json!({
            "title": self.name,
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Chained builder for [`Schema`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<Schema, SchemaConflictError> {
        Schema::new(self.name, self.fields)
    }
}
