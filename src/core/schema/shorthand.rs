use super::{Field, FieldType, Schema};
use std::str::FromStr;

impl FromStr for Schema {
    type Err = String;

    /// Parses shorthand syntax: `"ModelInput { a: float, tag: string? }"`.
    ///
    /// The `Name { .. }` wrapper is optional (the name defaults to `Schema`).
    /// Types are `float`, `int`, `string`, `bool` and `enum(x|y|z)`; a trailing
    /// `?` makes the field optional with a null default. Constraints cannot be
    /// expressed here, use the builder for those.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, body) = match s.find('{') {
            Some(open) => {
                let body = s[open + 1..]
                    .strip_suffix('}')
                    .ok_or_else(|| "Schema shorthand is missing a closing '}'".to_string())?;
                (s[..open].trim(), body)
            }
            None => ("Schema", s),
        };
        if name.is_empty() {
            return Err("Schema name cannot be empty".to_string());
        }

        let mut fields = Vec::new();
        for entry in body.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (field_name, ty) = entry
                .split_once(':')
                .ok_or_else(|| format!("Field '{entry}' must look like 'name: type'"))?;
            let field_name = field_name.trim();
            if field_name.is_empty() {
                return Err(format!("Field '{entry}' has no name"));
            }
            let ty = ty.trim();
            let (ty, optional) = match ty.strip_suffix('?') {
                Some(rest) => (rest.trim(), true),
                None => (ty, false),
            };
            let field = Field::new(field_name, parse_type(ty)?);
            fields.push(if optional { field.nullable() } else { field });
        }

        Schema::new(name, fields).map_err(|e| e.to_string())
    }
}

fn parse_type(ty: &str) -> Result<FieldType, String> {
    match ty {
        "float" => Ok(FieldType::Float),
        "int" | "integer" => Ok(FieldType::Integer),
        "str" | "string" => Ok(FieldType::String),
        "bool" | "boolean" => Ok(FieldType::Boolean),
        _ => {
            let members = ty
                .strip_prefix("enum(")
                .and_then(|rest| rest.strip_suffix(')'))
                .ok_or_else(|| format!("Unknown field type '{ty}'"))?;
            let members: Vec<String> = members
                .split('|')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect();
            if members.is_empty() {
                return Err("Enum types need at least one member".to_string());
            }
            Ok(FieldType::Enum(members))
        }
    }
}

/// Macro for rapid schema creation: `schema!("ModelOutput { label: string }")`
#[macro_export]
macro_rules! schema {
    ($s:expr) => {
        $s.parse::<$crate::Schema>().expect("Invalid schema shorthand")
    };
}
