use super::{Field, Schema};
use crate::error::SchemaConflictError;

/// Produce a new schema holding every field of `base` followed by `new_fields`.
///
/// `base` is left untouched and keeps its name. A new field whose name is
/// already taken, by `base` or by an earlier new field, is a conflict.
pub fn extend<I>(base: &Schema, new_fields: I) -> Result<Schema, SchemaConflictError>
where
    I: IntoIterator<Item = Field>,
{
    let mut fields = base.fields().to_vec();
    for field in new_fields {
        if fields.iter().any(|f| f.name == field.name) {
            return Err(SchemaConflictError {
                schema: base.name().to_string(),
                field: field.name,
            });
        }
        fields.push(field);
    }
    Schema::new(base.name(), fields)
}

impl Schema {
    /// Method form of [`extend`].
    pub fn extended<I>(&self, new_fields: I) -> Result<Schema, SchemaConflictError>
    where
        I: IntoIterator<Item = Field>,
    {
        extend(self, new_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Schema {
        Schema::builder("ModelInput")
            .field(Field::float("a").gt(0.0).lt(10.0))
            .build()
            .unwrap()
    }

    #[test]
    fn test_extend_keeps_base_intact() {
        let base = base();
        let extended = extend(&base, [Field::string("prediction_id").nullable()]).unwrap();
        assert_eq!(base.fields().len(), 1);
        assert_eq!(extended.fields().len(), 2);
        assert_eq!(extended.name(), "ModelInput");
        assert_eq!(extended.fields()[0], base.fields()[0]);
    }

    #[test]
    fn test_extend_conflict() {
        let err = extend(&base(), [Field::string("a")]).unwrap_err();
        assert_eq!(err.field, "a");

        let err = extend(&base(), [Field::string("b"), Field::float("b")]).unwrap_err();
        assert_eq!(err.field, "b");
    }

    #[test]
    fn test_extended_accepts_iff_both_accept() {
        let extended = extend(&base(), [Field::integer("n").ge(1.0)]).unwrap();

        assert!(extended.validate(&json!({"a": 1.0, "n": 3})).is_ok());

        let err = extended.validate(&json!({"a": 11.0, "n": 3})).unwrap_err();
        assert_eq!(err.fields(), vec!["a"]);

        let err = extended.validate(&json!({"a": 1.0, "n": 0})).unwrap_err();
        assert_eq!(err.fields(), vec!["n"]);

        let err = extended.validate(&json!({"a": 0.0})).unwrap_err();
        assert_eq!(err.fields(), vec!["a", "n"]);
    }

    #[test]
    fn test_extended_record_is_superset() {
        let base = base();
        let extended = extend(&base, [Field::string("tag").optional("x")]).unwrap();
        let raw = json!({"a": 2.5});
        let small = base.validate(&raw).unwrap();
        let big = extended.validate(&raw).unwrap();
        for (k, v) in small.iter() {
            assert_eq!(big.get(k), Some(v));
        }
        assert_eq!(big.get_str("tag"), Some("x"));
        assert!(extended.conforms(&big));
        assert!(base.conforms(&big));
    }
}
