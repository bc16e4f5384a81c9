use crate::core::FieldValue;
use serde::Serialize;
use serde_json::Map;

/// A validated instance of a [`Schema`](super::Schema).
///
/// Records are only produced by [`Schema::validate`](super::Schema::validate),
/// so holding one means every field of that schema was present and valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: Map<String, FieldValue>,
}

impl Record {
    pub(crate) fn from_map(values: Map<String, FieldValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_f64)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_i64)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_str)
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_bool)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }

    pub fn as_map(&self) -> &Map<String, FieldValue> {
        &self.values
    }

    pub fn into_map(self) -> Map<String, FieldValue> {
        self.values
    }

    pub fn to_value(&self) -> FieldValue {
        FieldValue::Object(self.values.clone())
    }

    pub fn into_value(self) -> FieldValue {
        FieldValue::Object(self.values)
    }
}

impl From<Record> for FieldValue {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}
