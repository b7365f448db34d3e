use indexmap::IndexMap;

use super::value::FieldValue;

/// Key set on every record when its panel opens.
pub const SOURCE_TABLE_NAME: &str = "source_table_name";

/// Normalized field name to typed value, for one panel of the dump.
///
/// Keys keep the order they were first seen in. Re-inserting a key replaces
/// the value without moving the key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Opens a record for the panel describing `source_table_name`.
    pub fn new(source_table_name: impl Into<String>) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(
            SOURCE_TABLE_NAME.to_string(),
            FieldValue::Text(source_table_name.into()),
        );
        Self { fields }
    }

    /// Builder-style insert, mostly useful for constructing expectations.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Stores a field, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn source_table_name(&self) -> Option<&str> {
        self.get(SOURCE_TABLE_NAME).and_then(FieldValue::as_text)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
