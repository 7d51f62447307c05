//! Display schema describing the top-level fields of a form.
//!
//! A schema is an ordered mapping from field key to [`FieldSchema`]. Order
//! follows declaration order in the source document, which is the order the
//! encoder reports fields in.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Schema::is_empty")]
    pub properties: Schema,
}

impl FieldSchema {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            label: None,
            properties: Schema::default(),
        }
    }

    pub fn object(properties: Schema) -> Self {
        Self {
            properties,
            ..Self::new(FieldType::Object)
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Ordered field declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<(String, FieldSchema)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, replacing an existing declaration with the same key in place.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, field: FieldSchema) -> Self {
        self.insert(key, field);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, field: FieldSchema) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = field,
            None => self.fields.push((key, field)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.fields.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a schema document and check that only `object` fields declare
    /// nested `properties`.
    pub fn from_json(input: &str) -> Result<Self> {
        let schema: Schema = serde_json::from_str(input)?;
        schema.check("")?;
        Ok(schema)
    }

    fn check(&self, prefix: &str) -> Result<()> {
        for (key, field) in self.iter() {
            let path = if prefix.is_empty() {
                key.to_string()
            } else {
                format!("{prefix}.{key}")
            };
            if field.field_type != FieldType::Object && !field.properties.is_empty() {
                return Err(ModelError::InvalidSchema {
                    field: path,
                    message: "only object fields may declare properties".to_string(),
                });
            }
            field.properties.check(&path)?;
        }
        Ok(())
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, field) in &self.fields {
            map.serialize_entry(key, field)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = Schema;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field keys to field schemas")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Schema, A::Error> {
                let mut schema = Schema::new();
                while let Some((key, field)) = access.next_entry::<String, FieldSchema>()? {
                    schema.insert(key, field);
                }
                Ok(schema)
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}
