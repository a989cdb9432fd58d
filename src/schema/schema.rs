use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::error::SchemaViolation;
use super::validation::validate_value;

/// Schema kind.
///
/// `Number` carries inclusive bounds so contracts like `confidence in [0, 1]`
/// are enforced at the schema level rather than in flow bodies.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SchemaKind {
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "number")]
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minimum: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maximum: Option<f64>,
    },
    #[serde(rename = "string")]
    String,
    #[serde(rename = "enum")]
    Enum { values: Vec<String> },
    #[serde(rename = "array")]
    Array { items: Box<Schema> },
    #[serde(rename = "object")]
    Object {
        properties: HashMap<String, Schema>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        required: Vec<String>,
        #[serde(default = "Schema::allow_additional")]
        additional: bool,
    },
    #[serde(rename = "union")]
    Union { variants: Vec<Schema> },
    #[serde(rename = "any")]
    Any,
}

/// Schema definition.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: SchemaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Schema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            name: None,
            kind,
            description: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number {
            minimum: None,
            maximum: None,
        })
    }

    /// Number constrained to an inclusive range.
    pub fn number_range(minimum: f64, maximum: f64) -> Self {
        Self::new(SchemaKind::Number {
            minimum: Some(minimum),
            maximum: Some(maximum),
        })
    }

    pub fn string_enum<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(SchemaKind::Enum {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    pub fn array(items: Schema) -> Self {
        Self::new(SchemaKind::Array {
            items: Box::new(items),
        })
    }

    /// Object schema. Unknown extra properties are tolerated; strictness on
    /// known properties comes from their own sub-schemas.
    pub fn object<'a, I>(properties: I, required: &[&str]) -> Self
    where
        I: IntoIterator<Item = (&'a str, Schema)>,
    {
        Self::new(SchemaKind::Object {
            properties: properties
                .into_iter()
                .map(|(key, schema)| (key.to_string(), schema))
                .collect(),
            required: required.iter().map(|key| key.to_string()).collect(),
            additional: true,
        })
    }

    pub fn union<I>(variants: I) -> Self
    where
        I: IntoIterator<Item = Schema>,
    {
        Self::new(SchemaKind::Union {
            variants: variants.into_iter().collect(),
        })
    }

    pub fn validate(&self, value: &Value) -> std::result::Result<(), SchemaViolation> {
        validate_value(self, value, &mut Vec::new())
    }

    fn allow_additional() -> bool {
        true
    }
}
