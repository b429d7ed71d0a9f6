//! Canonical JSON Schema model
//!
//! [`Schema`] is the superset representation every format converts through.
//! It keeps one node of a JSON-Schema-like tree in fully owned form: nested
//! schemas under properties, items, `$defs`, and the combinators belong
//! exclusively to their parent, so `Clone` always yields an independent tree
//! with no shared mutable substructure.
//!
//! Two projections connect the model to the generic map form the wire
//! formats use: [`Schema::to_map`] emits only populated fields under their
//! JSON Schema keyword names, and [`Schema::from_value`] parses such a map
//! back, ignoring unknown keywords.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AdapterError, AdapterResult};
use crate::feature::SchemaFeature;

/// One node of a canonical JSON Schema tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The schema type tag ("object", "string", "integer", ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Property definitions for object schemas
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, Schema>,
    /// Required property names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Element schema for array types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Allowed values
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    /// Fixed value
    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,
    /// Default value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Inclusive numeric lower bound. `None` means unset; zero is a legal bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive numeric upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Minimum string length
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum string length
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Regular expression constraint for strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Format annotation ("date-time", "uri", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// JSON pointer reference, stored verbatim and never resolved
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Local definitions referenced via `$ref`
    #[serde(rename = "$defs", default, skip_serializing_if = "HashMap::is_empty")]
    pub defs: HashMap<String, Schema>,
    /// Whether properties beyond `properties` are allowed.
    /// `None` = unspecified, `Some(false)` = explicitly forbidden.
    #[serde(rename = "additionalProperties", skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    /// `anyOf` combinator branches
    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Schema>,
    /// `oneOf` combinator branches
    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,
    /// `allOf` combinator branches
    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,
    /// `not` combinator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<Schema>>,
}

impl Schema {
    /// Create a schema with the given type tag.
    pub fn new(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Self::default()
        }
    }

    /// Create an object schema.
    pub fn object() -> Self {
        Self::new("object")
    }

    /// Create a string schema.
    pub fn string() -> Self {
        Self::new("string")
    }

    /// Create an integer schema.
    pub fn integer() -> Self {
        Self::new("integer")
    }

    /// Create a number schema.
    pub fn number() -> Self {
        Self::new("number")
    }

    /// Create a boolean schema.
    pub fn boolean() -> Self {
        Self::new("boolean")
    }

    /// Create an array schema with the given element schema.
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new("array")
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a property schema.
    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark a property name as required.
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Set the pattern constraint.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the format annotation.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the allowed value set.
    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = values;
        self
    }

    /// Set a verbatim `$ref` target.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Add a `$defs` entry.
    pub fn with_def(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.defs.insert(name.into(), schema);
        self
    }

    /// Set the `additionalProperties` flag.
    pub fn with_additional_properties(mut self, allowed: bool) -> Self {
        self.additional_properties = Some(allowed);
        self
    }

    /// Set the numeric bounds.
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    /// Set the string length bounds.
    pub fn with_length(mut self, min_length: u64, max_length: u64) -> Self {
        self.min_length = Some(min_length);
        self.max_length = Some(max_length);
        self
    }

    /// Project this schema into a generic map keyed by JSON Schema keyword
    /// names. Only populated fields are emitted; absent and empty fields are
    /// omitted rather than written as null or empty containers.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();

        if let Some(schema_type) = &self.schema_type {
            map.insert("type".to_string(), Value::from(schema_type.clone()));
        }
        if let Some(description) = &self.description {
            map.insert("description".to_string(), Value::from(description.clone()));
        }
        if !self.properties.is_empty() {
            let props: Map<String, Value> = self
                .properties
                .iter()
                .map(|(name, schema)| (name.clone(), Value::Object(schema.to_map())))
                .collect();
            map.insert("properties".to_string(), Value::Object(props));
        }
        if !self.required.is_empty() {
            map.insert("required".to_string(), Value::from(self.required.clone()));
        }
        if let Some(items) = &self.items {
            map.insert("items".to_string(), Value::Object(items.to_map()));
        }
        if !self.enum_values.is_empty() {
            map.insert("enum".to_string(), Value::Array(self.enum_values.clone()));
        }
        if let Some(const_value) = &self.const_value {
            map.insert("const".to_string(), const_value.clone());
        }
        if let Some(default) = &self.default {
            map.insert("default".to_string(), default.clone());
        }
        if let Some(minimum) = self.minimum {
            map.insert("minimum".to_string(), Value::from(minimum));
        }
        if let Some(maximum) = self.maximum {
            map.insert("maximum".to_string(), Value::from(maximum));
        }
        if let Some(min_length) = self.min_length {
            map.insert("minLength".to_string(), Value::from(min_length));
        }
        if let Some(max_length) = self.max_length {
            map.insert("maxLength".to_string(), Value::from(max_length));
        }
        if let Some(pattern) = &self.pattern {
            map.insert("pattern".to_string(), Value::from(pattern.clone()));
        }
        if let Some(format) = &self.format {
            map.insert("format".to_string(), Value::from(format.clone()));
        }
        if let Some(reference) = &self.reference {
            map.insert("$ref".to_string(), Value::from(reference.clone()));
        }
        if !self.defs.is_empty() {
            let defs: Map<String, Value> = self
                .defs
                .iter()
                .map(|(name, schema)| (name.clone(), Value::Object(schema.to_map())))
                .collect();
            map.insert("$defs".to_string(), Value::Object(defs));
        }
        if let Some(additional) = self.additional_properties {
            map.insert("additionalProperties".to_string(), Value::from(additional));
        }
        if !self.any_of.is_empty() {
            map.insert("anyOf".to_string(), schemas_to_value(&self.any_of));
        }
        if !self.one_of.is_empty() {
            map.insert("oneOf".to_string(), schemas_to_value(&self.one_of));
        }
        if !self.all_of.is_empty() {
            map.insert("allOf".to_string(), schemas_to_value(&self.all_of));
        }
        if let Some(not) = &self.not {
            map.insert("not".to_string(), Value::Object(not.to_map()));
        }

        map
    }

    /// Parse a generic JSON value as a schema node.
    ///
    /// The value must be a JSON object. Recognized keywords are extracted
    /// when they carry a plausible type; numeric keywords accept integer or
    /// floating representations. Unknown keywords are ignored. A malformed
    /// nested schema (a non-object under `items`, `not`, a property, a
    /// definition, or a combinator element) aborts the whole parse.
    pub fn from_value(value: &Value) -> AdapterResult<Schema> {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Err(AdapterError::MalformedSchema(format!(
                "expected a JSON object, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Parse a generic string-keyed map as a schema node. See [`Schema::from_value`].
    pub fn from_map(map: &Map<String, Value>) -> AdapterResult<Schema> {
        let mut schema = Schema::default();

        if let Some(v) = map.get("type").and_then(Value::as_str) {
            schema.schema_type = Some(v.to_string());
        }
        if let Some(v) = map.get("description").and_then(Value::as_str) {
            schema.description = Some(v.to_string());
        }
        if let Some(v) = map.get("pattern").and_then(Value::as_str) {
            schema.pattern = Some(v.to_string());
        }
        if let Some(v) = map.get("format").and_then(Value::as_str) {
            schema.format = Some(v.to_string());
        }
        if let Some(v) = map.get("$ref").and_then(Value::as_str) {
            schema.reference = Some(v.to_string());
        }
        if let Some(v) = map.get("minimum").and_then(Value::as_f64) {
            schema.minimum = Some(v);
        }
        if let Some(v) = map.get("maximum").and_then(Value::as_f64) {
            schema.maximum = Some(v);
        }
        if let Some(v) = map.get("minLength").and_then(as_length) {
            schema.min_length = Some(v);
        }
        if let Some(v) = map.get("maxLength").and_then(as_length) {
            schema.max_length = Some(v);
        }
        if let Some(v) = map.get("const") {
            schema.const_value = Some(v.clone());
        }
        if let Some(v) = map.get("default") {
            schema.default = Some(v.clone());
        }
        if let Some(v) = map.get("additionalProperties").and_then(Value::as_bool) {
            schema.additional_properties = Some(v);
        }
        if let Some(Value::Array(values)) = map.get("enum") {
            schema.enum_values = values.clone();
        }
        if let Some(Value::Array(values)) = map.get("required") {
            // Non-string entries are dropped rather than rejected
            schema.required = values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
        if let Some(Value::Object(props)) = map.get("properties") {
            for (name, prop) in props {
                schema
                    .properties
                    .insert(name.clone(), Schema::from_value(prop)?);
            }
        }
        if let Some(v) = map.get("items") {
            schema.items = Some(Box::new(Schema::from_value(v)?));
        }
        if let Some(Value::Object(defs)) = map.get("$defs") {
            for (name, def) in defs {
                schema.defs.insert(name.clone(), Schema::from_value(def)?);
            }
        }
        if let Some(Value::Array(branches)) = map.get("anyOf") {
            schema.any_of = schemas_from_values(branches)?;
        }
        if let Some(Value::Array(branches)) = map.get("oneOf") {
            schema.one_of = schemas_from_values(branches)?;
        }
        if let Some(Value::Array(branches)) = map.get("allOf") {
            schema.all_of = schemas_from_values(branches)?;
        }
        if let Some(v) = map.get("not") {
            schema.not = Some(Box::new(Schema::from_value(v)?));
        }

        Ok(schema)
    }

    /// Whether this schema tree exercises the given feature anywhere,
    /// including nested properties, items, definitions, and combinators.
    pub fn uses_feature(&self, feature: SchemaFeature) -> bool {
        if self.uses_feature_here(feature) {
            return true;
        }
        self.children().any(|child| child.uses_feature(feature))
    }

    fn uses_feature_here(&self, feature: SchemaFeature) -> bool {
        match feature {
            SchemaFeature::Ref => self.reference.is_some(),
            SchemaFeature::Defs => !self.defs.is_empty(),
            SchemaFeature::AnyOf => !self.any_of.is_empty(),
            SchemaFeature::OneOf => !self.one_of.is_empty(),
            SchemaFeature::AllOf => !self.all_of.is_empty(),
            SchemaFeature::Not => self.not.is_some(),
            SchemaFeature::Pattern => self.pattern.is_some(),
            SchemaFeature::Format => self.format.is_some(),
            SchemaFeature::AdditionalProperties => self.additional_properties.is_some(),
            SchemaFeature::Minimum => self.minimum.is_some(),
            SchemaFeature::Maximum => self.maximum.is_some(),
            SchemaFeature::MinLength => self.min_length.is_some(),
            SchemaFeature::MaxLength => self.max_length.is_some(),
            SchemaFeature::Enum => !self.enum_values.is_empty(),
            SchemaFeature::Const => self.const_value.is_some(),
            SchemaFeature::Default => self.default.is_some(),
        }
    }

    /// Copy of this tree with the given capabilities removed, recursively.
    /// Restricted adapters use this so their projections never carry
    /// constructs the format cannot express.
    pub fn without_features(&self, features: &[SchemaFeature]) -> Schema {
        let mut schema = self.clone();
        schema.strip_features(features);
        schema
    }

    fn strip_features(&mut self, features: &[SchemaFeature]) {
        for &feature in features {
            match feature {
                SchemaFeature::Ref => self.reference = None,
                SchemaFeature::Defs => self.defs.clear(),
                SchemaFeature::AnyOf => self.any_of.clear(),
                SchemaFeature::OneOf => self.one_of.clear(),
                SchemaFeature::AllOf => self.all_of.clear(),
                SchemaFeature::Not => self.not = None,
                SchemaFeature::Pattern => self.pattern = None,
                SchemaFeature::Format => self.format = None,
                SchemaFeature::AdditionalProperties => self.additional_properties = None,
                SchemaFeature::Minimum => self.minimum = None,
                SchemaFeature::Maximum => self.maximum = None,
                SchemaFeature::MinLength => self.min_length = None,
                SchemaFeature::MaxLength => self.max_length = None,
                SchemaFeature::Enum => self.enum_values.clear(),
                SchemaFeature::Const => self.const_value = None,
                SchemaFeature::Default => self.default = None,
            }
        }
        for child in self.children_mut() {
            child.strip_features(features);
        }
    }

    /// Every directly nested schema node.
    fn children(&self) -> impl Iterator<Item = &Schema> {
        self.properties
            .values()
            .chain(self.defs.values())
            .chain(self.any_of.iter())
            .chain(self.one_of.iter())
            .chain(self.all_of.iter())
            .chain(self.items.as_deref())
            .chain(self.not.as_deref())
    }

    fn children_mut(&mut self) -> impl Iterator<Item = &mut Schema> {
        self.properties
            .values_mut()
            .chain(self.defs.values_mut())
            .chain(self.any_of.iter_mut())
            .chain(self.one_of.iter_mut())
            .chain(self.all_of.iter_mut())
            .chain(self.items.as_deref_mut())
            .chain(self.not.as_deref_mut())
    }
}

fn schemas_to_value(schemas: &[Schema]) -> Value {
    Value::Array(
        schemas
            .iter()
            .map(|schema| Value::Object(schema.to_map()))
            .collect(),
    )
}

fn schemas_from_values(values: &[Value]) -> AdapterResult<Vec<Schema>> {
    values.iter().map(Schema::from_value).collect()
}

// Lengths may arrive as integer or floating JSON numbers
fn as_length(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
