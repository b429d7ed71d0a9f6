//! Protocol-agnostic tool record
//!
//! [`CanonicalTool`] is the intermediate representation every conversion
//! passes through: a raw format-specific tool goes in one adapter, becomes
//! a `CanonicalTool`, and comes out another adapter in the target format.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AdapterError, AdapterResult};
use crate::schema::Schema;

/// A tool definition independent of any tool-calling format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTool {
    /// Optional grouping prefix, part of the derived id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Tool identifier, required
    pub name: String,
    /// Version string, informational
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form category label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Schema for tool arguments. Required for a valid tool, but adapters
    /// leave it `None` when the source format carried no schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Schema>,
    /// Schema for tool results, for formats that support one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Schema>,
    /// Execution time hint. Not enforced here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
    /// Name of the adapter that produced this tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_format: Option<String>,
    /// Format-specific fields with no canonical home, stashed by the
    /// producing adapter so its own reverse conversion can restore them.
    /// Each adapter reads and writes only its own keys.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub source_meta: HashMap<String, Value>,
    /// Authorization scopes hint. Not enforced here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_scopes: Vec<String>,
}

impl CanonicalTool {
    /// Create a tool with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the input schema.
    pub fn with_input_schema(mut self, schema: Schema) -> Self {
        self.input_schema = Some(schema);
        self
    }

    /// Set the output schema.
    pub fn with_output_schema(mut self, schema: Schema) -> Self {
        self.output_schema = Some(schema);
        self
    }

    /// Set the timeout hint.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stash a format-specific metadata value.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.source_meta.insert(key.into(), value.into());
        self
    }

    /// Add a required authorization scope.
    pub fn with_required_scope(mut self, scope: impl Into<String>) -> Self {
        self.required_scopes.push(scope.into());
        self
    }

    /// Derived identity: `"namespace:name"` when a namespace is set,
    /// otherwise the bare name.
    pub fn id(&self) -> String {
        match self.namespace.as_deref() {
            Some(namespace) if !namespace.is_empty() => format!("{namespace}:{}", self.name),
            _ => self.name.clone(),
        }
    }

    /// Check the structural requirements: a non-empty name and an input
    /// schema. The schema's content is not inspected.
    pub fn validate(&self) -> AdapterResult<()> {
        if self.name.is_empty() {
            return Err(AdapterError::InvalidTool("name is required".to_string()));
        }
        if self.input_schema.is_none() {
            return Err(AdapterError::InvalidTool(
                "input schema is required".to_string(),
            ));
        }
        Ok(())
    }
}
