//! Anthropic tool format adapter
//!
//! Anthropic tools keep their argument schema under `input_schema` and have
//! no extra metadata beyond name and description. The format accepts
//! combinators but not `$ref`/`$defs`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::adapter::{FormatAdapter, RawTool};
use crate::error::{AdapterError, AdapterResult};
use crate::feature::SchemaFeature;
use crate::schema::Schema;
use crate::tool::CanonicalTool;

/// An Anthropic tool definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnthropicTool {
    /// Tool identifier
    pub name: String,
    /// What the tool does
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for tool input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Map<String, Value>>,
}

impl AnthropicTool {
    /// Create a tool with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Converts between Anthropic tools and the canonical representation
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicAdapter;

impl AnthropicAdapter {
    /// Create a new Anthropic adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FormatAdapter for AnthropicAdapter {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn to_canonical(&self, raw: &RawTool) -> AdapterResult<CanonicalTool> {
        let tool = raw.as_anthropic().ok_or(AdapterError::TypeMismatch {
            adapter: "anthropic",
            expected: "AnthropicTool",
            actual: raw.kind(),
        })?;

        let mut canonical = CanonicalTool::new(&tool.name);
        canonical.description = tool.description.clone();
        canonical.source_format = Some(self.name().to_string());

        if let Some(input) = &tool.input_schema {
            canonical.input_schema = Some(Schema::from_map(input)?);
        }

        Ok(canonical)
    }

    fn from_canonical(&self, tool: &CanonicalTool) -> AdapterResult<RawTool> {
        let mut anthropic_tool = AnthropicTool::new(&tool.name);
        anthropic_tool.description = tool.description.clone();
        anthropic_tool.input_schema = tool.input_schema.as_ref().map(|input| {
            input
                .without_features(&[SchemaFeature::Ref, SchemaFeature::Defs])
                .to_map()
        });

        Ok(RawTool::Anthropic(anthropic_tool))
    }

    fn supports_feature(&self, feature: SchemaFeature) -> bool {
        !matches!(feature, SchemaFeature::Ref | SchemaFeature::Defs)
    }
}
