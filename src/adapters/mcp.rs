//! MCP format adapter
//!
//! MCP tool schemas are full JSON Schema, so this adapter supports every
//! feature and acts as the reference format: converting through it never
//! loses schema information.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::adapter::{FormatAdapter, RawTool};
use crate::error::{AdapterError, AdapterResult};
use crate::feature::SchemaFeature;
use crate::schema::Schema;
use crate::tool::CanonicalTool;

/// `source_meta` key for the MCP display title
const META_TITLE: &str = "title";

/// An MCP tool definition as it appears in `tools/list` results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpTool {
    /// Programmatic identifier
    pub name: String,
    /// Human-readable display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// What the tool does
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for tool arguments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Map<String, Value>>,
    /// JSON Schema for tool results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Map<String, Value>>,
}

impl McpTool {
    /// Create a tool with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Converts between MCP tools and the canonical representation
#[derive(Debug, Clone, Copy, Default)]
pub struct McpAdapter;

impl McpAdapter {
    /// Create a new MCP adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FormatAdapter for McpAdapter {
    fn name(&self) -> &'static str {
        "mcp"
    }

    fn to_canonical(&self, raw: &RawTool) -> AdapterResult<CanonicalTool> {
        let tool = raw.as_mcp().ok_or(AdapterError::TypeMismatch {
            adapter: "mcp",
            expected: "McpTool",
            actual: raw.kind(),
        })?;

        let mut canonical = CanonicalTool::new(&tool.name);
        canonical.description = tool.description.clone();
        canonical.source_format = Some(self.name().to_string());

        if let Some(title) = &tool.title {
            if !title.is_empty() {
                canonical
                    .source_meta
                    .insert(META_TITLE.to_string(), Value::from(title.clone()));
            }
        }

        if let Some(input) = &tool.input_schema {
            canonical.input_schema = Some(Schema::from_map(input)?);
        }
        if let Some(output) = &tool.output_schema {
            canonical.output_schema = Some(Schema::from_map(output)?);
        }

        Ok(canonical)
    }

    fn from_canonical(&self, tool: &CanonicalTool) -> AdapterResult<RawTool> {
        let mut mcp_tool = McpTool::new(&tool.name);
        mcp_tool.description = tool.description.clone();
        mcp_tool.title = tool
            .source_meta
            .get(META_TITLE)
            .and_then(Value::as_str)
            .map(str::to_string);
        mcp_tool.input_schema = tool.input_schema.as_ref().map(Schema::to_map);
        mcp_tool.output_schema = tool.output_schema.as_ref().map(Schema::to_map);

        Ok(RawTool::Mcp(mcp_tool))
    }

    fn supports_feature(&self, _feature: SchemaFeature) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn name_is_mcp() {
        assert_eq!(McpAdapter::new().name(), "mcp");
    }

    #[test]
    fn to_canonical_basic() {
        let tool = McpTool {
            name: "test-tool".to_string(),
            description: Some("A test tool".to_string()),
            input_schema: Some(object_map(json!({
                "type": "object",
                "properties": {"name": {"type": "string", "description": "The name"}},
                "required": ["name"],
            }))),
            ..McpTool::default()
        };

        let canonical = McpAdapter::new().to_canonical(&tool.into()).unwrap();
        assert_eq!(canonical.name, "test-tool");
        assert_eq!(canonical.description.as_deref(), Some("A test tool"));
        assert_eq!(canonical.source_format.as_deref(), Some("mcp"));

        let input = canonical.input_schema.unwrap();
        assert_eq!(input.schema_type.as_deref(), Some("object"));
        assert_eq!(input.properties.len(), 1);
    }

    #[test]
    fn to_canonical_rejects_foreign_variant() {
        let function = crate::adapters::OpenAiFunction {
            name: "not-mcp".to_string(),
            ..Default::default()
        };

        let err = McpAdapter::new()
            .to_canonical(&RawTool::OpenAi(function))
            .unwrap_err();
        assert!(matches!(err, AdapterError::TypeMismatch { adapter: "mcp", .. }));
    }

    #[test]
    fn title_round_trips_through_source_meta() {
        let tool = McpTool {
            name: "tool-name".to_string(),
            title: Some("Tool Title".to_string()),
            input_schema: Some(object_map(json!({"type": "object"}))),
            ..McpTool::default()
        };

        let adapter = McpAdapter::new();
        let canonical = adapter.to_canonical(&tool.into()).unwrap();
        assert_eq!(canonical.source_meta[META_TITLE], json!("Tool Title"));

        let raw = adapter.from_canonical(&canonical).unwrap();
        let back = raw.as_mcp().unwrap();
        assert_eq!(back.title.as_deref(), Some("Tool Title"));
    }

    #[test]
    fn missing_schema_stays_missing() {
        let tool = McpTool::new("schemaless");
        let canonical = McpAdapter::new().to_canonical(&tool.into()).unwrap();
        assert!(canonical.input_schema.is_none());
        assert!(canonical.output_schema.is_none());
    }

    #[test]
    fn output_schema_is_converted() {
        let tool = McpTool {
            name: "output-tool".to_string(),
            input_schema: Some(object_map(json!({"type": "object"}))),
            output_schema: Some(object_map(json!({"type": "string"}))),
            ..McpTool::default()
        };

        let adapter = McpAdapter::new();
        let canonical = adapter.to_canonical(&tool.into()).unwrap();
        let output = canonical.output_schema.as_ref().unwrap();
        assert_eq!(output.schema_type.as_deref(), Some("string"));

        let raw = adapter.from_canonical(&canonical).unwrap();
        let back = raw.as_mcp().unwrap();
        assert_eq!(back.output_schema.as_ref().unwrap()["type"], json!("string"));
    }

    #[test]
    fn round_trip_preserves_constraints() {
        let original = McpTool {
            name: "round-trip".to_string(),
            title: Some("Round Trip Tool".to_string()),
            description: Some("A tool for round-trip testing".to_string()),
            input_schema: Some(object_map(json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string", "minLength": 1, "maxLength": 100},
                    "count": {"type": "integer", "minimum": 0, "maximum": 10},
                },
                "required": ["input"],
            }))),
            ..McpTool::default()
        };

        let adapter = McpAdapter::new();
        let canonical = adapter.to_canonical(&original.clone().into()).unwrap();
        let raw = adapter.from_canonical(&canonical).unwrap();
        let back = raw.as_mcp().unwrap();

        assert_eq!(back.name, original.name);
        assert_eq!(back.title, original.title);
        assert_eq!(back.description, original.description);

        let schema = back.input_schema.as_ref().unwrap();
        assert_eq!(schema["type"], json!("object"));
        assert_eq!(schema["properties"]["input"]["minLength"], json!(1));
        assert_eq!(schema["properties"]["count"]["minimum"], json!(0.0));
    }

    #[test]
    fn supports_every_feature() {
        let adapter = McpAdapter::new();
        for feature in SchemaFeature::all() {
            assert!(adapter.supports_feature(feature), "{feature} unsupported");
        }
    }

    #[test]
    fn malformed_nested_schema_fails() {
        let tool = McpTool {
            name: "broken".to_string(),
            input_schema: Some(object_map(json!({
                "type": "object",
                "properties": {"bad": "not a schema"},
            }))),
            ..McpTool::default()
        };

        let err = McpAdapter::new().to_canonical(&tool.into()).unwrap_err();
        assert!(matches!(err, AdapterError::MalformedSchema(_)));
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let tool = McpTool {
            name: "serialized".to_string(),
            input_schema: Some(object_map(json!({"type": "object"}))),
            output_schema: Some(object_map(json!({"type": "string"}))),
            ..McpTool::default()
        };

        let json = serde_json::to_value(&tool).unwrap();
        assert!(json.get("inputSchema").is_some());
        assert!(json.get("outputSchema").is_some());
        assert!(json.get("input_schema").is_none());
    }
}
