//! OpenAI function format adapter
//!
//! OpenAI functions carry their argument schema under `parameters` and have
//! an optional strict mode. Strict mode is preserved across conversions via
//! `source_meta`, and when active it forces `additionalProperties: false`
//! at the root of the projected schema, whatever the canonical tool said.
//!
//! The format has no `$ref`/`$defs` and no combinators, so conversions into
//! it drop those constructs (the registry reports the loss as warnings).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::adapter::{FormatAdapter, RawTool};
use crate::error::{AdapterError, AdapterResult};
use crate::feature::SchemaFeature;
use crate::schema::Schema;
use crate::tool::CanonicalTool;

/// `source_meta` key for the strict-mode flag
const META_STRICT: &str = "strict";

/// An OpenAI function/tool definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAiFunction {
    /// Function identifier
    pub name: String,
    /// What the function does
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for function arguments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    /// Strict mode: the schema is enforced exactly, with
    /// `additionalProperties: false` required at the root
    #[serde(default, skip_serializing_if = "is_false")]
    pub strict: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl OpenAiFunction {
    /// Create a function with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Converts between OpenAI functions and the canonical representation
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiAdapter;

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FormatAdapter for OpenAiAdapter {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn to_canonical(&self, raw: &RawTool) -> AdapterResult<CanonicalTool> {
        let function = raw.as_openai().ok_or(AdapterError::TypeMismatch {
            adapter: "openai",
            expected: "OpenAiFunction",
            actual: raw.kind(),
        })?;

        let mut canonical = CanonicalTool::new(&function.name);
        canonical.description = function.description.clone();
        canonical.source_format = Some(self.name().to_string());

        // Only a set flag is recorded; absence means non-strict
        if function.strict {
            canonical
                .source_meta
                .insert(META_STRICT.to_string(), Value::Bool(true));
        }

        if let Some(parameters) = &function.parameters {
            canonical.input_schema = Some(Schema::from_map(parameters)?);
        }

        Ok(canonical)
    }

    fn from_canonical(&self, tool: &CanonicalTool) -> AdapterResult<RawTool> {
        let mut function = OpenAiFunction::new(&tool.name);
        function.description = tool.description.clone();
        function.strict = tool
            .source_meta
            .get(META_STRICT)
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if let Some(input) = &tool.input_schema {
            let unsupported: Vec<SchemaFeature> = SchemaFeature::all()
                .filter(|&feature| !self.supports_feature(feature))
                .collect();
            let mut parameters = input.without_features(&unsupported).to_map();
            // Strict mode always wins at the root
            if function.strict {
                parameters.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            function.parameters = Some(parameters);
        }

        Ok(RawTool::OpenAi(function))
    }

    fn supports_feature(&self, feature: SchemaFeature) -> bool {
        !matches!(
            feature,
            SchemaFeature::Ref
                | SchemaFeature::Defs
                | SchemaFeature::AnyOf
                | SchemaFeature::OneOf
                | SchemaFeature::AllOf
                | SchemaFeature::Not
        )
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
    fn name_is_openai() {
        assert_eq!(OpenAiAdapter::new().name(), "openai");
    }

    #[test]
    fn to_canonical_basic() {
        let function = OpenAiFunction {
            name: "get_weather".to_string(),
            description: Some("Get the weather".to_string()),
            parameters: Some(object_map(json!({
                "type": "object",
                "properties": {"location": {"type": "string"}},
                "required": ["location"],
            }))),
            strict: false,
        };

        let canonical = OpenAiAdapter::new().to_canonical(&function.into()).unwrap();
        assert_eq!(canonical.name, "get_weather");
        assert_eq!(canonical.source_format.as_deref(), Some("openai"));
        assert!(!canonical.source_meta.contains_key(META_STRICT));

        let input = canonical.input_schema.unwrap();
        assert_eq!(input.required, vec!["location"]);
    }

    #[test]
    fn to_canonical_rejects_foreign_variant() {
        let tool = crate::adapters::McpTool::new("not-openai");
        let err = OpenAiAdapter::new()
            .to_canonical(&RawTool::Mcp(tool))
            .unwrap_err();
        assert!(matches!(
            err,
            AdapterError::TypeMismatch { adapter: "openai", actual: "McpTool", .. }
        ));
    }

    #[test]
    fn strict_flag_round_trips_through_source_meta() {
        let function = OpenAiFunction {
            name: "strict_function".to_string(),
            parameters: Some(object_map(json!({"type": "object"}))),
            strict: true,
            ..OpenAiFunction::default()
        };

        let adapter = OpenAiAdapter::new();
        let canonical = adapter.to_canonical(&function.into()).unwrap();
        assert_eq!(canonical.source_meta[META_STRICT], json!(true));

        let raw = adapter.from_canonical(&canonical).unwrap();
        assert!(raw.as_openai().unwrap().strict);
    }

    #[test]
    fn strict_mode_forces_additional_properties_at_root() {
        let tool = CanonicalTool::new("strict_function")
            .with_input_schema(Schema::object().with_property("q", Schema::string()))
            .with_meta(META_STRICT, true);

        let raw = OpenAiAdapter::new().from_canonical(&tool).unwrap();
        let function = raw.as_openai().unwrap();
        let parameters = function.parameters.as_ref().unwrap();
        assert_eq!(parameters["additionalProperties"], json!(false));
    }

    #[test]
    fn non_strict_mode_leaves_additional_properties_alone() {
        let tool = CanonicalTool::new("plain_function")
            .with_input_schema(Schema::object().with_property("q", Schema::string()));

        let raw = OpenAiAdapter::new().from_canonical(&tool).unwrap();
        let function = raw.as_openai().unwrap();
        let parameters = function.parameters.as_ref().unwrap();
        assert!(!parameters.contains_key("additionalProperties"));
    }

    #[test]
    fn missing_parameters_stays_missing() {
        let function = OpenAiFunction::new("schemaless");
        let canonical = OpenAiAdapter::new().to_canonical(&function.into()).unwrap();
        assert!(canonical.input_schema.is_none());
    }

    #[test]
    fn round_trip_preserves_name_description_schema() {
        let original = OpenAiFunction {
            name: "search".to_string(),
            description: Some("Search things".to_string()),
            parameters: Some(object_map(json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "minLength": 1},
                    "limit": {"type": "integer", "default": 10},
                },
                "required": ["query"],
            }))),
            strict: true,
        };

        let adapter = OpenAiAdapter::new();
        let canonical = adapter.to_canonical(&original.clone().into()).unwrap();
        let raw = adapter.from_canonical(&canonical).unwrap();
        let back = raw.as_openai().unwrap();

        assert_eq!(back.name, original.name);
        assert_eq!(back.description, original.description);
        assert!(back.strict);

        let parameters = back.parameters.as_ref().unwrap();
        assert_eq!(parameters["properties"]["query"]["minLength"], json!(1));
        assert_eq!(parameters["properties"]["limit"]["default"], json!(10));
        // Strict mode re-adds the root constraint
        assert_eq!(parameters["additionalProperties"], json!(false));
    }

    #[test]
    fn projection_drops_unsupported_constructs() {
        let tool = CanonicalTool::new("ref_tool").with_input_schema(
            Schema::object()
                .with_reference("#/$defs/Person")
                .with_def("Person", Schema::object())
                .with_property("q", Schema::string().with_pattern("^a")),
        );

        let raw = OpenAiAdapter::new().from_canonical(&tool).unwrap();
        let parameters = raw.as_openai().unwrap().parameters.clone().unwrap();

        assert!(!parameters.contains_key("$ref"));
        assert!(!parameters.contains_key("$defs"));
        // Supported constraints survive
        assert_eq!(parameters["properties"]["q"]["pattern"], json!("^a"));
    }

    #[test]
    fn feature_table_rejects_references_and_combinators() {
        let adapter = OpenAiAdapter::new();
        let unsupported = [
            SchemaFeature::Ref,
            SchemaFeature::Defs,
            SchemaFeature::AnyOf,
            SchemaFeature::OneOf,
            SchemaFeature::AllOf,
            SchemaFeature::Not,
        ];

        for feature in SchemaFeature::all() {
            let expected = !unsupported.contains(&feature);
            assert_eq!(adapter.supports_feature(feature), expected, "{feature}");
        }
    }

    #[test]
    fn wire_serialization_omits_default_strict() {
        let function = OpenAiFunction::new("plain");
        let json = serde_json::to_value(&function).unwrap();
        assert!(json.get("strict").is_none());

        let strict = OpenAiFunction {
            strict: true,
            ..OpenAiFunction::new("strict")
        };
        let json = serde_json::to_value(&strict).unwrap();
        assert_eq!(json["strict"], json!(true));
    }
}
