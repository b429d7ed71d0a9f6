//! Schema capability enumeration
//!
//! Each tool-calling format can express a different subset of JSON Schema.
//! [`SchemaFeature`] is the closed set of capabilities an adapter declares
//! support for, and the key the registry uses when reporting feature loss.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A JSON Schema capability that a format may or may not support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaFeature {
    /// `$ref` references
    #[serde(rename = "$ref")]
    Ref,
    /// `$defs` local definitions
    #[serde(rename = "$defs")]
    Defs,
    /// `anyOf` combinator
    #[serde(rename = "anyOf")]
    AnyOf,
    /// `oneOf` combinator
    #[serde(rename = "oneOf")]
    OneOf,
    /// `allOf` combinator
    #[serde(rename = "allOf")]
    AllOf,
    /// `not` combinator
    #[serde(rename = "not")]
    Not,
    /// `pattern` string constraint
    #[serde(rename = "pattern")]
    Pattern,
    /// `format` string annotation
    #[serde(rename = "format")]
    Format,
    /// `additionalProperties` control
    #[serde(rename = "additionalProperties")]
    AdditionalProperties,
    /// `minimum` numeric bound
    #[serde(rename = "minimum")]
    Minimum,
    /// `maximum` numeric bound
    #[serde(rename = "maximum")]
    Maximum,
    /// `minLength` string bound
    #[serde(rename = "minLength")]
    MinLength,
    /// `maxLength` string bound
    #[serde(rename = "maxLength")]
    MaxLength,
    /// `enum` value sets
    #[serde(rename = "enum")]
    Enum,
    /// `const` fixed values
    #[serde(rename = "const")]
    Const,
    /// `default` values
    #[serde(rename = "default")]
    Default,
}

impl SchemaFeature {
    /// Every feature, in declaration order. Adapters must answer
    /// `supports_feature` for each of these.
    pub const ALL: [SchemaFeature; 16] = [
        SchemaFeature::Ref,
        SchemaFeature::Defs,
        SchemaFeature::AnyOf,
        SchemaFeature::OneOf,
        SchemaFeature::AllOf,
        SchemaFeature::Not,
        SchemaFeature::Pattern,
        SchemaFeature::Format,
        SchemaFeature::AdditionalProperties,
        SchemaFeature::Minimum,
        SchemaFeature::Maximum,
        SchemaFeature::MinLength,
        SchemaFeature::MaxLength,
        SchemaFeature::Enum,
        SchemaFeature::Const,
        SchemaFeature::Default,
    ];

    /// Iterate over the full enumeration.
    pub fn all() -> impl Iterator<Item = SchemaFeature> {
        Self::ALL.into_iter()
    }

    /// The JSON Schema keyword this feature corresponds to.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaFeature::Ref => "$ref",
            SchemaFeature::Defs => "$defs",
            SchemaFeature::AnyOf => "anyOf",
            SchemaFeature::OneOf => "oneOf",
            SchemaFeature::AllOf => "allOf",
            SchemaFeature::Not => "not",
            SchemaFeature::Pattern => "pattern",
            SchemaFeature::Format => "format",
            SchemaFeature::AdditionalProperties => "additionalProperties",
            SchemaFeature::Minimum => "minimum",
            SchemaFeature::Maximum => "maximum",
            SchemaFeature::MinLength => "minLength",
            SchemaFeature::MaxLength => "maxLength",
            SchemaFeature::Enum => "enum",
            SchemaFeature::Const => "const",
            SchemaFeature::Default => "default",
        }
    }
}

impl fmt::Display for SchemaFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_features_are_distinct() {
        let set: HashSet<SchemaFeature> = SchemaFeature::all().collect();
        assert_eq!(set.len(), SchemaFeature::ALL.len());
    }

    #[test]
    fn display_uses_schema_keywords() {
        assert_eq!(SchemaFeature::Ref.to_string(), "$ref");
        assert_eq!(SchemaFeature::AdditionalProperties.to_string(), "additionalProperties");
        assert_eq!(SchemaFeature::MinLength.to_string(), "minLength");
    }

    #[test]
    fn serde_round_trip_uses_keywords() {
        let json = serde_json::to_string(&SchemaFeature::Defs).unwrap();
        assert_eq!(json, "\"$defs\"");
        let back: SchemaFeature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SchemaFeature::Defs);
    }
}
