//! Convenience re-exports for the common conversion workflow

pub use crate::adapter::{FormatAdapter, RawTool};
pub use crate::adapters::{
    AnthropicAdapter, AnthropicTool, McpAdapter, McpTool, OpenAiAdapter, OpenAiFunction,
};
pub use crate::error::{AdapterError, AdapterResult, Direction};
pub use crate::feature::SchemaFeature;
pub use crate::registry::{AdapterRegistry, ConversionResult, FeatureLossWarning};
pub use crate::schema::Schema;
pub use crate::tool::CanonicalTool;
