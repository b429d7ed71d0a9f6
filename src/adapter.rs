//! Format adapter contract
//!
//! Each supported tool-calling format implements [`FormatAdapter`]: parse
//! its own raw shape into a [`CanonicalTool`], project a canonical tool
//! back out, and declare which schema capabilities the format can express.

use crate::adapters::{AnthropicTool, McpTool, OpenAiFunction};
use crate::error::AdapterResult;
use crate::feature::SchemaFeature;
use crate::tool::CanonicalTool;

/// A raw tool value in one of the supported formats.
///
/// Adapters take the closed sum rather than a type-erased value: passing a
/// variant to the wrong adapter is a [`TypeMismatch`] error, never a panic.
///
/// [`TypeMismatch`]: crate::error::AdapterError::TypeMismatch
#[derive(Debug, Clone, PartialEq)]
pub enum RawTool {
    /// An MCP tool definition
    Mcp(McpTool),
    /// An OpenAI function definition
    OpenAi(OpenAiFunction),
    /// An Anthropic tool definition
    Anthropic(AnthropicTool),
}

impl RawTool {
    /// The raw type carried by this variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RawTool::Mcp(_) => "McpTool",
            RawTool::OpenAi(_) => "OpenAiFunction",
            RawTool::Anthropic(_) => "AnthropicTool",
        }
    }

    /// Borrow the MCP tool, if that is what this is.
    pub fn as_mcp(&self) -> Option<&McpTool> {
        match self {
            RawTool::Mcp(tool) => Some(tool),
            _ => None,
        }
    }

    /// Borrow the OpenAI function, if that is what this is.
    pub fn as_openai(&self) -> Option<&OpenAiFunction> {
        match self {
            RawTool::OpenAi(function) => Some(function),
            _ => None,
        }
    }

    /// Borrow the Anthropic tool, if that is what this is.
    pub fn as_anthropic(&self) -> Option<&AnthropicTool> {
        match self {
            RawTool::Anthropic(tool) => Some(tool),
            _ => None,
        }
    }
}

impl From<McpTool> for RawTool {
    fn from(tool: McpTool) -> Self {
        RawTool::Mcp(tool)
    }
}

impl From<OpenAiFunction> for RawTool {
    fn from(function: OpenAiFunction) -> Self {
        RawTool::OpenAi(function)
    }
}

impl From<AnthropicTool> for RawTool {
    fn from(tool: AnthropicTool) -> Self {
        RawTool::Anthropic(tool)
    }
}

/// Bidirectional converter between one tool-calling format and the
/// canonical representation, plus that format's capability table.
pub trait FormatAdapter: Send + Sync + std::fmt::Debug {
    /// Stable lowercase identifier, used as the registry key.
    fn name(&self) -> &'static str;

    /// Convert a raw tool of this adapter's format into canonical form.
    ///
    /// Sets `source_format` to [`name`](FormatAdapter::name) and stashes
    /// fields with no canonical home into `source_meta` so a later
    /// [`from_canonical`](FormatAdapter::from_canonical) by this same
    /// adapter restores them. A raw value of a different format fails with
    /// a type mismatch; a raw value without a schema yields a tool with
    /// `input_schema: None` rather than a fabricated empty schema.
    fn to_canonical(&self, raw: &RawTool) -> AdapterResult<CanonicalTool>;

    /// Convert a canonical tool into this adapter's raw format.
    ///
    /// Reads back only the `source_meta` keys this adapter writes. The
    /// input tool is never mutated.
    fn from_canonical(&self, tool: &CanonicalTool) -> AdapterResult<RawTool>;

    /// Whether this adapter's format can express the given capability.
    /// Total over [`SchemaFeature::ALL`].
    fn supports_feature(&self, feature: SchemaFeature) -> bool;
}
