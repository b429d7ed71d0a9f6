//! Built-in format adapters
//!
//! Three formats are supported out of the box: MCP (the full-featured
//! reference format), OpenAI functions, and Anthropic tools.

pub mod anthropic;
pub mod mcp;
pub mod openai;

pub use anthropic::{AnthropicAdapter, AnthropicTool};
pub use mcp::{McpAdapter, McpTool};
pub use openai::{OpenAiAdapter, OpenAiFunction};
