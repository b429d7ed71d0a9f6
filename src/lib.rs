//! # toolbridge
//!
//! Convert LLM tool definitions between tool-calling formats through a
//! single canonical representation.
//!
//! Three formats are supported: MCP (full JSON Schema), OpenAI functions,
//! and Anthropic tools. Each format gets a [`FormatAdapter`] that parses
//! its raw shape into a [`CanonicalTool`] and projects one back out, plus a
//! capability table describing which schema features the format can
//! express. The [`AdapterRegistry`] chains two adapters for cross-format
//! conversion and reports every schema capability the target format had to
//! drop — as warnings, never as errors.
//!
//! This is a pure in-memory library: no I/O, no schema validation of data
//! instances, no reference resolution. `$ref` targets are carried verbatim.
//!
//! ## Example
//!
//! ```
//! use toolbridge::prelude::*;
//!
//! let tool = CanonicalTool::new("get_weather")
//!     .with_description("Get the weather for a location")
//!     .with_input_schema(
//!         Schema::object()
//!             .with_property("location", Schema::string())
//!             .with_required("location"),
//!     );
//!
//! let raw = OpenAiAdapter::new().from_canonical(&tool)?;
//! let function = raw.as_openai().unwrap();
//! assert_eq!(function.name, "get_weather");
//! assert!(function.parameters.is_some());
//! # Ok::<(), toolbridge::AdapterError>(())
//! ```
//!
//! Cross-format conversion goes through the registry and surfaces feature
//! loss:
//!
//! ```
//! use toolbridge::prelude::*;
//!
//! let registry = AdapterRegistry::with_default_adapters();
//!
//! let tool = AnthropicTool::new("echo");
//! let result = registry.convert(&tool.into(), "anthropic", "openai")?;
//! assert!(result.is_lossless());
//! # Ok::<(), toolbridge::AdapterError>(())
//! ```

pub mod adapter;
pub mod adapters;
pub mod error;
pub mod feature;
pub mod prelude;
pub mod registry;
pub mod schema;
pub mod tool;

pub use adapter::{FormatAdapter, RawTool};
pub use adapters::{
    AnthropicAdapter, AnthropicTool, McpAdapter, McpTool, OpenAiAdapter, OpenAiFunction,
};
pub use error::{AdapterError, AdapterResult, Direction};
pub use feature::SchemaFeature;
pub use registry::{AdapterRegistry, ConversionResult, FeatureLossWarning};
pub use schema::Schema;
pub use tool::CanonicalTool;
