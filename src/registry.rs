//! Adapter registry and cross-format conversion
//!
//! [`AdapterRegistry`] holds named adapters and performs two-hop
//! conversions: source adapter to canonical, canonical to target adapter.
//! Along the way it compares the two feature tables against what the tool's
//! schema actually uses and collects a warning for each capability the
//! target cannot express. Feature loss never fails a conversion.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::debug;

use crate::adapter::{FormatAdapter, RawTool};
use crate::adapters::{AnthropicAdapter, McpAdapter, OpenAiAdapter};
use crate::error::{AdapterError, AdapterResult, Direction};
use crate::feature::SchemaFeature;
use crate::tool::CanonicalTool;

/// One schema capability the target format could not express
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureLossWarning {
    /// The capability that was dropped
    pub feature: SchemaFeature,
    /// Adapter the tool came from
    pub source: String,
    /// Adapter the tool was converted into
    pub target: String,
}

impl fmt::Display for FeatureLossWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is not supported by {} (converting from {})",
            self.feature, self.target, self.source
        )
    }
}

/// Outcome of a registry conversion: the produced raw tool plus any
/// feature-loss warnings accumulated along the way
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// The tool in the target format
    pub tool: RawTool,
    /// Capabilities of the source schema the target format dropped
    pub warnings: Vec<FeatureLossWarning>,
}

impl ConversionResult {
    /// Whether the conversion was lossless.
    pub fn is_lossless(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Thread-safe store of named format adapters
///
/// Lookups and conversions take a shared lock so any number of conversions
/// can run in parallel; registration and removal take the exclusive lock.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: RwLock<HashMap<String, Arc<dyn FormatAdapter>>>,
}

impl AdapterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the three built-in adapters registered.
    pub fn with_default_adapters() -> Self {
        let registry = Self::new();
        // Fresh registry, duplicate names are impossible here
        let _ = registry.register(Arc::new(McpAdapter::new()));
        let _ = registry.register(Arc::new(OpenAiAdapter::new()));
        let _ = registry.register(Arc::new(AnthropicAdapter::new()));
        registry
    }

    /// Register an adapter under its own name. Fails with
    /// [`AdapterError::DuplicateAdapter`] when the name is taken; the
    /// existing adapter is never overwritten.
    pub fn register(&self, adapter: Arc<dyn FormatAdapter>) -> AdapterResult<()> {
        let name = adapter.name().to_string();
        let mut adapters = self.write();
        if adapters.contains_key(&name) {
            return Err(AdapterError::DuplicateAdapter(name));
        }
        adapters.insert(name, adapter);
        Ok(())
    }

    /// Look up an adapter by name.
    pub fn get(&self, name: &str) -> AdapterResult<Arc<dyn FormatAdapter>> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| AdapterError::NotFound(name.to_string()))
    }

    /// Registered adapter names, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove an adapter by name.
    pub fn unregister(&self, name: &str) -> AdapterResult<()> {
        self.write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| AdapterError::NotFound(name.to_string()))
    }

    /// Convert a raw tool from one format to another through the canonical
    /// representation.
    ///
    /// Adapter failures are wrapped with the failing adapter's name and
    /// direction. Feature loss is reported in the result's warnings, never
    /// as an error. The caller's raw value is not mutated.
    pub fn convert(
        &self,
        raw: &RawTool,
        from_name: &str,
        to_name: &str,
    ) -> AdapterResult<ConversionResult> {
        let from_adapter = self.get(from_name)?;
        let to_adapter = self.get(to_name)?;

        let canonical = from_adapter
            .to_canonical(raw)
            .map_err(|e| AdapterError::conversion(from_name, Direction::ToCanonical, e))?;

        let warnings = feature_loss(&canonical, from_adapter.as_ref(), to_adapter.as_ref());
        for warning in &warnings {
            debug!(%warning, "feature lost in conversion");
        }

        let tool = to_adapter
            .from_canonical(&canonical)
            .map_err(|e| AdapterError::conversion(to_name, Direction::FromCanonical, e))?;

        debug!(
            from = from_name,
            to = to_name,
            tool = %canonical.id(),
            warnings = warnings.len(),
            "converted tool"
        );

        Ok(ConversionResult { tool, warnings })
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn FormatAdapter>>> {
        // Map contents stay consistent even if a holder panicked
        self.adapters.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<dyn FormatAdapter>>> {
        self.adapters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Warnings for every feature the source supports, the target does not,
/// and the tool's schema tree actually exercises.
fn feature_loss(
    tool: &CanonicalTool,
    from: &dyn FormatAdapter,
    to: &dyn FormatAdapter,
) -> Vec<FeatureLossWarning> {
    SchemaFeature::all()
        .filter(|&feature| from.supports_feature(feature) && !to.supports_feature(feature))
        .filter(|&feature| {
            let in_input = tool
                .input_schema
                .as_ref()
                .is_some_and(|schema| schema.uses_feature(feature));
            let in_output = tool
                .output_schema
                .as_ref()
                .is_some_and(|schema| schema.uses_feature(feature));
            in_input || in_output
        })
        .map(|feature| FeatureLossWarning {
            feature,
            source: from.name().to_string(),
            target: to.name().to_string(),
        })
        .collect()
}
