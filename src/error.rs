//! Error types for tool format conversion

use std::fmt;

use thiserror::Error;

/// Result type for conversion operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Which half of a registry-mediated conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Raw format value into the canonical representation
    ToCanonical,
    /// Canonical representation out to a raw format value
    FromCanonical,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToCanonical => write!(f, "to canonical"),
            Direction::FromCanonical => write!(f, "from canonical"),
        }
    }
}

/// Error type for adapter and registry operations
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Raw value handed to an adapter does not match its format
    #[error("{adapter} adapter expected {expected}, got {actual}")]
    TypeMismatch {
        adapter: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// A value that should be a JSON Schema node is not an object
    #[error("malformed schema: {0}")]
    MalformedSchema(String),

    /// Canonical tool failed validation
    #[error("invalid tool: {0}")]
    InvalidTool(String),

    /// Adapter name not present in the registry
    #[error("adapter not registered: {0}")]
    NotFound(String),

    /// Register called with a name that is already taken
    #[error("adapter already registered: {0}")]
    DuplicateAdapter(String),

    /// Adapter failure during a registry conversion, tagged with the
    /// adapter name and direction. The original error stays reachable
    /// through [`std::error::Error::source`] or [`AdapterError::cause`].
    #[error("{adapter} adapter failed converting {direction}")]
    Conversion {
        adapter: String,
        direction: Direction,
        #[source]
        source: Box<AdapterError>,
    },
}

impl AdapterError {
    /// Wrap an adapter failure with the adapter name and direction.
    pub fn conversion(adapter: impl Into<String>, direction: Direction, source: AdapterError) -> Self {
        Self::Conversion {
            adapter: adapter.into(),
            direction,
            source: Box::new(source),
        }
    }

    /// The wrapped failure, if this is a conversion error.
    pub fn cause(&self) -> Option<&AdapterError> {
        match self {
            Self::Conversion { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether this is a registry lookup failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn conversion_error_unwraps_to_cause() {
        let inner = AdapterError::MalformedSchema("items is not an object".to_string());
        let wrapped = AdapterError::conversion("mcp", Direction::ToCanonical, inner);

        assert!(wrapped.to_string().contains("mcp"));
        assert!(wrapped.to_string().contains("to canonical"));

        let cause = wrapped.cause().expect("cause");
        assert!(matches!(cause, AdapterError::MalformedSchema(_)));

        // Also reachable through the std error chain
        let source = wrapped.source().expect("source");
        assert!(source.to_string().contains("items"));
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::ToCanonical.to_string(), "to canonical");
        assert_eq!(Direction::FromCanonical.to_string(), "from canonical");
    }
}
