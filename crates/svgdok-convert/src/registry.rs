//! Format-keyed converter registry
//!
//! Routes each legacy vector format to the external converter registered
//! for it. The default registry holds the two real adapters; tests (or
//! embedders with alternative tooling) can prepend their own.

use std::time::Duration;

use crate::converter::{Emf2Svg, VectorConverter, Wmf2Svg};
use crate::format::VectorFormat;

/// Registry of vector converters, one consulted per format
///
/// Lookup scans in order and returns the first converter whose source
/// format matches, so converters registered later via [`register`] take
/// priority over the built-in adapters.
///
/// [`register`]: ConverterRegistry::register
pub struct ConverterRegistry {
    converters: Vec<Box<dyn VectorConverter>>,
}

impl ConverterRegistry {
    /// Create a registry with the standard EMF and WMF adapters
    pub fn new() -> Self {
        let mut registry = Self {
            converters: Vec::new(),
        };
        registry.register(Box::new(Wmf2Svg::new()));
        registry.register(Box::new(Emf2Svg::new()));
        registry
    }

    /// Create a registry whose adapters use the given subprocess timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let mut registry = Self {
            converters: Vec::new(),
        };
        registry.register(Box::new(Wmf2Svg::with_timeout(timeout)));
        registry.register(Box::new(Emf2Svg::with_timeout(timeout)));
        registry
    }

    /// Register a converter, giving it priority over existing ones
    pub fn register(&mut self, converter: Box<dyn VectorConverter>) {
        log::debug!("Registered converter: {}", converter.name());
        self.converters.insert(0, converter);
    }

    /// Find the converter registered for a legacy format
    pub fn for_format(&self, format: VectorFormat) -> Option<&dyn VectorConverter> {
        self.converters
            .iter()
            .find(|c| c.source_format() == format)
            .map(|c| c.as_ref())
    }

    /// Number of registered converters
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Check if no converters are registered
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
