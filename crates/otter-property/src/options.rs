//! Controller configuration.

use otter_object::PropertyAttributes;

/// Property controller options.
///
/// Controls how `attach` adopts whatever was on the object before and how
/// much the mediator logs.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Adopt a pre-existing property on attach: a data value seeds the
    /// backing slot, an accessor becomes the bottom layer.
    /// Default: true
    pub seed_from_existing: bool,

    /// Attributes of the synthesized plain layer when the chain is empty and
    /// nothing was adopted.
    /// Default: writable, enumerable, configurable
    pub default_attributes: PropertyAttributes,

    /// Emit a `trace` event for every intercepted get/set.
    /// Default: false
    pub trace_dispatch: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            seed_from_existing: true,
            default_attributes: PropertyAttributes::data(),
            trace_dispatch: false,
        }
    }
}

impl ControllerOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable adoption of the pre-existing property.
    pub fn seed_from_existing(mut self, enabled: bool) -> Self {
        self.seed_from_existing = enabled;
        self
    }

    /// Set the attributes of the synthesized plain layer.
    pub fn default_attributes(mut self, attributes: PropertyAttributes) -> Self {
        self.default_attributes = attributes;
        self
    }

    /// Enable or disable per-access tracing.
    pub fn trace_dispatch(mut self, enabled: bool) -> Self {
        self.trace_dispatch = enabled;
        self
    }
}
