//! Router configuration: per-layer design rules and heuristic selection.
//!
//! ```toml
//! heuristic = "planar"
//!
//! [[layers]]
//! min_width = 1
//! min_spacing = 1
//! ```

use serde::{Deserialize, Serialize};

use crate::cost::HeuristicMode;
use crate::error::{Result, RouteError};
use crate::types::Capacity;

/// Minimum wire width and spacing on one layer, in routing tracks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerRule {
    pub min_width: Capacity,
    pub min_spacing: Capacity,
}

impl LayerRule {
    pub const fn new(min_width: Capacity, min_spacing: Capacity) -> Self {
        Self {
            min_width,
            min_spacing,
        }
    }

    /// Tracks consumed by one wire on this layer, widened so that no rule
    /// can overflow the sum.
    #[inline]
    pub fn wire_demand(&self) -> u64 {
        u64::from(self.min_width) + u64::from(self.min_spacing)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub heuristic: HeuristicMode,
    /// Rules indexed by layer
    pub layers: Vec<LayerRule>,
}

impl RouterConfig {
    /// Same rule on every one of `num_layers` layers.
    pub fn uniform(num_layers: usize, rule: LayerRule) -> Self {
        Self {
            heuristic: HeuristicMode::default(),
            layers: vec![rule; num_layers],
        }
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicMode) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| RouteError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| RouteError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(RouteError::Config("at least one layer rule is required".into()));
        }
        Ok(())
    }

    pub fn layer(&self, layer: u32) -> Result<&LayerRule> {
        self.layers
            .get(layer as usize)
            .ok_or(RouteError::UnknownLayer { layer })
    }
}
