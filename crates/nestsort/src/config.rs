//! Sortable Configuration
//!
//! Thresholds, DOM conventions and SortableJS options for a nested list.

use serde::{Deserialize, Serialize};

use crate::item::DomIdentity;

/// Horizontal offset (px) past which a drag nests or unnests
pub const NEST_THRESHOLD: f64 = 30.0;

pub const DEFAULT_ID_PREFIX: &str = "items-";
pub const DEFAULT_PLACEHOLDER_ID: &str = "empty";
pub const DEFAULT_PARENT_ATTR: &str = "data-parent-id";

/// Configuration for one sortable list.
///
/// Every field has a default, so a partial JSON object (for example from a
/// `data-sortable-config` attribute) is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub nest_threshold: f64,
    pub id_prefix: String,
    pub placeholder_id: String,
    pub parent_attr: String,
    pub animation_ms: u32,
    pub handle: Option<String>,
    pub ghost_class: String,
    pub nest_class: String,
    pub unnest_class: String,
    pub touch_delay_ms: u32,
    pub fallback_tolerance: u32,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            nest_threshold: NEST_THRESHOLD,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            placeholder_id: DEFAULT_PLACEHOLDER_ID.to_string(),
            parent_attr: DEFAULT_PARENT_ATTR.to_string(),
            animation_ms: 100,
            handle: Some(".drag-handle".to_string()),
            ghost_class: "opacity-50".to_string(),
            nest_class: "drag-nest".to_string(),
            unnest_class: "drag-unnest".to_string(),
            touch_delay_ms: 120,
            fallback_tolerance: 3,
        }
    }
}

impl SortConfig {
    /// Parse from JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.normalize();
        Ok(config)
    }

    /// Threshold must be a finite, non-negative number
    fn normalize(&mut self) {
        if !self.nest_threshold.is_finite() || self.nest_threshold < 0.0 {
            tracing::warn!(
                threshold = self.nest_threshold,
                "invalid nest threshold, using default"
            );
            self.nest_threshold = NEST_THRESHOLD;
        }
    }

    pub fn dom_identity(&self) -> DomIdentity {
        DomIdentity::new(self.id_prefix.clone(), self.placeholder_id.clone())
    }

    /// Options object handed to the SortableJS constructor (without callbacks)
    pub fn sortable_options(&self) -> serde_json::Value {
        let mut options = serde_json::json!({
            "animation": self.animation_ms,
            "ghostClass": self.ghost_class,
            "direction": "vertical",
            "dataIdAttr": "id",
            "forceFallback": true,
            "fallbackClass": self.ghost_class,
            "fallbackTolerance": self.fallback_tolerance,
            "fallbackOnBody": true,
            "delay": self.touch_delay_ms,
            "delayOnTouchOnly": true,
            "touchStartThreshold": self.fallback_tolerance,
            "swapThreshold": 0.5,
            "invertSwap": true,
            "invertedSwapThreshold": 0.5,
            "dragoverBubble": false,
            "scroll": true,
            "bubbleScroll": true,
            "scrollSensitivity": 80,
            "scrollSpeed": 12,
            "filter": format!("#{}", self.dom_identity().placeholder_dom_id()),
        });
        if let (Some(handle), Some(obj)) = (&self.handle, options.as_object_mut()) {
            obj.insert("handle".to_string(), serde_json::Value::String(handle.clone()));
        }
        options
    }
}
