//! App Configuration
//!
//! Sortable settings come from the host page, so the same build can be tuned
//! without recompiling.

use nestsort::SortConfig;

const CONFIG_ATTR: &str = "data-sortable-config";
const DEBUG_ATTR: &str = "data-debug";

fn body_attr(name: &str) -> Option<String> {
    web_sys::window()?.document()?.body()?.get_attribute(name)
}

/// `<body data-sortable-config='{"nest_threshold": 40}'>`, defaults otherwise
pub fn load_sort_config() -> SortConfig {
    let Some(json) = body_attr(CONFIG_ATTR) else {
        return SortConfig::default();
    };
    SortConfig::from_json(&json).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid {}, using defaults", CONFIG_ATTR);
        SortConfig::default()
    })
}

/// `<body data-debug>` turns on debug logging
pub fn debug_enabled() -> bool {
    body_attr(DEBUG_ATTR).is_some()
}
