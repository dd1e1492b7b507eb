// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Tunables shared by nodes and the scene.
///
/// Every field has a default, so a configuration document only needs the keys it changes.
///
/// ```rust
/// use magicscript_scene::NodeConfig;
///
/// let config = NodeConfig::from_json_str(r#"{ "confirmationDuration": 1.5 }"#).unwrap();
/// assert_eq!(config.confirmation_duration, 1.5);
/// assert_eq!(config.tap_duration, 0.1);
/// assert!(NodeConfig::from_json_str(r#"{ "tapDurration": 1 }"#).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct NodeConfig {
    /// Seconds a circle confirmation takes to fill.
    pub confirmation_duration: f64,
    /// How far a tapped button's content moves back, in meters.
    pub tap_depth: f64,
    /// Seconds for a tapped button's content to move back (the same again to return).
    pub tap_duration: f64,
    /// Seconds an automatic scroll bar stays visible after scrolling stops.
    pub scroll_bar_hide_delay: f64,
    /// Seconds a scroll bar takes to fade in or out.
    pub scroll_bar_fade_duration: f64,
    /// Seconds per turn of an indeterminate spinner.
    pub spinner_period: f64,
    /// Whether nodes can be hit from behind.
    pub double_sided: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            confirmation_duration: 2.0,
            tap_depth: 0.05,
            tap_duration: 0.1,
            scroll_bar_hide_delay: 2.0,
            scroll_bar_fade_duration: 0.25,
            spinner_period: 1.0,
            double_sided: false,
        }
    }
}

impl NodeConfig {
    /// Parse a JSON configuration document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
