#![forbid(unsafe_code)]

//! Host-supplied description of where the switcher lives on the page.
//!
//! Defaults match the stock dashboard markup:
//!
//! ```html
//! <button id="theme-switcher-button"></button>
//! <div id="theme-switcher-wrapper">
//!   <span data-slider></span>
//!   <a data-mode="light"></a> <a data-mode="dark"></a>
//!   <a data-theme="orange"></a> ... <a data-theme="pink"></a>
//! </div>
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Element whose class attribute carries mode and theme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RootTarget {
    #[default]
    Body,
    DocumentElement,
}

/// What initialization applies for the mode.
///
/// A mode is always drawn at random. `ForceDark` then applies dark anyway,
/// which is what the dashboard has always shipped; `Random` applies the
/// drawn mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InitialModePolicy {
    #[default]
    ForceDark,
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SwitcherConfig {
    pub wrapper_id: String,
    pub toggle_id: String,
    /// Resolved inside the wrapper.
    pub slider_selector: String,
    /// Attribute annotating mode options with a [`crate::Mode`] value.
    pub mode_attribute: String,
    /// Attribute annotating theme options with a [`crate::Theme`] value.
    pub theme_attribute: String,
    pub root: RootTarget,
    pub initial_mode: InitialModePolicy,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            wrapper_id: "theme-switcher-wrapper".into(),
            toggle_id: "theme-switcher-button".into(),
            slider_selector: "[data-slider]".into(),
            mode_attribute: "data-mode".into(),
            theme_attribute: "data-theme".into(),
            root: RootTarget::Body,
            initial_mode: InitialModePolicy::ForceDark,
        }
    }
}

impl SwitcherConfig {
    /// Parse a JSON object; omitted keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Selector for mode options inside the wrapper.
    #[must_use]
    pub fn mode_selector(&self) -> String {
        format!("[{}]", self.mode_attribute)
    }

    /// Selector for theme options inside the wrapper.
    #[must_use]
    pub fn theme_selector(&self) -> String {
        format!("[{}]", self.theme_attribute)
    }
}
