#![forbid(unsafe_code)]

//! Browser binding for the page theme switcher.
//!
//! On `wasm32` this crate exports [`mount`] and [`ThemeSwitcherHandle`]
//! through `wasm-bindgen`. `mount` resolves the switcher markup in the live
//! document, applies a random initial appearance, and wires one click
//! listener per toggle/option element:
//!
//! ```js
//! import init, { mount } from "./themeswitch_web.js";
//! await init();
//! const switcher = mount();              // stock dashboard markup
//! switcher.setTheme("teal");
//! console.log(switcher.state());         // { panelOpen, mode, theme, sliderChanging }
//! switcher.unmount();                    // detach listeners, keep classes
//! ```
//!
//! Everything that does not need a browser lives in `themeswitch-core`; the
//! helpers below are shared by the wasm module and native tests.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomNode, WebDom};
#[cfg(target_arch = "wasm32")]
pub use wasm::{ThemeSwitcherHandle, mount, telemetry};

use themeswitch_core::{Result, SwitcherConfig};

/// Parse the optional JSON config passed to `mount`. Absent or blank input
/// yields the stock dashboard contract.
pub fn parse_config(raw: Option<&str>) -> Result<SwitcherConfig> {
    match raw.map(str::trim) {
        None | Some("") => Ok(SwitcherConfig::default()),
        Some(json) => SwitcherConfig::from_json(json),
    }
}

/// Fold two `Math.random()` draws in `[0, 1)` into a 64-bit RNG seed.
///
/// Each draw contributes its top 32 bits of precision; out-of-range input
/// saturates.
#[must_use]
pub fn seed_from_unit_pair(hi: f64, lo: f64) -> u64 {
    const SCALE: f64 = 4_294_967_296.0;
    let hi = (hi * SCALE) as u32;
    let lo = (lo * SCALE) as u32;
    (u64::from(hi) << 32) | u64::from(lo)
}
