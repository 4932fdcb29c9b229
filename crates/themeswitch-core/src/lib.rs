#![forbid(unsafe_code)]

//! `themeswitch-core` holds everything the page theme switcher does that is
//! not tied to a browser.
//!
//! Design goals:
//! - **Explicit state**: panel, mode, theme, and slider live in
//!   [`SwitcherState`], not in a shared class attribute.
//! - **Pure render**: [`Presentation::of`] derives the class list of every
//!   target from the state; [`sync_classes`] applies it without touching
//!   classes the switcher does not own.
//! - **Injected host**: the controller talks to [`DomLookup`] and
//!   [`ClassList`] seams. `themeswitch-web` implements them over `web-sys`,
//!   [`memory::MemoryDom`] implements them in memory.
//!
//! No JS/WASM types here.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod memory;
pub mod mode;
pub mod render;
pub mod state;
pub mod telemetry;
pub mod theme;

pub use config::{InitialModePolicy, RootTarget, SwitcherConfig};
pub use controller::ThemeSwitcher;
pub use error::{ClassOp, ElementRole, HostError, Result, SwitcherError};
pub use host::{Bindings, ClassList, DomLookup, ModeOption, ThemeOption};
pub use mode::{Mode, ParseModeError};
pub use render::{Presentation, Target, sync_classes};
pub use state::{SwitcherMsg, SwitcherState, Transition};
pub use theme::{ParseThemeError, Theme};

/// Class on the wrapper while the panel is open.
pub const OPEN_CLASS: &str = "is-open";

/// Class toggled on the slider on every mode selection.
pub const CHANGE_CLASS: &str = "is-change";
