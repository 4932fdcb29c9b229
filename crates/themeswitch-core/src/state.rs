#![forbid(unsafe_code)]

//! Explicit switcher state and its pure transition function.
//!
//! Nothing in here touches a class list. The controller runs
//! [`SwitcherState::update`] first and only then asks the render step to
//! reconcile the targets named by [`SwitcherMsg::targets`]. The returned
//! [`Transition`] only feeds logs and counters.

use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::render::Target;
use crate::theme::Theme;

/// Everything the switcher presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitcherState {
    /// Wrapper carries `is-open`.
    pub panel_open: bool,
    pub mode: Mode,
    pub theme: Theme,
    /// Slider carries `is-change`. Flips on every mode selection, including
    /// a re-selection of the active mode.
    pub slider_changing: bool,
}

/// User intents, one per clickable element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitcherMsg {
    TogglePanel,
    SelectMode(Mode),
    SelectTheme(Theme),
}

impl SwitcherMsg {
    /// Stable label for logs and spans.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TogglePanel => "toggle_panel",
            Self::SelectMode(_) => "select_mode",
            Self::SelectTheme(_) => "select_theme",
        }
    }

    /// Targets reconciled after this message, whether or not the state
    /// changed. Re-selecting the active mode or theme re-applies it.
    #[must_use]
    pub const fn targets(self) -> &'static [Target] {
        match self {
            Self::TogglePanel => &[Target::Wrapper],
            Self::SelectMode(_) => &[Target::Root, Target::Slider],
            Self::SelectTheme(_) => &[Target::Root],
        }
    }
}

/// Which parts of the state an update changed. Feeds logs and counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub panel: bool,
    pub mode: bool,
    pub theme: bool,
    pub slider: bool,
}

impl Transition {
    /// Nothing visible changed.
    #[must_use]
    pub const fn is_noop(self) -> bool {
        !(self.panel || self.mode || self.theme || self.slider)
    }
}

impl SwitcherState {
    /// Closed panel, resting slider.
    #[must_use]
    pub const fn new(mode: Mode, theme: Theme) -> Self {
        Self {
            panel_open: false,
            mode,
            theme,
            slider_changing: false,
        }
    }

    /// Apply `msg` and report what changed.
    pub fn update(&mut self, msg: SwitcherMsg) -> Transition {
        let mut transition = Transition::default();
        match msg {
            SwitcherMsg::TogglePanel => {
                self.panel_open = !self.panel_open;
                transition.panel = true;
            }
            SwitcherMsg::SelectMode(mode) => {
                self.slider_changing = !self.slider_changing;
                transition.slider = true;
                transition.mode = self.mode != mode;
                self.mode = mode;
            }
            SwitcherMsg::SelectTheme(theme) => {
                transition.theme = self.theme != theme;
                self.theme = theme;
            }
        }
        transition
    }
}
