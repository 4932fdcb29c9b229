#![forbid(unsafe_code)]

//! The switcher controller: state, three mutable targets, and the glue
//! between them.

use rand::Rng;
use tracing::{debug, info};

use crate::config::{InitialModePolicy, SwitcherConfig};
use crate::error::Result;
use crate::host::{Bindings, ClassList, DomLookup};
use crate::mode::Mode;
use crate::render::{Presentation, Target, sync_classes};
use crate::state::{SwitcherMsg, SwitcherState, Transition};
use crate::telemetry;
use crate::theme::Theme;
use crate::{CHANGE_CLASS, OPEN_CLASS};

const LOG_TARGET: &str = "themeswitch.controller";

/// Owns the switcher state and writes it to the root, wrapper, and slider.
///
/// Every operation runs the pure transition first and then reconciles the
/// targets its message addresses, even when the state did not change. If a
/// host write fails the new state is kept and the error is returned;
/// re-selecting the same option or calling [`ThemeSwitcher::render`]
/// re-applies it.
#[derive(Debug, Clone)]
pub struct ThemeSwitcher<N> {
    state: SwitcherState,
    root: N,
    wrapper: N,
    slider: N,
}

impl<N: ClassList + Clone> ThemeSwitcher<N> {
    /// Wrap already-resolved targets. Performs no writes.
    pub fn new(root: N, wrapper: N, slider: N, state: SwitcherState) -> Self {
        Self {
            state,
            root,
            wrapper,
            slider,
        }
    }

    /// Resolve the DOM contract, draw a random initial appearance, and
    /// render it.
    ///
    /// Lookup happens before any write, so a missing or malformed element
    /// leaves every class list untouched. The returned [`Bindings`] carry
    /// the toggle and option elements for the host to attach listeners to.
    pub fn initialize<D, R>(
        dom: &D,
        config: &SwitcherConfig,
        rng: &mut R,
    ) -> Result<(Self, Bindings<N>)>
    where
        D: DomLookup<Node = N>,
        R: Rng,
    {
        let span = tracing::debug_span!(
            "switcher.initialize",
            policy = ?config.initial_mode,
            mode = tracing::field::Empty,
            theme = tracing::field::Empty,
        );
        let _guard = span.enter();

        let bindings = Bindings::locate(dom, config)?;

        let drawn = Mode::ALL[rng.random_range(0..Mode::ALL.len())];
        let theme = Theme::ALL[rng.random_range(0..Theme::ALL.len())];
        let mode = match config.initial_mode {
            InitialModePolicy::ForceDark => Mode::Dark,
            InitialModePolicy::Random => drawn,
        };
        if mode != drawn {
            debug!(
                target: LOG_TARGET,
                drawn = %drawn,
                applied = %mode,
                "random initial mode overridden by policy"
            );
        }
        span.record("mode", tracing::field::display(mode));
        span.record("theme", tracing::field::display(theme));

        let state = SwitcherState {
            panel_open: bindings.wrapper.contains(OPEN_CLASS),
            mode,
            theme,
            slider_changing: bindings.slider.contains(CHANGE_CLASS),
        };
        let switcher = Self::new(
            bindings.root.clone(),
            bindings.wrapper.clone(),
            bindings.slider.clone(),
            state,
        );
        switcher.render()?;

        info!(
            target: LOG_TARGET,
            mode = %mode,
            theme = %theme,
            mode_options = bindings.mode_options.len(),
            theme_options = bindings.theme_options.len(),
            "theme switcher initialized"
        );
        Ok((switcher, bindings))
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SwitcherState {
        self.state
    }

    /// Desired owned classes for the current state.
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        Presentation::of(&self.state)
    }

    /// Reconcile every target with the current state. Returns the number of
    /// class writes issued.
    pub fn render(&self) -> Result<usize> {
        let presentation = self.presentation();
        let mut writes = 0;
        for target in Target::ALL {
            writes += self.sync_target(target, &presentation)?;
        }
        Ok(writes)
    }

    /// Run one message through the state machine and write the result.
    pub fn dispatch(&mut self, msg: SwitcherMsg) -> Result<Transition> {
        let span = tracing::debug_span!(
            "switcher.transition",
            msg = msg.label(),
            panel_open = tracing::field::Empty,
            mode = tracing::field::Empty,
            theme = tracing::field::Empty,
        )
        .entered();

        let transition = self.state.update(msg);
        telemetry::record_transition(msg, transition);
        span.record("panel_open", self.state.panel_open);
        span.record("mode", self.state.mode.as_str());
        span.record("theme", self.state.theme.as_str());

        let presentation = self.presentation();
        for &target in msg.targets() {
            self.sync_target(target, &presentation)?;
        }

        debug!(
            target: LOG_TARGET,
            msg = msg.label(),
            noop = transition.is_noop(),
            "transition applied"
        );
        Ok(transition)
    }

    /// Flip the panel's `is-open` class.
    pub fn toggle_panel_open(&mut self) -> Result<()> {
        self.dispatch(SwitcherMsg::TogglePanel).map(drop)
    }

    /// Apply `mode` to the root and flip the slider's `is-change` class.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.dispatch(SwitcherMsg::SelectMode(mode)).map(drop)
    }

    /// Apply `theme` to the root.
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.dispatch(SwitcherMsg::SelectTheme(theme)).map(drop)
    }

    fn node(&self, target: Target) -> &N {
        match target {
            Target::Root => &self.root,
            Target::Wrapper => &self.wrapper,
            Target::Slider => &self.slider,
        }
    }

    fn sync_target(&self, target: Target, presentation: &Presentation) -> Result<usize> {
        let writes = sync_classes(
            self.node(target),
            target.owned_classes(),
            presentation.classes(target),
        )?;
        telemetry::record_class_writes(writes);
        Ok(writes)
    }
}
