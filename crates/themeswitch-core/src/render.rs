#![forbid(unsafe_code)]

//! Pure render step: state in, desired class lists out.

use crate::error::HostError;
use crate::host::ClassList;
use crate::mode::Mode;
use crate::state::SwitcherState;
use crate::theme::Theme;
use crate::{CHANGE_CLASS, OPEN_CLASS};

const ROOT_OWNED: [&str; 10] = [
    Mode::CLASS_NAMES[0],
    Mode::CLASS_NAMES[1],
    Theme::CLASS_NAMES[0],
    Theme::CLASS_NAMES[1],
    Theme::CLASS_NAMES[2],
    Theme::CLASS_NAMES[3],
    Theme::CLASS_NAMES[4],
    Theme::CLASS_NAMES[5],
    Theme::CLASS_NAMES[6],
    Theme::CLASS_NAMES[7],
];

/// Element whose class attribute the switcher writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Page root (`<body>` by default).
    Root,
    Wrapper,
    Slider,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Root, Target::Wrapper, Target::Slider];

    /// Classes this switcher owns on the target. Anything else on the
    /// element belongs to the page.
    #[must_use]
    pub const fn owned_classes(self) -> &'static [&'static str] {
        match self {
            Self::Root => &ROOT_OWNED,
            Self::Wrapper => &[OPEN_CLASS],
            Self::Slider => &[CHANGE_CLASS],
        }
    }
}

/// Desired owned classes per target for one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    root: [&'static str; 2],
    wrapper: Option<&'static str>,
    slider: Option<&'static str>,
}

impl Presentation {
    #[must_use]
    pub fn of(state: &SwitcherState) -> Self {
        Self {
            root: [state.mode.class_name(), state.theme.class_name()],
            wrapper: state.panel_open.then_some(OPEN_CLASS),
            slider: state.slider_changing.then_some(CHANGE_CLASS),
        }
    }

    /// Owned classes that must be present on `target`.
    #[must_use]
    pub fn classes(&self, target: Target) -> &[&'static str] {
        match target {
            Target::Root => &self.root,
            Target::Wrapper => self.wrapper.as_slice(),
            Target::Slider => self.slider.as_slice(),
        }
    }
}

/// Reconcile `node` so that, among `owned`, exactly `desired` is present.
///
/// Removals run before additions. Returns the number of writes issued;
/// classes already in the right state are not written.
pub fn sync_classes<N>(node: &N, owned: &[&str], desired: &[&str]) -> Result<usize, HostError>
where
    N: ClassList + ?Sized,
{
    let mut writes = 0;
    for class in owned {
        if !desired.contains(class) && node.contains(class) {
            node.remove(class)?;
            writes += 1;
        }
    }
    for class in desired {
        if !node.contains(class) {
            node.add(class)?;
            writes += 1;
        }
    }
    Ok(writes)
}
