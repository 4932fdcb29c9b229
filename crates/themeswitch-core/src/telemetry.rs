#![forbid(unsafe_code)]

//! Process-wide counters for switcher activity.
//!
//! Counters are monotonic and never reset; hosts sample them through
//! [`snapshot`] and diff as needed.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::state::{SwitcherMsg, Transition};

static TRANSITIONS_TOTAL: AtomicU64 = AtomicU64::new(0);
static PANEL_TOGGLES_TOTAL: AtomicU64 = AtomicU64::new(0);
static MODE_CHANGES_TOTAL: AtomicU64 = AtomicU64::new(0);
static THEME_CHANGES_TOTAL: AtomicU64 = AtomicU64::new(0);
static CLASS_WRITES_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Messages dispatched, including no-op re-selections.
#[must_use]
pub fn transitions_total() -> u64 {
    TRANSITIONS_TOTAL.load(Ordering::Relaxed)
}

#[must_use]
pub fn panel_toggles_total() -> u64 {
    PANEL_TOGGLES_TOTAL.load(Ordering::Relaxed)
}

/// Mode selections that changed the applied mode.
#[must_use]
pub fn mode_changes_total() -> u64 {
    MODE_CHANGES_TOTAL.load(Ordering::Relaxed)
}

/// Theme selections that changed the applied theme.
#[must_use]
pub fn theme_changes_total() -> u64 {
    THEME_CHANGES_TOTAL.load(Ordering::Relaxed)
}

/// Class-list writes issued to any host.
#[must_use]
pub fn class_writes_total() -> u64 {
    CLASS_WRITES_TOTAL.load(Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    pub transitions_total: u64,
    pub panel_toggles_total: u64,
    pub mode_changes_total: u64,
    pub theme_changes_total: u64,
    pub class_writes_total: u64,
}

#[must_use]
pub fn snapshot() -> TelemetrySnapshot {
    TelemetrySnapshot {
        transitions_total: transitions_total(),
        panel_toggles_total: panel_toggles_total(),
        mode_changes_total: mode_changes_total(),
        theme_changes_total: theme_changes_total(),
        class_writes_total: class_writes_total(),
    }
}

pub(crate) fn record_transition(msg: SwitcherMsg, transition: Transition) {
    TRANSITIONS_TOTAL.fetch_add(1, Ordering::Relaxed);
    if matches!(msg, SwitcherMsg::TogglePanel) {
        PANEL_TOGGLES_TOTAL.fetch_add(1, Ordering::Relaxed);
    }
    if transition.mode {
        MODE_CHANGES_TOTAL.fetch_add(1, Ordering::Relaxed);
    }
    if transition.theme {
        THEME_CHANGES_TOTAL.fetch_add(1, Ordering::Relaxed);
    }
}

pub(crate) fn record_class_writes(writes: usize) {
    CLASS_WRITES_TOTAL.fetch_add(writes as u64, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;

    #[test]
    fn counters_are_monotonic() {
        let before = snapshot();
        record_transition(
            SwitcherMsg::SelectMode(Mode::Light),
            Transition {
                mode: true,
                slider: true,
                ..Transition::default()
            },
        );
        record_transition(SwitcherMsg::TogglePanel, Transition::default());
        record_class_writes(4);
        let after = snapshot();

        assert!(after.transitions_total >= before.transitions_total + 2);
        assert!(after.panel_toggles_total > before.panel_toggles_total);
        assert!(after.mode_changes_total > before.mode_changes_total);
        assert!(after.class_writes_total >= before.class_writes_total + 4);
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert!(json.get("classWritesTotal").is_some());
        assert!(json.get("transitionsTotal").is_some());
    }
}
