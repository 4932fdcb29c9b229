#![forbid(unsafe_code)]

//! Property-based invariant tests for the theme switcher.
//!
//! 1. At most one mode class and one theme class on the root, always
//! 2. The last selection wins, including re-selections
//! 3. Panel parity: open after an odd number of toggles from closed
//! 4. Classes the switcher does not own are never touched
//! 5. Pure state and rendered classes never disagree

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use themeswitch_core::memory::{MemoryDom, MemoryNode};
use themeswitch_core::{
    Bindings, ClassList, InitialModePolicy, Mode, OPEN_CLASS, SwitcherConfig, SwitcherMsg,
    SwitcherState, Target, Theme, ThemeSwitcher,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop::sample::select(Mode::ALL.to_vec())
}

fn theme_strategy() -> impl Strategy<Value = Theme> {
    prop::sample::select(Theme::ALL.to_vec())
}

fn msg_strategy() -> impl Strategy<Value = SwitcherMsg> {
    prop_oneof![
        Just(SwitcherMsg::TogglePanel),
        mode_strategy().prop_map(SwitcherMsg::SelectMode),
        theme_strategy().prop_map(SwitcherMsg::SelectTheme),
    ]
}

fn mount(
    seed: u64,
    policy: InitialModePolicy,
) -> (MemoryDom, ThemeSwitcher<MemoryNode>, Bindings<MemoryNode>) {
    let dom = MemoryDom::dashboard();
    dom.body().set_classes(["page-shell", "js"]);
    let config = SwitcherConfig {
        initial_mode: policy,
        ..SwitcherConfig::default()
    };
    let (switcher, bindings) =
        ThemeSwitcher::initialize(&dom, &config, &mut SmallRng::seed_from_u64(seed)).unwrap();
    (dom, switcher, bindings)
}

fn count_in(node: &MemoryNode, names: &[&str]) -> usize {
    node.classes()
        .iter()
        .filter(|c| names.contains(&c.as_str()))
        .count()
}

fn policy_strategy() -> impl Strategy<Value = InitialModePolicy> {
    prop_oneof![Just(InitialModePolicy::ForceDark), Just(InitialModePolicy::Random)]
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Mutual exclusion
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn one_mode_and_one_theme_class_at_all_times(
        seed in any::<u64>(),
        policy in policy_strategy(),
        msgs in prop::collection::vec(msg_strategy(), 0..64),
    ) {
        let (dom, mut switcher, _) = mount(seed, policy);
        prop_assert_eq!(count_in(dom.body(), &Mode::CLASS_NAMES), 1);
        prop_assert_eq!(count_in(dom.body(), &Theme::CLASS_NAMES), 1);

        for msg in msgs {
            switcher.dispatch(msg).unwrap();
            prop_assert_eq!(count_in(dom.body(), &Mode::CLASS_NAMES), 1);
            prop_assert_eq!(count_in(dom.body(), &Theme::CLASS_NAMES), 1);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Last selection wins
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn second_mode_selection_wins(
        seed in any::<u64>(),
        m1 in mode_strategy(),
        m2 in mode_strategy()
    ) {
        let (dom, mut switcher, _) = mount(seed, InitialModePolicy::Random);
        switcher.set_mode(m1).unwrap();
        switcher.set_mode(m2).unwrap();
        prop_assert!(dom.body().contains(m2.class_name()));
        prop_assert_eq!(count_in(dom.body(), &Mode::CLASS_NAMES), 1);
    }

    #[test]
    fn second_theme_selection_wins(
        seed in any::<u64>(),
        t1 in theme_strategy(),
        t2 in theme_strategy()
    ) {
        let (dom, mut switcher, _) = mount(seed, InitialModePolicy::ForceDark);
        switcher.set_theme(t1).unwrap();
        switcher.set_theme(t2).unwrap();
        prop_assert!(dom.body().contains(t2.class_name()));
        prop_assert_eq!(count_in(dom.body(), &Theme::CLASS_NAMES), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Panel parity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn panel_open_iff_odd_toggles(seed in any::<u64>(), clicks in 0usize..40) {
        let (_dom, mut switcher, bindings) = mount(seed, InitialModePolicy::ForceDark);
        for _ in 0..clicks {
            switcher.toggle_panel_open().unwrap();
        }
        prop_assert_eq!(bindings.wrapper.contains(OPEN_CLASS), clicks % 2 == 1);
        prop_assert_eq!(switcher.state().panel_open, clicks % 2 == 1);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Foreign classes survive
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn foreign_root_classes_are_preserved(
        seed in any::<u64>(),
        msgs in prop::collection::vec(msg_strategy(), 0..32),
    ) {
        let (dom, mut switcher, _) = mount(seed, InitialModePolicy::Random);
        for msg in msgs {
            switcher.dispatch(msg).unwrap();
        }
        prop_assert!(dom.body().contains("page-shell"));
        prop_assert!(dom.body().contains("js"));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. State and DOM agree
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rendered_classes_mirror_pure_state(
        seed in any::<u64>(),
        msgs in prop::collection::vec(msg_strategy(), 0..48),
    ) {
        let (dom, mut switcher, bindings) = mount(seed, InitialModePolicy::Random);
        let mut shadow: SwitcherState = switcher.state();
        for msg in msgs {
            shadow.update(msg);
            switcher.dispatch(msg).unwrap();
        }
        prop_assert_eq!(switcher.state(), shadow);

        let presentation = switcher.presentation();
        for class in presentation.classes(Target::Root) {
            prop_assert!(dom.body().contains(class));
        }
        prop_assert_eq!(bindings.wrapper.contains(OPEN_CLASS), shadow.panel_open);
        prop_assert_eq!(bindings.slider.contains("is-change"), shadow.slider_changing);
    }
}
