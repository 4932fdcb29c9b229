#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the theme switcher.
//!
//! This module wraps [`themeswitch_core::ThemeSwitcher`] with JS-friendly
//! types. Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use js_sys::{Object, Reflect};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use themeswitch_core::{Mode, SwitcherMsg, Theme, ThemeSwitcher, telemetry as counters};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use crate::dom::{DomNode, WebDom, describe_js};
use crate::{parse_config, seed_from_unit_pair};

const LOG_TARGET: &str = "themeswitch.web";

type SharedSwitcher = Rc<RefCell<ThemeSwitcher<DomNode>>>;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Run `msg` from an event callback. Errors are reported, never thrown.
fn dispatch_from_event(switcher: &SharedSwitcher, msg: SwitcherMsg) {
    let Ok(mut switcher) = switcher.try_borrow_mut() else {
        warn!(target: LOG_TARGET, msg = msg.label(), "re-entrant click ignored");
        return;
    };
    if let Err(err) = switcher.dispatch(msg) {
        warn!(target: LOG_TARGET, msg = msg.label(), error = %err, "click handler failed");
        console_error(&format!("theme switcher: {err}"));
    }
}

struct Listener {
    target: Element,
    callback: Closure<dyn FnMut(Event)>,
}

/// Live switcher mounted on the page.
///
/// Holds the click listeners; they stay attached until [`unmount`] is
/// called or the handle is freed.
///
/// [`unmount`]: ThemeSwitcherHandle::unmount
#[wasm_bindgen]
pub struct ThemeSwitcherHandle {
    switcher: SharedSwitcher,
    listeners: Vec<Listener>,
}

/// Resolve the switcher markup in `window.document`, apply a random initial
/// appearance, and attach click listeners.
///
/// `config_json` is an optional JSON object overriding element ids,
/// selectors, the root element, and the initial mode policy. Rejects with
/// an `Error` naming the missing element if the markup is incomplete; no
/// class is written in that case.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<ThemeSwitcherHandle, JsValue> {
    install_panic_hook();

    let config = parse_config(config_json.as_deref()).map_err(js_error)?;
    let dom = WebDom::from_window().ok_or_else(|| js_error("no document to mount into"))?;
    let seed = seed_from_unit_pair(js_sys::Math::random(), js_sys::Math::random());
    let mut rng = SmallRng::seed_from_u64(seed);

    let (switcher, bindings) =
        ThemeSwitcher::initialize(&dom, &config, &mut rng).map_err(js_error)?;

    let mut handle = ThemeSwitcherHandle {
        switcher: Rc::new(RefCell::new(switcher)),
        listeners: Vec::with_capacity(
            1 + bindings.mode_options.len() + bindings.theme_options.len(),
        ),
    };
    // On failure `handle` drops here and detaches whatever was attached.
    handle.listen(bindings.toggle.element(), SwitcherMsg::TogglePanel)?;
    for option in &bindings.mode_options {
        handle.listen(option.node.element(), SwitcherMsg::SelectMode(option.mode))?;
    }
    for option in &bindings.theme_options {
        handle.listen(option.node.element(), SwitcherMsg::SelectTheme(option.theme))?;
    }

    debug!(target: LOG_TARGET, listeners = handle.listeners.len(), "listeners attached");
    Ok(handle)
}

/// Process-wide switcher counters as a plain object.
#[wasm_bindgen]
pub fn telemetry() -> JsValue {
    let snapshot = counters::snapshot();
    let obj = Object::new();
    let fields = [
        ("transitionsTotal", snapshot.transitions_total),
        ("panelTogglesTotal", snapshot.panel_toggles_total),
        ("modeChangesTotal", snapshot.mode_changes_total),
        ("themeChangesTotal", snapshot.theme_changes_total),
        ("classWritesTotal", snapshot.class_writes_total),
    ];
    for (key, value) in fields {
        set_js(&obj, key, JsValue::from_f64(value as f64));
    }
    obj.into()
}

impl ThemeSwitcherHandle {
    fn listen(&mut self, target: &Element, msg: SwitcherMsg) -> Result<(), JsValue> {
        let switcher = Rc::clone(&self.switcher);
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            dispatch_from_event(&switcher, msg);
        });
        target.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            callback,
        });
        Ok(())
    }

    fn with_switcher<F>(&self, f: F) -> Result<(), JsValue>
    where
        F: FnOnce(&mut ThemeSwitcher<DomNode>) -> themeswitch_core::Result<()>,
    {
        let mut switcher = self
            .switcher
            .try_borrow_mut()
            .map_err(|_| js_error("theme switcher is busy"))?;
        f(&mut *switcher).map_err(js_error)
    }

    fn detach_all(&mut self) -> usize {
        let count = self.listeners.len();
        for listener in self.listeners.drain(..) {
            if let Err(err) = listener.target.remove_event_listener_with_callback(
                "click",
                listener.callback.as_ref().unchecked_ref(),
            ) {
                warn!(target: LOG_TARGET, error = %describe_js(&err), "failed to detach listener");
            }
        }
        count
    }
}

#[wasm_bindgen]
impl ThemeSwitcherHandle {
    /// Same as clicking the toggle button.
    #[wasm_bindgen(js_name = togglePanel)]
    pub fn toggle_panel(&self) -> Result<(), JsValue> {
        self.with_switcher(|switcher| switcher.toggle_panel_open())
    }

    /// Same as clicking the mode option annotated with `mode`.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: Mode = mode.parse().map_err(js_error)?;
        self.with_switcher(|switcher| switcher.set_mode(mode))
    }

    /// Same as clicking the theme option annotated with `theme`.
    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&self, theme: &str) -> Result<(), JsValue> {
        let theme: Theme = theme.parse().map_err(js_error)?;
        self.with_switcher(|switcher| switcher.set_theme(theme))
    }

    /// Snapshot: `{ panelOpen, mode, theme, sliderChanging }`.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        let state = self
            .switcher
            .try_borrow()
            .map_err(|_| js_error("theme switcher is busy"))?
            .state();
        let obj = Object::new();
        set_js(&obj, "panelOpen", JsValue::from_bool(state.panel_open));
        set_js(&obj, "mode", JsValue::from_str(state.mode.as_str()));
        set_js(&obj, "theme", JsValue::from_str(state.theme.as_str()));
        set_js(&obj, "sliderChanging", JsValue::from_bool(state.slider_changing));
        Ok(obj.into())
    }

    /// Re-apply the current state to every target.
    pub fn render(&self) -> Result<(), JsValue> {
        self.with_switcher(|switcher| switcher.render().map(drop))
    }

    /// Detach every click listener. Classes stay as they are. Returns the
    /// number of listeners removed.
    pub fn unmount(&mut self) -> usize {
        let count = self.detach_all();
        debug!(target: LOG_TARGET, listeners = count, "theme switcher unmounted");
        count
    }

    /// Listeners currently attached.
    #[wasm_bindgen(getter, js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Drop for ThemeSwitcherHandle {
    fn drop(&mut self) {
        self.detach_all();
    }
}
