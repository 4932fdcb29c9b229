#![forbid(unsafe_code)]

//! Seams between the switcher and whatever document it runs against.

use core::str::FromStr;

use crate::config::{RootTarget, SwitcherConfig};
use crate::error::{ElementRole, HostError, Result, SwitcherError};
use crate::mode::Mode;
use crate::theme::Theme;

/// One element's class attribute.
///
/// Handles are shared references into a document, so writes go through
/// `&self`.
pub trait ClassList {
    fn contains(&self, class: &str) -> bool;

    fn add(&self, class: &str) -> core::result::Result<(), HostError>;

    fn remove(&self, class: &str) -> core::result::Result<(), HostError>;
}

/// Read-only element lookup.
pub trait DomLookup {
    type Node: ClassList + Clone;

    fn root(&self, target: RootTarget) -> Option<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First descendant of `scope` matching `selector`.
    fn query(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// Every descendant of `scope` matching `selector`, in document order.
    fn query_all(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
}

/// A clickable mode option and the mode it selects.
#[derive(Debug, Clone)]
pub struct ModeOption<N> {
    pub node: N,
    pub mode: Mode,
}

/// A clickable theme option and the theme it selects.
#[derive(Debug, Clone)]
pub struct ThemeOption<N> {
    pub node: N,
    pub theme: Theme,
}

/// Every element the switcher needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Bindings<N> {
    pub root: N,
    pub wrapper: N,
    pub toggle: N,
    pub slider: N,
    pub mode_options: Vec<ModeOption<N>>,
    pub theme_options: Vec<ThemeOption<N>>,
}

impl<N: ClassList + Clone> Bindings<N> {
    /// Resolve the DOM contract described by `config`.
    ///
    /// Reads only. Option annotations are parsed here so click handlers
    /// never see an unknown value.
    pub fn locate<D>(dom: &D, config: &SwitcherConfig) -> Result<Self>
    where
        D: DomLookup<Node = N>,
    {
        let root = dom.root(config.root).ok_or_else(|| {
            SwitcherError::missing(
                ElementRole::Root,
                match config.root {
                    RootTarget::Body => "document.body",
                    RootTarget::DocumentElement => "document.documentElement",
                },
            )
        })?;
        let wrapper = dom.element_by_id(&config.wrapper_id).ok_or_else(|| {
            SwitcherError::missing(ElementRole::Wrapper, format!("#{}", config.wrapper_id))
        })?;
        let toggle = dom.element_by_id(&config.toggle_id).ok_or_else(|| {
            SwitcherError::missing(ElementRole::Toggle, format!("#{}", config.toggle_id))
        })?;
        let slider = dom
            .query(&wrapper, &config.slider_selector)
            .ok_or_else(|| {
                SwitcherError::missing(ElementRole::Slider, config.slider_selector.clone())
            })?;

        let mode_options = annotated_options::<D, Mode>(
            dom,
            &wrapper,
            &config.mode_attribute,
            &config.mode_selector(),
            ElementRole::ModeOption,
        )?
        .into_iter()
        .map(|(node, mode)| ModeOption { node, mode })
        .collect();
        let theme_options = annotated_options::<D, Theme>(
            dom,
            &wrapper,
            &config.theme_attribute,
            &config.theme_selector(),
            ElementRole::ThemeOption,
        )?
        .into_iter()
        .map(|(node, theme)| ThemeOption { node, theme })
        .collect();

        Ok(Self {
            root,
            wrapper,
            toggle,
            slider,
            mode_options,
            theme_options,
        })
    }
}

fn annotated_options<D, T>(
    dom: &D,
    scope: &D::Node,
    attribute: &str,
    selector: &str,
    role: ElementRole,
) -> Result<Vec<(D::Node, T)>>
where
    D: DomLookup,
    T: FromStr,
{
    let nodes = dom.query_all(scope, selector);
    if nodes.is_empty() {
        return Err(SwitcherError::missing(role, selector));
    }
    nodes
        .into_iter()
        .map(|node| {
            let raw = dom.attribute(&node, attribute).unwrap_or_default();
            match raw.parse::<T>() {
                Ok(value) => Ok((node, value)),
                Err(_) => Err(SwitcherError::InvalidOption {
                    role,
                    attribute: attribute.to_owned(),
                    value: raw,
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDom, MemoryNode};

    fn dashboard() -> MemoryDom {
        MemoryDom::dashboard()
    }

    #[test]
    fn locate_resolves_the_stock_markup() {
        let dom = dashboard();
        let bindings = Bindings::locate(&dom, &SwitcherConfig::default()).unwrap();
        assert_eq!(bindings.root.tag(), "body");
        assert_eq!(bindings.wrapper.id().as_deref(), Some("theme-switcher-wrapper"));
        assert_eq!(bindings.toggle.id().as_deref(), Some("theme-switcher-button"));
        let modes: Vec<Mode> = bindings.mode_options.iter().map(|o| o.mode).collect();
        assert_eq!(modes, Mode::ALL);
        let themes: Vec<Theme> = bindings.theme_options.iter().map(|o| o.theme).collect();
        assert_eq!(themes, Theme::ALL);
    }

    #[test]
    fn locate_uses_document_element_when_configured() {
        let dom = dashboard();
        let config = SwitcherConfig {
            root: RootTarget::DocumentElement,
            ..SwitcherConfig::default()
        };
        let bindings = Bindings::locate(&dom, &config).unwrap();
        assert_eq!(bindings.root.tag(), "html");
    }

    #[test]
    fn missing_toggle_is_reported_by_id() {
        let dom = dashboard();
        dom.remove_by_id("theme-switcher-button");
        let err = Bindings::locate(&dom, &SwitcherConfig::default()).unwrap_err();
        match err {
            SwitcherError::MissingElement { role, lookup } => {
                assert_eq!(role, ElementRole::Toggle);
                assert_eq!(lookup, "#theme-switcher-button");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn slider_outside_wrapper_does_not_count() {
        let dom = MemoryDom::new();
        let wrapper = MemoryNode::new("div").with_id("theme-switcher-wrapper");
        wrapper.append(MemoryNode::new("a").with_attr("data-mode", "dark"));
        wrapper.append(MemoryNode::new("a").with_attr("data-theme", "red"));
        dom.body().append(wrapper);
        dom.body().append(MemoryNode::new("button").with_id("theme-switcher-button"));
        dom.body().append(MemoryNode::new("span").with_attr("data-slider", ""));

        let err = Bindings::locate(&dom, &SwitcherConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SwitcherError::MissingElement {
                role: ElementRole::Slider,
                ..
            }
        ));
    }

    #[test]
    fn empty_theme_set_counts_as_missing() {
        let dom = dashboard();
        for theme in Theme::ALL {
            dom.remove_matching(&format!("[data-theme={}]", theme.as_str()));
        }
        let err = Bindings::locate(&dom, &SwitcherConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "missing theme option element ([data-theme])");
    }

    #[test]
    fn missing_custom_mode_options_report_the_configured_selector() {
        let dom = dashboard();
        let config = SwitcherConfig {
            mode_attribute: "data-scheme".into(),
            ..SwitcherConfig::default()
        };
        let err = Bindings::locate(&dom, &config).unwrap_err();
        match err {
            SwitcherError::MissingElement { role, lookup } => {
                assert_eq!(role, ElementRole::ModeOption);
                assert_eq!(lookup, config.mode_selector());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_annotation_is_rejected_up_front() {
        let dom = dashboard();
        let wrapper = dom.element_by_id("theme-switcher-wrapper").unwrap();
        wrapper.append(MemoryNode::new("a").with_attr("data-theme", "magenta"));
        let err = Bindings::locate(&dom, &SwitcherConfig::default()).unwrap_err();
        match err {
            SwitcherError::InvalidOption {
                role,
                attribute,
                value,
            } => {
                assert_eq!(role, ElementRole::ThemeOption);
                assert_eq!(attribute, "data-theme");
                assert_eq!(value, "magenta");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
