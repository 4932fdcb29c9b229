#![forbid(unsafe_code)]

use core::fmt;

use thiserror::Error;

/// Role an element plays in the switcher's DOM contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    Root,
    Wrapper,
    Toggle,
    Slider,
    ModeOption,
    ThemeOption,
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Root => "root",
            Self::Wrapper => "wrapper",
            Self::Toggle => "toggle button",
            Self::Slider => "slider",
            Self::ModeOption => "mode option",
            Self::ThemeOption => "theme option",
        })
    }
}

/// Class-list write that was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassOp {
    Add,
    Remove,
}

impl fmt::Display for ClassOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Remove => "remove",
        })
    }
}

/// A host refused a class-list write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to {op} class {class:?}: {reason}")]
pub struct HostError {
    pub op: ClassOp,
    pub class: String,
    pub reason: String,
}

impl HostError {
    pub fn new(op: ClassOp, class: &str, reason: impl Into<String>) -> Self {
        Self {
            op,
            class: class.to_owned(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SwitcherError {
    /// A required element is absent. Raised before any class is written.
    #[error("missing {role} element ({lookup})")]
    MissingElement { role: ElementRole, lookup: String },
    /// An option element's annotation is absent or not a known value.
    #[error("{role} element has invalid {attribute} annotation {value:?}")]
    InvalidOption {
        role: ElementRole,
        attribute: String,
        value: String,
    },
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("invalid switcher config: {0}")]
    Config(#[from] serde_json::Error),
}

impl SwitcherError {
    pub(crate) fn missing(role: ElementRole, lookup: impl Into<String>) -> Self {
        Self::MissingElement {
            role,
            lookup: lookup.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SwitcherError>;
