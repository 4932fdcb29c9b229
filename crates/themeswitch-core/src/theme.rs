#![forbid(unsafe_code)]

//! Named color themes.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color theme. Exactly one is applied to the root at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Orange,
    Purple,
    Green,
    Blue,
    Yellow,
    Red,
    Teal,
    Pink,
}

impl Theme {
    /// Every theme, in declaration order.
    pub const ALL: [Theme; 8] = [
        Theme::Orange,
        Theme::Purple,
        Theme::Green,
        Theme::Blue,
        Theme::Yellow,
        Theme::Red,
        Theme::Teal,
        Theme::Pink,
    ];

    /// Every root class a theme can produce.
    pub const CLASS_NAMES: [&'static str; 8] = [
        "theme-orange",
        "theme-purple",
        "theme-green",
        "theme-blue",
        "theme-yellow",
        "theme-red",
        "theme-teal",
        "theme-pink",
    ];

    /// Value used in `data-theme` annotations.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Orange => "orange",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Teal => "teal",
            Self::Pink => "pink",
        }
    }

    /// Root class for this theme.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        Self::CLASS_NAMES[self as usize]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Annotation value that is not one of [`Theme::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {0:?}")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseThemeError(s.to_owned()))
    }
}
