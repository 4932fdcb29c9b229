#![forbid(unsafe_code)]

//! Light/dark mode.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page mode. Exactly one is applied to the root at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    /// Every mode, in declaration order.
    pub const ALL: [Mode; 2] = [Mode::Light, Mode::Dark];

    /// Every root class a mode can produce.
    pub const CLASS_NAMES: [&'static str; 2] = ["mode-light", "mode-dark"];

    /// Value used in `data-mode` annotations.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Root class for this mode.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        Self::CLASS_NAMES[self as usize]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Annotation value that is not one of [`Mode::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode {0:?} (expected \"light\" or \"dark\")")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseModeError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_follow_declaration_order() {
        assert_eq!(Mode::Light.class_name(), "mode-light");
        assert_eq!(Mode::Dark.class_name(), "mode-dark");
    }

    #[test]
    fn parse_is_lenient_about_case_and_whitespace() {
        assert_eq!(" Dark ".parse::<Mode>(), Ok(Mode::Dark));
        assert_eq!("LIGHT".parse::<Mode>(), Ok(Mode::Light));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        let err = "dim".parse::<Mode>().unwrap_err();
        assert_eq!(err, ParseModeError("dim".into()));
        assert!(err.to_string().contains("dim"));
        assert!("mode-dark".parse::<Mode>().is_err());
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn serde_uses_annotation_values() {
        assert_eq!(serde_json::to_string(&Mode::Light).unwrap(), "\"light\"");
        let mode: Mode = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(mode, Mode::Dark);
    }
}
