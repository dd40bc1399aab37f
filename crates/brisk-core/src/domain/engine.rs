//! Renderer selection.
//!
//! The configured `RENDERER` string is turned into a [`RenderEngine`] once,
//! during bootstrap. Request-time dispatch matches on the enum and never
//! compares strings again.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Template dialect and lookup convention used to produce pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderEngine {
    /// One file per page at `views/<page>.page.tmpl`, parsed on every call.
    GoNative,
    /// Pre-compiled `views/**/*.jet` set with per-call variables.
    Extended,
    /// No recognized engine configured. Every render succeeds and writes
    /// nothing.
    #[default]
    Unknown,
}

impl RenderEngine {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GoNative => "go-native",
            Self::Extended => "extended-template",
            Self::Unknown => "unknown",
        }
    }

    /// Select the engine for a configured renderer name.
    ///
    /// Case-insensitive and total: names that match no engine (including the
    /// empty string) select [`RenderEngine::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "go" | "go-native" => Self::GoNative,
            "jet" | "extended" | "extended-template" => Self::Extended,
            _ => Self::Unknown,
        }
    }

    /// Whether pages will actually be rendered.
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for RenderEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderEngine {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_names_select_native_engine() {
        assert_eq!(RenderEngine::from_name("go"), RenderEngine::GoNative);
        assert_eq!(RenderEngine::from_name("GO"), RenderEngine::GoNative);
        assert_eq!(RenderEngine::from_name("Go-Native"), RenderEngine::GoNative);
    }

    #[test]
    fn jet_names_select_extended_engine() {
        assert_eq!(RenderEngine::from_name("jet"), RenderEngine::Extended);
        assert_eq!(RenderEngine::from_name("JET"), RenderEngine::Extended);
        assert_eq!(
            RenderEngine::from_name("extended-template"),
            RenderEngine::Extended
        );
    }

    #[test]
    fn unrecognized_names_are_unknown() {
        assert_eq!(RenderEngine::from_name(""), RenderEngine::Unknown);
        assert_eq!(RenderEngine::from_name("handlebars"), RenderEngine::Unknown);
        assert!(!RenderEngine::Unknown.is_enabled());
    }

    #[test]
    fn from_str_never_fails() {
        let engine: RenderEngine = "whatever".parse().unwrap();
        assert_eq!(engine, RenderEngine::Unknown);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(RenderEngine::Extended.to_string(), "extended-template");
    }
}
