use std::fmt;

use serde::{Deserialize, Serialize};

// the theme signal
//
// the active theme lives in a single attribute on the document root (or on a themed wrapper
// nested somewhere below it).  light is the default, so the attribute may be missing entirely
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn all() -> Vec<Self> {
        vec![Self::Light, Self::Dark]
    }

    // interpret the current attribute value, where None means the attribute is absent
    pub fn from_attribute(value: Option<&str>) -> Option<Self> {
        match value.map(str::trim) {
            Some("light") => Some(Self::Light),
            Some("dark") => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_attribute(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_attribute())
    }
}
