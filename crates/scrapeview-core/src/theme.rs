//! # Theme Preference
//!
//! Light/dark choice. The only state Scrapeview keeps between runs; the
//! client crate persists it, this module only decides which value wins.
//!
//! ```text
//!   stored preference ──► environment signal ──► Dark
//!   (first present wins)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub const fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(CoreError::UnknownTheme(other.to_string())),
        }
    }
}

/// Picks the theme to start with.
pub fn resolve_theme(stored: Option<Theme>, environment: Option<Theme>) -> Theme {
    stored.or(environment).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_order() {
        assert_eq!(resolve_theme(Some(Theme::Light), Some(Theme::Dark)), Theme::Light);
        assert_eq!(resolve_theme(None, Some(Theme::Light)), Theme::Light);
        assert_eq!(resolve_theme(None, None), Theme::Dark);
    }

    #[test]
    fn test_toggle_and_parse() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
