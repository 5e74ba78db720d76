//! Light/dark color scheme flag

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color scheme (light or dark mode)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

impl ColorScheme {
    /// The other scheme
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    /// Persisted representation
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored value is neither `"light"` nor `"dark"`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color scheme `{0}`")]
pub struct ParseSchemeError(pub String);

impl FromStr for ColorScheme {
    type Err = ParseSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            other => Err(ParseSchemeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark() {
        assert_eq!(ColorScheme::default(), ColorScheme::Dark);
    }

    #[test]
    fn test_toggle_round_trips() {
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            assert_ne!(scheme.toggle(), scheme);
            assert_eq!(scheme.toggle().toggle(), scheme);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("dark".parse(), Ok(ColorScheme::Dark));
        assert_eq!(" light ".parse(), Ok(ColorScheme::Light));
        assert!("Dark".parse::<ColorScheme>().is_err());
    }
}
