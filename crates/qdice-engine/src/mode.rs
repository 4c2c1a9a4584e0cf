//! Measurement modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the qubit is prepared before it is measured.
///
/// Mode names are matched exactly. Anything unrecognized is kept as
/// [`Mode::Other`] and leaves the qubit in `|0⟩`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    /// Hadamard: a fair coin, whatever the probability.
    #[default]
    Superposition,
    /// Y-rotation biased towards `1` with the requested probability.
    Navigation,
    /// Same preparation as [`Mode::Navigation`].
    Tunneling,
    /// No preparation; always measures `0`.
    Other(String),
}

impl Mode {
    /// Parse a mode name. Never fails.
    pub fn parse(name: &str) -> Self {
        match name {
            "superposition" => Mode::Superposition,
            "navigation" => Mode::Navigation,
            "tunneling" => Mode::Tunneling,
            other => Mode::Other(other.to_string()),
        }
    }

    /// The mode name as supplied.
    pub fn as_str(&self) -> &str {
        match self {
            Mode::Superposition => "superposition",
            Mode::Navigation => "navigation",
            Mode::Tunneling => "tunneling",
            Mode::Other(name) => name,
        }
    }

    /// Whether the preparation depends on the requested probability.
    pub fn uses_probability(&self) -> bool {
        matches!(self, Mode::Navigation | Mode::Tunneling)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Mode {
    fn from(name: &str) -> Self {
        Mode::parse(name)
    }
}

impl From<String> for Mode {
    fn from(name: String) -> Self {
        Mode::parse(&name)
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!(Mode::parse("superposition"), Mode::Superposition);
        assert_eq!(Mode::parse("navigation"), Mode::Navigation);
        assert_eq!(Mode::parse("tunneling"), Mode::Tunneling);
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Mode::parse("Navigation"), Mode::Other("Navigation".into()));
        assert_eq!(Mode::parse(""), Mode::Other(String::new()));
        assert_eq!(Mode::parse("warp").as_str(), "warp");
    }

    #[test]
    fn test_uses_probability() {
        assert!(Mode::Navigation.uses_probability());
        assert!(Mode::Tunneling.uses_probability());
        assert!(!Mode::Superposition.uses_probability());
        assert!(!Mode::parse("warp").uses_probability());
    }

    #[test]
    fn test_serde_as_string() {
        let mode: Mode = serde_json::from_str("\"tunneling\"").unwrap();
        assert_eq!(mode, Mode::Tunneling);
        assert_eq!(serde_json::to_string(&Mode::parse("x")).unwrap(), "\"x\"");
    }
}
