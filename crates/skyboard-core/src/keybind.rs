//! Keybind token lists and `+` notation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered key-name tokens pressed together as one action.
///
/// Tokens are always non-empty and upper-case. Order is the order in which
/// the firmware presses the keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keybind(Vec<String>);

impl Keybind {
    /// An unconfigured keybind.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parse `+` notation such as `"F3+C"` or `"shift + f3"`.
    ///
    /// Blank segments are skipped, so `"F3++C"` and `" "` are accepted.
    pub fn parse(s: &str) -> Self {
        Self::from_tokens(s.split('+'))
    }

    /// Build from already split tokens, normalizing each one.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tokens
                .into_iter()
                .map(|t| t.as_ref().trim().to_uppercase())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Normalize a keybind that may have bypassed the constructors (e.g. serde).
    pub(crate) fn normalized(self) -> Self {
        Self::from_tokens(self.0)
    }
}

impl fmt::Display for Keybind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("+"))
    }
}

impl From<&str> for Keybind {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plus_notation() {
        let kb = Keybind::parse("F3+C");
        assert_eq!(kb.tokens(), ["F3", "C"]);
    }

    #[test]
    fn test_parse_normalizes_case_and_spaces() {
        let kb = Keybind::parse(" shift + f3 +f ");
        assert_eq!(kb.tokens(), ["SHIFT", "F3", "F"]);
    }

    #[test]
    fn test_parse_skips_blank_segments() {
        assert_eq!(Keybind::parse("F3++C").tokens(), ["F3", "C"]);
        assert!(Keybind::parse("").is_empty());
        assert!(Keybind::parse("  +  ").is_empty());
    }

    #[test]
    fn test_display_joins_with_plus() {
        let kb = Keybind::from_tokens(["ctrl", "alt", "delete"]);
        assert_eq!(kb.to_string(), "CTRL+ALT+DELETE");
        assert_eq!(Keybind::empty().to_string(), "");
    }

    #[test]
    fn test_display_parse_round_trip() {
        let kb = Keybind::from_tokens(["SHIFT", "F3"]);
        assert_eq!(Keybind::parse(&kb.to_string()), kb);
    }

    #[test]
    fn test_serde_is_plain_array() {
        let kb = Keybind::from_tokens(["F3", "G"]);
        assert_eq!(serde_json::to_string(&kb).unwrap(), r#"["F3","G"]"#);

        let back: Keybind = serde_json::from_str(r#"["f3", ""]"#).unwrap();
        assert_eq!(back.normalized().tokens(), ["F3"]);
    }
}
