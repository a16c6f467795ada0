//! Tri-state configuration values
//!
//! The host engine hands provider attributes over in one of three states:
//! not set, not yet computable (the value depends on something elsewhere in
//! the dependency graph that has not been applied), or concretely known.

use std::fmt;

/// A single provider attribute as supplied by the host
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub enum ConfigValue {
    /// The attribute was not set
    #[default]
    Null,
    /// The attribute depends on a value that is not known yet
    Unknown,
    /// The attribute has a concrete value
    Known(String),
}

impl ConfigValue {
    /// Create a known value
    pub fn known(value: impl Into<String>) -> Self {
        ConfigValue::Known(value.into())
    }

    /// Check if the attribute was left unset
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Check if the attribute is not yet knowable
    pub fn is_unknown(&self) -> bool {
        matches!(self, ConfigValue::Unknown)
    }

    /// The concrete value, if there is one
    pub fn as_known(&self) -> Option<&str> {
        match self {
            ConfigValue::Known(value) => Some(value),
            _ => None,
        }
    }

    /// Short state label, safe to log for sensitive attributes
    pub fn state(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Unknown => "unknown",
            ConfigValue::Known(_) => "known",
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Known(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Known(value)
    }
}

impl From<Option<String>> for ConfigValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(ConfigValue::Null, ConfigValue::Known)
    }
}

// Known values may be credentials; the state is all Debug reveals.
impl fmt::Debug for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "Null"),
            ConfigValue::Unknown => write!(f, "Unknown"),
            ConfigValue::Known(_) => write!(f, "Known(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_null() {
        assert!(ConfigValue::default().is_null());
    }

    #[test]
    fn test_state_queries() {
        assert!(ConfigValue::Unknown.is_unknown());
        assert!(!ConfigValue::Unknown.is_null());
        assert_eq!(ConfigValue::known("api.example.com").as_known(), Some("api.example.com"));
        assert_eq!(ConfigValue::Unknown.as_known(), None);
        assert_eq!(ConfigValue::Null.as_known(), None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(ConfigValue::from(None::<String>), ConfigValue::Null);
        assert_eq!(
            ConfigValue::from(Some("https".to_string())),
            ConfigValue::known("https")
        );
    }

    #[test]
    fn test_debug_hides_known_value() {
        let rendered = format!("{:?}", ConfigValue::known("hunter2"));
        assert_eq!(rendered, "Known(..)");
        assert!(!rendered.contains("hunter2"));
    }
}
