//! Validation settings
//!
//! Settings are opaque to the engine: they are carried from
//! [`validate_with`](crate::ValidationBuilder::validate_with) into the
//! resulting [`ValidationResult`](crate::ValidationResult) unchanged so
//! callers can tell which configuration produced a result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Caller-supplied settings for one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Locale tag the caller renders messages for, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Free-form options.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl ValidationSettings {
    /// Empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Adds an option, replacing any previous value for `key`.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Looks up an option.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Parses settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods() {
        let settings = ValidationSettings::new()
            .with_locale("en-GB")
            .with_option("source", "signup");
        assert_eq!(settings.locale.as_deref(), Some("en-GB"));
        assert_eq!(settings.option("source"), Some("signup"));
        assert_eq!(settings.option("missing"), None);
    }

    #[test]
    fn json_defaults_missing_fields() {
        let settings = ValidationSettings::from_json(r#"{"locale":"nb"}"#).unwrap();
        assert_eq!(settings, ValidationSettings::new().with_locale("nb"));
        assert_eq!(ValidationSettings::from_json("{}").unwrap(), ValidationSettings::default());
        assert!(ValidationSettings::from_json("[").is_err());
    }

    #[test]
    fn serializes_only_set_fields() {
        let json = serde_json::to_string(&ValidationSettings::new().with_option("a", "b")).unwrap();
        assert_eq!(json, r#"{"options":{"a":"b"}}"#);
    }
}
