//! Validation result
//!
//! A fresh [`ValidationResult`] is produced by every validation pass. Errors
//! are keyed by member name and keep the order in which members first
//! failed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::ValidationSettings;

/// Outcome of validating one instance.
///
/// `success()` is `true` exactly when no errors were recorded. The JSON form
/// carries `success` alongside the errors; input where the two disagree is
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawResult", try_from = "RawResult")]
pub struct ValidationResult {
    errors: IndexMap<String, String>,
    settings: ValidationSettings,
}

#[derive(Serialize, Deserialize)]
struct RawResult {
    #[serde(default)]
    success: Option<bool>,
    errors: IndexMap<String, String>,
    #[serde(default)]
    settings: ValidationSettings,
}

#[derive(Debug, Error)]
#[error("`success` is {success} but {count} error(s) were recorded")]
struct InconsistentResult {
    success: bool,
    count: usize,
}

impl From<ValidationResult> for RawResult {
    fn from(result: ValidationResult) -> Self {
        Self {
            success: Some(result.success()),
            errors: result.errors,
            settings: result.settings,
        }
    }
}

impl TryFrom<RawResult> for ValidationResult {
    type Error = InconsistentResult;

    fn try_from(raw: RawResult) -> Result<Self, Self::Error> {
        match raw.success {
            Some(success) if success != raw.errors.is_empty() => Err(InconsistentResult {
                success,
                count: raw.errors.len(),
            }),
            _ => Ok(Self {
                errors: raw.errors,
                settings: raw.settings,
            }),
        }
    }
}

impl ValidationResult {
    /// Successful result carrying `settings`.
    pub fn new(settings: ValidationSettings) -> Self {
        Self {
            errors: IndexMap::new(),
            settings,
        }
    }

    /// Records a failure for `member`. A later failure for the same member
    /// replaces the earlier message.
    pub fn add_error(&mut self, member: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(member.into(), message.into());
    }

    /// Whether every constraint passed.
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failure messages by member name.
    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    /// Failure message for one member.
    pub fn error(&self, member: &str) -> Option<&str> {
        self.errors.get(member).map(String::as_str)
    }

    /// Number of failing members.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Settings the pass ran with.
    pub fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    /// Consumes the result, returning the error map.
    pub fn into_errors(self) -> IndexMap<String, String> {
        self.errors
    }

    /// Folds the errors of `other` into `self`; entries from `other` win.
    pub fn merge(&mut self, other: Self) {
        for (member, message) in other.errors {
            self.add_error(member, message);
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new(ValidationSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_successful() {
        let result = ValidationResult::new(ValidationSettings::default());
        assert!(result.success());
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn add_error_flips_success_and_last_write_wins() {
        let mut result = ValidationResult::default();
        result.add_error("name", "first");
        result.add_error("age", "second");
        result.add_error("name", "third");

        assert!(!result.success());
        assert_eq!(result.error("name"), Some("third"));
        let members: Vec<_> = result.errors().keys().cloned().collect();
        assert_eq!(members, ["name", "age"]);
    }

    #[test]
    fn merge_keeps_settings_and_combines_errors() {
        let settings = ValidationSettings::new().with_locale("en");
        let mut left = ValidationResult::new(settings.clone());
        left.add_error("name", "a");

        let mut right = ValidationResult::new(ValidationSettings::default());
        right.add_error("name", "b");
        right.add_error("age", "c");

        left.merge(right);
        assert_eq!(left.settings(), &settings);
        assert_eq!(left.error("name"), Some("b"));
        assert_eq!(left.error_count(), 2);
    }

    #[test]
    fn merging_successes_stays_successful() {
        let mut result = ValidationResult::default();
        result.merge(ValidationResult::default());
        assert!(result.success());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn serializes_to_json() {
        let mut result = ValidationResult::new(ValidationSettings::default());
        result.add_error("Number", "Number should be at least 5");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"]["Number"], "Number should be at least 5");
        let back: ValidationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn deserializing_keeps_success_tied_to_errors() {
        let contradictory = [
            r#"{"success":true,"errors":{"name":"bad"}}"#,
            r#"{"success":false,"errors":{}}"#,
        ];
        for json in contradictory {
            let err = serde_json::from_str::<ValidationResult>(json).unwrap_err();
            assert!(err.to_string().contains("`success` is"), "{json}: {err}");
        }

        let inferred: ValidationResult = serde_json::from_str(r#"{"errors":{"name":"bad"}}"#).unwrap();
        assert!(!inferred.success());
        assert_eq!(inferred.success(), inferred.errors().is_empty());
    }
}
