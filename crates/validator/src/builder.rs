//! Fluent validation builder
//!
//! Constraints are appended per member and evaluated in insertion order.
//! Configuration problems are reported by the `for_member*` call that
//! introduced them; once configured, a builder can validate any number of
//! instances without changing.
//!
//! ```
//! use autovalidator::{check, member, ValidationBuilder};
//!
//! struct SignUp {
//!     email_address: String,
//!     number: i32,
//! }
//!
//! let mut builder = ValidationBuilder::<SignUp>::new();
//! builder
//!     .for_member_check(member!(|m| m.email_address), check!(|e, exp| exp.is_email_address(e, None)))?
//!     .for_member_check(member!(|m| m.number), check!(|n, exp| exp.min_value(n, 5, None)))?;
//!
//! let result = builder.validate(&SignUp {
//!     email_address: "a.com".to_string(),
//!     number: 3,
//! });
//! assert!(!result.success());
//! assert_eq!(result.error("email_address"), Some("Invalid Email"));
//! assert_eq!(result.error("number"), Some("number should be at least 5"));
//! # Ok::<(), autovalidator::ConfigError>(())
//! ```

use std::fmt;

use crate::constraint::{BuiltinCall, Constraint};
use crate::error::ConfigError;
use crate::matcher::match_call;
use crate::member::{MemberId, MemberSelector};
use crate::message::TemplateValue;
use crate::result::ValidationResult;
use crate::settings::ValidationSettings;

/// Ordered set of member constraints for `T`.
pub struct ValidationBuilder<T> {
    constraints: Vec<Constraint<T>>,
}

impl<T: 'static> ValidationBuilder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Adds a predicate over the member value.
    ///
    /// Without `message`, failures read `"<selector> did not pass validation"`.
    pub fn for_member<M, F>(
        &mut self,
        selector: MemberSelector<T, M>,
        predicate: F,
        message: Option<&str>,
    ) -> Result<&mut Self, ConfigError>
    where
        M: 'static,
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.for_member_with_instance(selector, move |value: &M, _: &T| predicate(value), message)
    }

    /// Adds a predicate over the member value and the whole instance.
    pub fn for_member_with_instance<M, F>(
        &mut self,
        selector: MemberSelector<T, M>,
        predicate: F,
        message: Option<&str>,
    ) -> Result<&mut Self, ConfigError>
    where
        M: 'static,
        F: Fn(&M, &T) -> bool + Send + Sync + 'static,
    {
        let (member, accessor) = selector.resolve()?;
        let message = match message {
            Some(message) => message.to_string(),
            None => format!("{selector} did not pass validation"),
        };

        tracing::debug!(member = %member, "registered member predicate");

        self.constraints
            .push(Constraint::predicate(member, message, accessor, predicate));
        Ok(self)
    }

    /// Adds a built-in check captured with [`check!`](crate::check).
    ///
    /// The error message is synthesized from the call right away, so a
    /// non-literal bound or an unknown check fails here rather than during
    /// validation.
    pub fn for_member_check<M>(
        &mut self,
        selector: MemberSelector<T, M>,
        call: BuiltinCall<T, M>,
    ) -> Result<&mut Self, ConfigError>
    where
        M: TemplateValue + 'static,
    {
        let (member, accessor) = selector.resolve()?;
        let descriptor = call.descriptor();
        let template = match_call(descriptor, &member)?;

        tracing::debug!(
            member = %member,
            check = %descriptor,
            "registered built-in check"
        );

        self.constraints
            .push(Constraint::builtin(member, template, accessor, call));
        Ok(self)
    }

    /// Validates `instance` with default settings.
    pub fn validate(&self, instance: &T) -> ValidationResult {
        self.validate_with(instance, &ValidationSettings::default())
    }

    /// Validates `instance`, carrying `settings` into the result.
    ///
    /// Every constraint runs; a later failure on a member replaces an
    /// earlier one.
    pub fn validate_with(&self, instance: &T, settings: &ValidationSettings) -> ValidationResult {
        let mut result = ValidationResult::new(settings.clone());
        for constraint in &self.constraints {
            if let Some(message) = constraint.evaluate(instance) {
                result.add_error(constraint.member().name(), message);
            }
        }

        tracing::trace!(
            type_name = std::any::type_name::<T>(),
            constraints = self.constraints.len(),
            failures = result.error_count(),
            "validated instance"
        );

        result
    }
}

impl<T> ValidationBuilder<T> {
    /// Number of constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if no constraint has been added.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Constrained members in registration order, repeated once per constraint.
    pub fn members(&self) -> impl Iterator<Item = &MemberId> {
        self.constraints.iter().map(Constraint::member)
    }

    /// Registered constraints.
    pub fn constraints(&self) -> &[Constraint<T>] {
        &self.constraints
    }
}

impl<T: 'static> Default for ValidationBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ValidationBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationBuilder")
            .field("type", &std::any::type_name::<T>())
            .field("constraints", &self.constraints)
            .finish()
    }
}
