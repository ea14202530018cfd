//! # autovalidator
//!
//! Declarative member validation with error messages synthesized from the
//! call site.
//!
//! ## Quick Start
//!
//! ```rust
//! use autovalidator::prelude::*;
//!
//! struct Model {
//!     name: String,
//!     age: i32,
//! }
//!
//! let mut builder = ValidationBuilder::<Model>::new();
//! builder
//!     .for_member_check(member!(|m| m.name), check!(|n, exp| exp.max_length(n, 3, None)))?
//!     .for_member(member!(|m| m.age), |age| *age >= 0, None)?;
//!
//! let result = builder.validate(&Model { name: "Jon Hawkins".into(), age: -1 });
//! assert_eq!(result.error("name"), Some("name should not be longer than 3"));
//! assert_eq!(result.error("age"), Some("|m| m.age did not pass validation"));
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! ## How messages are built
//!
//! [`check!`] records a built-in check call as a [`CallDescriptor`] instead
//! of running it. When the constraint is added, the descriptor is matched
//! against the [`BuiltinCheck`] catalog: literal bounds and the member name
//! become template arguments, and a literal message override replaces the
//! catalog template. The failing value is appended when a check fails.
//!
//! ## Built-in Checks
//!
//! | Check | Default message |
//! |-------|-----------------|
//! | `is_email_address` | `Invalid Email` |
//! | `not_null_or_empty` | `{0} can't be null or empty` |
//! | `max_length` | `{1} should not be longer than {0}` |
//! | `min_length` | `{1} must be at least {0}` |
//! | `min_value` | `{1} should be at least {0}` |
//! | `ignore` | `(ignored)` |
//!
//! ## Profiles
//!
//! [`ValidatorRegistry`] groups maps into [`ValidationProfile`]s and
//! dispatches validation by type; see [`profile`].

// Lets `::autovalidator::...` paths emitted by the macros resolve inside this crate.
extern crate self as autovalidator;

pub mod builder;
pub mod catalog;
pub mod constraint;
pub mod descriptor;
pub mod error;
pub mod matcher;
pub mod member;
pub mod message;
pub mod prelude;
pub mod profile;
pub mod result;
pub mod settings;

pub use builder::ValidationBuilder;
pub use catalog::{BuiltinCheck, Checks, Param, TextValue};
pub use constraint::{BuiltinCall, Constraint, ErrorMessage};
pub use descriptor::{ArgSlot, CallDescriptor, Literal};
pub use error::{ConfigError, ProfileError};
pub use matcher::match_call;
pub use member::{MemberId, MemberSelector, SelectorExpr, resolve_member};
pub use message::{MessageTemplate, TemplateValue, format_positional};
pub use profile::{
    ConfigurationIssue, ConfigurationPolicy, DuplicateMemberPolicy, MapBuilder, MapSummary,
    PermissivePolicy, ProfileConfig, ProfileValidationResult, ValidationProfile, ValidatorRegistry,
};
pub use result::ValidationResult;
pub use settings::ValidationSettings;

#[cfg(feature = "derive")]
pub use autovalidator_macros::{check, member};
