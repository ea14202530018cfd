//! Prelude module for convenient imports.
//!
//! `use autovalidator::prelude::*;` brings in the builder, the call-site
//! macros, the result types and the profile registry.

// ============================================================================
// BUILDER AND RESULT
// ============================================================================

pub use crate::builder::ValidationBuilder;
pub use crate::result::ValidationResult;
pub use crate::settings::ValidationSettings;

// ============================================================================
// ERRORS
// ============================================================================

pub use crate::error::{ConfigError, ProfileError};

// ============================================================================
// CHECKS
// ============================================================================

pub use crate::catalog::{BuiltinCheck, Checks, TextValue};
pub use crate::message::TemplateValue;

// ============================================================================
// PROFILES
// ============================================================================

pub use crate::profile::{
    DuplicateMemberPolicy, PermissivePolicy, ProfileConfig, ValidationProfile, ValidatorRegistry,
};

// ============================================================================
// MACROS
// ============================================================================

#[cfg(feature = "derive")]
pub use crate::{check, member};
