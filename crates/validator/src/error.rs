//! Configuration-time errors
//!
//! Everything in this module is raised while a builder or registry is being
//! configured. A failed validation is never an error: it is recorded in a
//! [`ValidationResult`](crate::ValidationResult).

// ============================================================================
// CONFIG ERROR
// ============================================================================

/// Error raised by `for_member*` calls when a constraint cannot be built.
///
/// These are structural mistakes in how the builder was used. They surface
/// synchronously and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The selector reaches through an intermediate member access.
    #[error(
        "expression `{expression}` must resolve to a top-level member and not any child object's members; \
         configure the child type with its own validation builder instead"
    )]
    InvalidSelector {
        /// Rendered selector expression.
        expression: String,
    },

    /// The selector is not reducible to a single top-level member access.
    #[error(
        "custom configuration for members is only supported for top-level individual members on a type, got `{expression}`"
    )]
    UnsupportedSelectorShape {
        /// Rendered selector expression.
        expression: String,
    },

    /// The call descriptor names no check in the catalog (or has the wrong arity).
    #[error("unknown built-in check `{check}` with {arity} argument(s)")]
    UnknownBuiltinCheck {
        /// Check name as written at the call site.
        check: String,
        /// Number of arguments in the descriptor.
        arity: usize,
    },

    /// A slot that must hold a literal holds a computed expression.
    #[error(
        "argument {position} of `{check}` must be a literal so the message can be built up front, got `{expression}`"
    )]
    NonLiteralArgument {
        /// Check name.
        check: String,
        /// Zero-based argument position.
        position: usize,
        /// Source text of the offending argument.
        expression: String,
    },
}

impl ConfigError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidSelector { .. } | Self::UnsupportedSelectorShape { .. } => "selector",
            Self::UnknownBuiltinCheck { .. } | Self::NonLiteralArgument { .. } => "check",
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSelector { .. } => "VALIDATOR_INVALID_SELECTOR",
            Self::UnsupportedSelectorShape { .. } => "VALIDATOR_UNSUPPORTED_SELECTOR",
            Self::UnknownBuiltinCheck { .. } => "VALIDATOR_UNKNOWN_CHECK",
            Self::NonLiteralArgument { .. } => "VALIDATOR_NON_LITERAL_ARGUMENT",
        }
    }
}

// ============================================================================
// PROFILE ERROR
// ============================================================================

/// Error raised by the [`ValidatorRegistry`](crate::profile::ValidatorRegistry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ProfileError {
    /// No registered profile maps the requested type.
    #[error("no validation profile maps type `{type_name}`")]
    NotRegistered {
        /// Fully qualified type name.
        type_name: &'static str,
    },

    /// The configuration policy reported problems.
    #[error("validation configuration is invalid: {}", issues.join("; "))]
    InvalidConfiguration {
        /// One rendered line per issue.
        issues: Vec<String>,
    },

    /// A profile failed while configuring its maps.
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

// ============================================================================
// TESTS
// ============================================================================
