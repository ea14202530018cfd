//! Symbolic call descriptors
//!
//! [`check!`](crate::check) records the call to a built-in check as data
//! before any instance exists: the check name plus one [`ArgSlot`] per
//! argument, each either a literal value or the source text of a computed
//! expression.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// LITERAL
// ============================================================================

/// Literal argument value captured at the call site.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `None`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer literal, sign included.
    Int(i128),
    /// Float literal, sign included.
    Float(f64),
    /// Character literal.
    Char(char),
    /// String literal.
    Str(Cow<'static, str>),
}

impl Literal {
    /// String literal.
    pub fn str(value: impl Into<Cow<'static, str>>) -> Self {
        Self::Str(value.into())
    }

    /// Returns the string content of a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` for `None`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Renders the value the way it appears in a message; `None` renders empty.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Char(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

// ============================================================================
// ARG SLOT
// ============================================================================

/// One positional argument of a captured call.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgSlot {
    /// Value known at configuration time.
    Literal(Literal),
    /// Computed expression, kept as source text.
    Opaque(Cow<'static, str>),
}

impl ArgSlot {
    /// Literal slot.
    pub fn literal(value: Literal) -> Self {
        Self::Literal(value)
    }

    /// Non-literal slot.
    pub fn opaque(source: impl Into<Cow<'static, str>>) -> Self {
        Self::Opaque(source.into())
    }

    /// The literal value, if any.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Opaque(_) => None,
        }
    }
}

impl fmt::Display for ArgSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(Literal::Null) => f.write_str("None"),
            Self::Literal(Literal::Str(value)) => write!(f, "{value:?}"),
            Self::Literal(Literal::Char(value)) => write!(f, "{value:?}"),
            Self::Literal(value) => write!(f, "{value}"),
            Self::Opaque(source) => f.write_str(source),
        }
    }
}

// ============================================================================
// CALL DESCRIPTOR
// ============================================================================

/// Unevaluated invocation of a built-in check.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    check: Cow<'static, str>,
    args: Vec<ArgSlot>,
}

impl CallDescriptor {
    /// Creates a descriptor for `check(args..)`.
    pub fn new(check: impl Into<Cow<'static, str>>, args: Vec<ArgSlot>) -> Self {
        Self {
            check: check.into(),
            args,
        }
    }

    /// Check name as written at the call site.
    pub fn check(&self) -> &str {
        &self.check
    }

    /// Positional arguments, the checked value included.
    pub fn args(&self) -> &[ArgSlot] {
        &self.args
    }

    /// Number of arguments.
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for CallDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.check)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}
