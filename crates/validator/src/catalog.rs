//! Built-in check catalog
//!
//! The catalog is closed: [`BuiltinCheck`] lists every check whose error
//! message can be synthesized from the call site, and [`Checks`] is the
//! handle whose methods actually run them. A method name on [`Checks`] is the
//! check's catalog name, which is what [`check!`](crate::check) records.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("email pattern is a valid regex")
});

// ============================================================================
// PARAMETER LAYOUT
// ============================================================================

/// Role of one positional parameter of a built-in check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    /// The member value under test.
    Value,
    /// A literal bound captured into the message arguments.
    Bound,
    /// Optional message override; always the last parameter.
    Message,
}

// ============================================================================
// BUILTIN CHECK
// ============================================================================

/// Closed set of checks with synthesized messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BuiltinCheck {
    /// Text is a syntactically valid email address.
    IsEmailAddress,
    /// Text is present and non-empty.
    NotNullOrEmpty,
    /// Text length does not exceed a bound.
    MaxLength,
    /// Text length reaches a bound.
    MinLength,
    /// Value is at least a bound.
    MinValue,
    /// Always passes.
    Ignore,
}

impl BuiltinCheck {
    /// Every catalog entry.
    pub const ALL: [Self; 6] = [
        Self::IsEmailAddress,
        Self::NotNullOrEmpty,
        Self::MaxLength,
        Self::MinLength,
        Self::MinValue,
        Self::Ignore,
    ];

    /// Catalog name, identical to the [`Checks`] method name.
    pub fn name(self) -> &'static str {
        match self {
            Self::IsEmailAddress => "is_email_address",
            Self::NotNullOrEmpty => "not_null_or_empty",
            Self::MaxLength => "max_length",
            Self::MinLength => "min_length",
            Self::MinValue => "min_value",
            Self::Ignore => "ignore",
        }
    }

    /// Looks a check up by catalog name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|check| check.name() == name)
    }

    /// Message template used when no override is given.
    ///
    /// Placeholders: bounds first, then the member name, then the member value.
    pub fn default_template(self) -> &'static str {
        match self {
            Self::IsEmailAddress => "Invalid Email",
            Self::NotNullOrEmpty => "{0} can't be null or empty",
            Self::MaxLength => "{1} should not be longer than {0}",
            Self::MinLength => "{1} must be at least {0}",
            Self::MinValue => "{1} should be at least {0}",
            Self::Ignore => "(ignored)",
        }
    }

    /// Positional parameter layout of the check method.
    pub fn parameters(self) -> &'static [Param] {
        match self {
            Self::IsEmailAddress | Self::NotNullOrEmpty => &[Param::Value, Param::Message],
            Self::MaxLength | Self::MinLength | Self::MinValue => {
                &[Param::Value, Param::Bound, Param::Message]
            }
            Self::Ignore => &[],
        }
    }

    /// Number of arguments a call must have.
    pub fn arity(self) -> usize {
        self.parameters().len()
    }
}

impl fmt::Display for BuiltinCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// TEXT VALUE
// ============================================================================

/// Member types the text checks accept. `None` means the text is absent.
pub trait TextValue {
    /// Borrowed text, or `None` when absent.
    fn text(&self) -> Option<&str>;
}

impl TextValue for str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextValue for String {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextValue for Cow<'_, str> {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextValue for Box<str> {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextValue for Option<String> {
    fn text(&self) -> Option<&str> {
        self.as_deref()
    }
}

impl TextValue for Option<&str> {
    fn text(&self) -> Option<&str> {
        *self
    }
}

impl<T: TextValue + ?Sized> TextValue for &T {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
}

// ============================================================================
// CHECKS
// ============================================================================

/// Executable side of the catalog.
///
/// The trailing `message` argument of every check is only read from the call
/// descriptor when the constraint is configured; it has no effect here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checks;

impl Checks {
    /// Text matches the email address pattern. Absent text fails.
    pub fn is_email_address<S: TextValue + ?Sized>(&self, value: &S, _message: Option<&str>) -> bool {
        value.text().is_some_and(|text| EMAIL_REGEX.is_match(text))
    }

    /// Text is present and not empty.
    pub fn not_null_or_empty<S: TextValue + ?Sized>(&self, value: &S, _message: Option<&str>) -> bool {
        value.text().is_some_and(|text| !text.is_empty())
    }

    /// Text has at most `max` characters. Absent text has length zero.
    pub fn max_length<S: TextValue + ?Sized>(
        &self,
        value: &S,
        max: usize,
        _message: Option<&str>,
    ) -> bool {
        char_len(value) <= max
    }

    /// Text has at least `min` characters. Absent text has length zero.
    pub fn min_length<S: TextValue + ?Sized>(
        &self,
        value: &S,
        min: usize,
        _message: Option<&str>,
    ) -> bool {
        char_len(value) >= min
    }

    /// Value is greater than or equal to `min`.
    pub fn min_value<N: PartialOrd>(&self, value: &N, min: N, _message: Option<&str>) -> bool {
        *value >= min
    }

    /// Always passes.
    pub fn ignore(&self) -> bool {
        true
    }
}

fn char_len<S: TextValue + ?Sized>(value: &S) -> usize {
    value.text().map_or(0, |text| text.chars().count())
}

// ============================================================================
// TESTS
// ============================================================================
