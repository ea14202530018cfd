//! Positional message templates
//!
//! Templates use `{0}`, `{1}`, ... placeholders. Arguments are bound in a
//! fixed order: literal check arguments, then the member name, then (at
//! validation time) the rendered member value.

use std::borrow::Cow;

use smallvec::SmallVec;

// ============================================================================
// FORMATTING
// ============================================================================

/// Substitutes `{N}` placeholders with `args[N]`.
///
/// `{{` and `}}` produce literal braces. Placeholders that are out of range
/// or not a plain index are kept verbatim.
pub fn format_positional<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
            continue;
        }

        // `tail` starts with a single `{`
        match tail[1..].find('}') {
            Some(end) => {
                let inner = &tail[1..=end];
                match inner.parse::<usize>().ok().and_then(|i| args.get(i)) {
                    Some(arg) => out.push_str(arg.as_ref()),
                    None => out.push_str(&tail[..end + 2]),
                }
                rest = &tail[end + 2..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

// ============================================================================
// MESSAGE TEMPLATE
// ============================================================================

/// Template plus the arguments bound at configuration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    template: Cow<'static, str>,
    args: SmallVec<[String; 3]>,
}

impl MessageTemplate {
    /// Creates a template with pre-bound arguments.
    pub fn new(template: impl Into<Cow<'static, str>>, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            template: template.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Raw template text.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Arguments bound at configuration time, in placeholder order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Formats the message with the failing member value appended as the last argument.
    pub fn render(&self, value: &str) -> String {
        let mut args: SmallVec<[&str; 4]> = self.args.iter().map(String::as_str).collect();
        args.push(value);
        format_positional(&self.template, &args)
    }
}

// ============================================================================
// TEMPLATE VALUE
// ============================================================================

/// Renders a member value as the trailing template argument.
pub trait TemplateValue {
    /// Text substituted for the value placeholder.
    fn template_value(&self) -> String;
}

macro_rules! display_template_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TemplateValue for $ty {
                fn template_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_template_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
    str,
);

impl TemplateValue for Cow<'_, str> {
    fn template_value(&self) -> String {
        self.to_string()
    }
}

impl<T: TemplateValue + ?Sized> TemplateValue for &T {
    fn template_value(&self) -> String {
        (**self).template_value()
    }
}

impl<T: TemplateValue + ?Sized> TemplateValue for Box<T> {
    fn template_value(&self) -> String {
        (**self).template_value()
    }
}

/// `None` renders as an empty string.
impl<T: TemplateValue> TemplateValue for Option<T> {
    fn template_value(&self) -> String {
        self.as_ref().map(TemplateValue::template_value).unwrap_or_default()
    }
}

/// Writes a list of values separated by `", "`.
impl<T: TemplateValue> TemplateValue for Vec<T> {
    fn template_value(&self) -> String {
        let mut out = String::new();
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&item.template_value());
        }
        out
    }
}

// ============================================================================
// TESTS
// ============================================================================
