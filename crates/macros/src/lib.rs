//! # autovalidator-macros
//!
//! Call-site macros for `autovalidator`. Both macros turn closure syntax into
//! data the engine can inspect before any instance exists.
//!
//! | Macro | Produces |
//! |-------|----------|
//! | [`member!`] | `MemberSelector<T, M>`: selector expression tree plus member accessor |
//! | [`check!`] | `BuiltinCall<T, M>`: call descriptor plus the check closure |
//!
//! ## Examples
//!
//! ```ignore
//! use autovalidator::{check, member, ValidationBuilder};
//!
//! let mut builder = ValidationBuilder::<SignUp>::new();
//! builder.for_member_check(
//!     member!(|m| m.name),
//!     check!(|name, exp| exp.max_length(name, 10, None)),
//! )?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;
use syn::{ExprClosure, parse_macro_input};

mod call;
mod selector;
mod support;

/// Builds a member selector from a closure.
///
/// # Forms
///
/// - `member!(|m| m.name)`: the selected type is inferred from context, for
///   example from the builder the selector is passed to
/// - `member!(|m: Model| m.name)`: the selected type is explicit
///
/// Field chains rooted at the parameter (`m.name`, `(&m.name)`, `m.age as i64`,
/// `(*m).name`) get an accessor that reads the field. Any other body is still
/// accepted and recorded; it is rejected when the selector is resolved, so
/// the error names the offending expression.
///
/// # Example
///
/// ```ignore
/// let selector = member!(|m: Person| m.email_address);
/// assert_eq!(selector.to_string(), "|m| m.email_address");
/// ```
#[proc_macro]
pub fn member(input: TokenStream) -> TokenStream {
    let closure = parse_macro_input!(input as ExprClosure);
    selector::expand(closure)
        .map(Into::into)
        .unwrap_or_else(support::diag::to_compile_error)
}

/// Captures a built-in check call as a symbolic descriptor.
///
/// # Forms
///
/// - `check!(|value, exp| exp.max_length(value, 3, None))`
/// - `check!(|value, instance, exp| exp.min_value(value, 18, None))`
///
/// The body must be a single method call on the last parameter, the checks
/// handle. Each argument is recorded as a literal (`3`, `-1`, `"text"`,
/// `None`, `Some("text")`) or as the source text of a computed expression.
/// The closure is kept as written, made `move`, and runs the check.
///
/// # Example
///
/// ```ignore
/// builder.for_member_check(
///     member!(|m| m.name),
///     check!(|n, exp| exp.max_length(n, 3, Some("{0} custom error {1} {2}"))),
/// )?;
/// ```
#[proc_macro]
pub fn check(input: TokenStream) -> TokenStream {
    let closure = parse_macro_input!(input as ExprClosure);
    call::expand(closure)
        .map(Into::into)
        .unwrap_or_else(support::diag::to_compile_error)
}
