//! Member identity resolution
//!
//! A selector is the data form of a closure such as `|m| m.email_address`:
//! the [`member!`](crate::member) macro records the closure body as a
//! [`SelectorExpr`] tree and, when the body is a plain field chain, an
//! accessor function. [`resolve_member`] turns the tree into a [`MemberId`]
//! or rejects it.

use std::borrow::Cow;
use std::fmt;

use crate::error::ConfigError;

// ============================================================================
// MEMBER ID
// ============================================================================

/// Stable identity of a top-level member: declaring type plus member name.
///
/// Used as the key of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId {
    declaring_type: &'static str,
    name: Cow<'static, str>,
}

impl MemberId {
    /// Creates an identity for a member declared on `T`.
    pub fn of<T: ?Sized>(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            declaring_type: std::any::type_name::<T>(),
            name: name.into(),
        }
    }

    /// Fully qualified name of the declaring type.
    pub fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    /// Member name as used in error maps and messages.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.declaring_type, self.name)
    }
}

// ============================================================================
// SELECTOR EXPRESSION
// ============================================================================

/// Unevaluated selector body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorExpr {
    /// The closure parameter itself.
    Parameter(Cow<'static, str>),
    /// Any other path (a captured variable, a constant).
    Path(Cow<'static, str>),
    /// `base.member`
    Field {
        /// Expression the member is read from.
        base: Box<SelectorExpr>,
        /// Member name (`"0"` for tuple fields).
        member: Cow<'static, str>,
    },
    /// `( inner )`
    Paren(Box<SelectorExpr>),
    /// `&inner`
    Reference(Box<SelectorExpr>),
    /// `*inner`
    Deref(Box<SelectorExpr>),
    /// `inner as ty`
    Cast {
        /// Converted expression.
        inner: Box<SelectorExpr>,
        /// Target type as written.
        ty: Cow<'static, str>,
    },
    /// `receiver.method(..)`
    MethodCall {
        /// Receiver expression.
        receiver: Box<SelectorExpr>,
        /// Method name.
        method: Cow<'static, str>,
    },
    /// Anything else, kept as source text.
    Other(Cow<'static, str>),
}

impl SelectorExpr {
    /// The closure parameter.
    pub fn parameter(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Parameter(name.into())
    }

    /// A path that is not the closure parameter.
    pub fn path(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Path(text.into())
    }

    /// Member access on `base`.
    pub fn field(base: Self, member: impl Into<Cow<'static, str>>) -> Self {
        Self::Field {
            base: Box::new(base),
            member: member.into(),
        }
    }

    /// Parenthesized expression.
    pub fn paren(inner: Self) -> Self {
        Self::Paren(Box::new(inner))
    }

    /// Borrow of `inner`.
    pub fn reference(inner: Self) -> Self {
        Self::Reference(Box::new(inner))
    }

    /// Dereference of `inner`.
    pub fn deref(inner: Self) -> Self {
        Self::Deref(Box::new(inner))
    }

    /// `inner as ty`.
    pub fn cast(inner: Self, ty: impl Into<Cow<'static, str>>) -> Self {
        Self::Cast {
            inner: Box::new(inner),
            ty: ty.into(),
        }
    }

    /// Method call on `receiver`.
    pub fn method_call(receiver: Self, method: impl Into<Cow<'static, str>>) -> Self {
        Self::MethodCall {
            receiver: Box::new(receiver),
            method: method.into(),
        }
    }

    /// Opaque expression.
    pub fn other(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Other(text.into())
    }

    /// Strips conversion and grouping nodes that do not change which member is read.
    pub fn unwrapped(&self) -> &Self {
        let mut expr = self;
        while let Self::Paren(inner)
        | Self::Reference(inner)
        | Self::Deref(inner)
        | Self::Cast { inner, .. } = expr
        {
            expr = &**inner;
        }
        expr
    }
}

impl fmt::Display for SelectorExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter(name) | Self::Path(name) | Self::Other(name) => f.write_str(name),
            Self::Field { base, member } => write!(f, "{base}.{member}"),
            Self::Paren(inner) => write!(f, "({inner})"),
            Self::Reference(inner) => write!(f, "&{inner}"),
            Self::Deref(inner) => write!(f, "*{inner}"),
            Self::Cast { inner, ty } => write!(f, "{inner} as {ty}"),
            Self::MethodCall { receiver, method } => write!(f, "{receiver}.{method}(..)"),
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolves a selector body to the identity of a member declared on `T`.
///
/// `param` is the closure parameter name the body is expected to start from.
pub fn resolve_member<T: ?Sized>(param: &str, body: &SelectorExpr) -> Result<MemberId, ConfigError> {
    let rendered = || format!("|{param}| {body}");

    match body.unwrapped() {
        SelectorExpr::Field { base, member } => match base.unwrapped() {
            SelectorExpr::Parameter(name) if name == param => {
                Ok(MemberId::of::<T>(member.clone()))
            }
            SelectorExpr::Field { .. } | SelectorExpr::MethodCall { .. } => {
                Err(ConfigError::InvalidSelector {
                    expression: rendered(),
                })
            }
            _ => Err(ConfigError::UnsupportedSelectorShape {
                expression: rendered(),
            }),
        },
        _ => Err(ConfigError::UnsupportedSelectorShape {
            expression: rendered(),
        }),
    }
}

// ============================================================================
// MEMBER SELECTOR
// ============================================================================

/// Reads member `M` out of `T`.
pub type Accessor<T, M> = for<'a> fn(&'a T) -> &'a M;

/// Data form of a member-selector closure over `T` yielding `M`.
pub struct MemberSelector<T, M> {
    param: Cow<'static, str>,
    body: SelectorExpr,
    accessor: Option<Accessor<T, M>>,
}

impl<T, M> MemberSelector<T, M> {
    /// Creates a selector whose member can be read through `accessor`.
    pub fn with_accessor(
        param: impl Into<Cow<'static, str>>,
        body: SelectorExpr,
        accessor: Accessor<T, M>,
    ) -> Self {
        Self {
            param: param.into(),
            body,
            accessor: Some(accessor),
        }
    }

    /// Creates a selector that has no readable member (method calls and other
    /// computed bodies). It never resolves.
    pub fn opaque(param: impl Into<Cow<'static, str>>, body: SelectorExpr) -> Self {
        Self {
            param: param.into(),
            body,
            accessor: None,
        }
    }

    /// Closure parameter name.
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Selector body.
    pub fn body(&self) -> &SelectorExpr {
        &self.body
    }

    /// Resolves the member identity and its accessor.
    pub fn resolve(&self) -> Result<(MemberId, Accessor<T, M>), ConfigError> {
        let id = resolve_member::<T>(&self.param, &self.body)?;
        let accessor = self
            .accessor
            .ok_or_else(|| ConfigError::UnsupportedSelectorShape {
                expression: self.to_string(),
            })?;
        Ok((id, accessor))
    }
}

impl<T, M> Clone for MemberSelector<T, M> {
    fn clone(&self) -> Self {
        Self {
            param: self.param.clone(),
            body: self.body.clone(),
            accessor: self.accessor,
        }
    }
}

impl<T, M> fmt::Display for MemberSelector<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}| {}", self.param, self.body)
    }
}

impl<T, M> fmt::Debug for MemberSelector<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberSelector")
            .field("selector", &self.to_string())
            .field("accessor", &self.accessor.map(|_| "<function>"))
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Address {
        city: String,
    }

    struct Person {
        name: String,
        age: i32,
        address: Address,
    }

    struct Pair(u8, u8);

    fn field(member: &'static str) -> SelectorExpr {
        SelectorExpr::field(SelectorExpr::parameter("m"), member)
    }

    #[test]
    fn plain_field_resolves() {
        let id = resolve_member::<Person>("m", &field("name")).unwrap();
        assert_eq!(id.name(), "name");
        assert_eq!(id.declaring_type(), std::any::type_name::<Person>());
    }

    #[test]
    fn wrappers_resolve_to_the_same_identity() {
        let plain = resolve_member::<Person>("m", &field("age")).unwrap();
        let wrapped = [
            SelectorExpr::paren(field("age")),
            SelectorExpr::reference(field("age")),
            SelectorExpr::cast(field("age"), "i64"),
            SelectorExpr::paren(SelectorExpr::cast(SelectorExpr::reference(field("age")), "i64")),
            SelectorExpr::field(
                SelectorExpr::paren(SelectorExpr::deref(SelectorExpr::parameter("m"))),
                "age",
            ),
        ];
        for body in &wrapped {
            assert_eq!(resolve_member::<Person>("m", body).unwrap(), plain, "{body}");
        }
    }

    #[test]
    fn same_name_on_different_types_differs() {
        let person = resolve_member::<Person>("m", &field("name")).unwrap();
        let address = resolve_member::<Address>("m", &field("name")).unwrap();
        assert_ne!(person, address);
    }

    #[test]
    fn nested_member_is_invalid() {
        let body = SelectorExpr::field(field("address"), "city");
        let err = resolve_member::<Person>("m", &body).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidSelector {
                expression: "|m| m.address.city".to_string()
            }
        );
    }

    #[test]
    fn member_of_method_result_is_invalid() {
        let body = SelectorExpr::field(SelectorExpr::method_call(field("address"), "clone"), "city");
        assert!(matches!(
            resolve_member::<Person>("m", &body),
            Err(ConfigError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn computed_bodies_are_unsupported() {
        let bodies = [
            SelectorExpr::method_call(field("name"), "len"),
            SelectorExpr::parameter("m"),
            SelectorExpr::other("42"),
            SelectorExpr::field(SelectorExpr::path("other"), "name"),
        ];
        for body in &bodies {
            assert!(
                matches!(
                    resolve_member::<Person>("m", body),
                    Err(ConfigError::UnsupportedSelectorShape { .. })
                ),
                "{body}"
            );
        }
    }

    #[test]
    fn tuple_fields_resolve_by_index() {
        let id = resolve_member::<Pair>("p", &SelectorExpr::field(SelectorExpr::parameter("p"), "1"))
            .unwrap();
        assert_eq!(id.name(), "1");
    }

    #[test]
    fn selector_renders_closure_text() {
        let selector: MemberSelector<Person, String> =
            MemberSelector::with_accessor("m", field("name"), |m| &m.name);
        assert_eq!(selector.to_string(), "|m| m.name");
        let (id, accessor) = selector.resolve().unwrap();
        assert_eq!(id.name(), "name");

        let person = Person {
            name: "Jon".to_string(),
            age: 3,
            address: Address {
                city: "Oslo".to_string(),
            },
        };
        assert_eq!(accessor(&person), "Jon");
        assert_eq!(person.age, 3);
        assert_eq!(person.address.city, "Oslo");
    }

    #[test]
    fn opaque_selector_never_resolves() {
        let selector: MemberSelector<Person, String> = MemberSelector::opaque("m", field("name"));
        assert!(matches!(
            selector.resolve(),
            Err(ConfigError::UnsupportedSelectorShape { .. })
        ));
    }

    #[test]
    fn macro_selectors_resolve() {
        let plain = crate::member!(|m: Person| m.name);
        let wrapped = crate::member!(|m: Person| (&m.name));
        assert_eq!(plain.resolve().unwrap().0, wrapped.resolve().unwrap().0);

        let cast = crate::member!(|m: Person| m.age as i64);
        let (id, accessor) = cast.resolve().unwrap();
        assert_eq!(id.name(), "age");
        let person = Person {
            name: String::new(),
            age: 7,
            address: Address {
                city: String::new(),
            },
        };
        assert_eq!(*accessor(&person), 7);
    }

    #[test]
    fn macro_deref_selector_reads_through_the_field() {
        struct Boxed {
            name: Box<String>,
        }

        let selector = crate::member!(|m: Boxed| *m.name);
        let (id, accessor) = selector.resolve().unwrap();
        assert_eq!(id, MemberId::of::<Boxed>("name"));

        let boxed = Boxed {
            name: Box::new("Ada".to_string()),
        };
        let name: &String = accessor(&boxed);
        assert_eq!(name, "Ada");
    }

    #[test]
    fn macro_nested_selector_is_invalid() {
        let nested = crate::member!(|m: Person| m.address.city);
        assert_eq!(nested.to_string(), "|m| m.address.city");
        assert!(matches!(
            nested.resolve(),
            Err(ConfigError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn macro_method_call_selector_is_unsupported() {
        let computed: MemberSelector<Person, usize> = crate::member!(|m: Person| m.name.len());
        assert!(matches!(
            computed.resolve(),
            Err(ConfigError::UnsupportedSelectorShape { .. })
        ));
    }
}
