//! Constraints
//!
//! A [`Constraint`] binds a member identity to an evaluator and the message
//! recorded when the evaluator fails. It is built once by the
//! [`ValidationBuilder`](crate::ValidationBuilder) and never changes.

use std::fmt;

use crate::catalog::Checks;
use crate::descriptor::CallDescriptor;
use crate::member::{Accessor, MemberId};
use crate::message::{MessageTemplate, TemplateValue};

// ============================================================================
// ERROR MESSAGE
// ============================================================================

/// Message recorded for a failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorMessage {
    /// Used as is.
    Literal(String),
    /// Formatted with the failing member value.
    Template(MessageTemplate),
}

impl ErrorMessage {
    /// Produces the final message text.
    pub fn render(&self, value: &str) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Template(template) => template.render(value),
        }
    }
}

// ============================================================================
// BUILTIN CALL
// ============================================================================

type CheckFn<T, M> = Box<dyn Fn(&M, &T, &Checks) -> bool + Send + Sync>;

/// A built-in check call captured by [`check!`](crate::check).
///
/// Holds both the symbolic descriptor, used to synthesize the message, and
/// the closure that runs the check.
pub struct BuiltinCall<T, M> {
    descriptor: CallDescriptor,
    check: CheckFn<T, M>,
}

impl<T: 'static, M: 'static> BuiltinCall<T, M> {
    /// Call that only reads the member value.
    pub fn new<F>(descriptor: CallDescriptor, check: F) -> Self
    where
        F: Fn(&M, &Checks) -> bool + Send + Sync + 'static,
    {
        Self {
            descriptor,
            check: Box::new(move |value: &M, _instance: &T, checks: &Checks| check(value, checks)),
        }
    }

    /// Call that also reads the instance being validated.
    pub fn with_instance<F>(descriptor: CallDescriptor, check: F) -> Self
    where
        F: Fn(&M, &T, &Checks) -> bool + Send + Sync + 'static,
    {
        Self {
            descriptor,
            check: Box::new(check),
        }
    }
}

impl<T, M> BuiltinCall<T, M> {
    /// The captured call.
    pub fn descriptor(&self) -> &CallDescriptor {
        &self.descriptor
    }

    pub(crate) fn into_check(self) -> CheckFn<T, M> {
        self.check
    }
}

impl<T, M> fmt::Debug for BuiltinCall<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinCall")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// CONSTRAINT
// ============================================================================

pub(crate) enum Verdict {
    Pass,
    Fail { value: String },
}

type Evaluator<T> = Box<dyn Fn(&T) -> Verdict + Send + Sync>;

/// One member constraint of a type `T`.
pub struct Constraint<T> {
    member: MemberId,
    message: ErrorMessage,
    evaluator: Evaluator<T>,
}

impl<T: 'static> Constraint<T> {
    /// Constraint backed by a user predicate with a literal message.
    pub(crate) fn predicate<M, F>(
        member: MemberId,
        message: String,
        accessor: Accessor<T, M>,
        predicate: F,
    ) -> Self
    where
        M: 'static,
        F: Fn(&M, &T) -> bool + Send + Sync + 'static,
    {
        Self {
            member,
            message: ErrorMessage::Literal(message),
            evaluator: Box::new(move |instance: &T| {
                if predicate(accessor(instance), instance) {
                    Verdict::Pass
                } else {
                    Verdict::Fail {
                        value: String::new(),
                    }
                }
            }),
        }
    }

    /// Constraint backed by a matched built-in check.
    pub(crate) fn builtin<M>(
        member: MemberId,
        template: MessageTemplate,
        accessor: Accessor<T, M>,
        call: BuiltinCall<T, M>,
    ) -> Self
    where
        M: TemplateValue + 'static,
    {
        let check = call.into_check();
        Self {
            member,
            message: ErrorMessage::Template(template),
            evaluator: Box::new(move |instance: &T| {
                let value = accessor(instance);
                if check(value, instance, &Checks) {
                    Verdict::Pass
                } else {
                    Verdict::Fail {
                        value: value.template_value(),
                    }
                }
            }),
        }
    }
}

impl<T> Constraint<T> {
    /// Identity of the constrained member.
    pub fn member(&self) -> &MemberId {
        &self.member
    }

    /// Message recorded on failure, before formatting.
    pub fn message(&self) -> &ErrorMessage {
        &self.message
    }

    /// Runs the constraint. Returns the failure message, or `None` when it passes.
    pub fn evaluate(&self, instance: &T) -> Option<String> {
        match (self.evaluator)(instance) {
            Verdict::Pass => None,
            Verdict::Fail { value } => Some(self.message.render(&value)),
        }
    }
}

impl<T> fmt::Debug for Constraint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("member", &self.member)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ArgSlot, Literal};

    struct Model {
        name: String,
        age: i32,
    }

    fn model(name: &str, age: i32) -> Model {
        Model {
            name: name.to_string(),
            age,
        }
    }

    #[test]
    fn predicate_constraint_uses_literal_message() {
        let constraint = Constraint::predicate(
            MemberId::of::<Model>("age"),
            "too young".to_string(),
            |m: &Model| &m.age,
            |age: &i32, _: &Model| *age >= 18,
        );
        assert_eq!(constraint.evaluate(&model("Jon", 20)), None);
        assert_eq!(constraint.evaluate(&model("Jon", 3)).as_deref(), Some("too young"));
    }

    #[test]
    fn builtin_constraint_formats_value() {
        let template = MessageTemplate::new("{1} is {2}, max {0}", ["3".to_string(), "name".to_string()]);
        let call = BuiltinCall::new(
            CallDescriptor::new(
                "max_length",
                vec![
                    ArgSlot::opaque("n"),
                    ArgSlot::literal(Literal::Int(3)),
                    ArgSlot::literal(Literal::Null),
                ],
            ),
            |n: &String, exp: &Checks| exp.max_length(n, 3, None),
        );
        assert_eq!(call.descriptor().check(), "max_length");

        let constraint =
            Constraint::builtin(MemberId::of::<Model>("name"), template, |m: &Model| &m.name, call);
        assert_eq!(constraint.evaluate(&model("Jon", 0)), None);
        assert_eq!(
            constraint.evaluate(&model("Jon Hawkins", 0)).as_deref(),
            Some("name is Jon Hawkins, max 3")
        );
    }

    #[test]
    fn instance_aware_call_sees_the_instance() {
        let call = BuiltinCall::with_instance(
            CallDescriptor::new("ignore", Vec::new()),
            |_: &String, m: &Model, _: &Checks| m.age > 0,
        );
        let constraint = Constraint::builtin(
            MemberId::of::<Model>("name"),
            MessageTemplate::new("(ignored)", ["name".to_string()]),
            |m: &Model| &m.name,
            call,
        );
        assert!(constraint.evaluate(&model("a", 1)).is_none());
        assert!(constraint.evaluate(&model("a", 0)).is_some());
    }
}
