//! Call descriptor matching
//!
//! Turns a captured built-in check call into the message template used when
//! the check fails. Matching happens once, when the constraint is
//! configured, so configuration mistakes surface before any instance is
//! validated.

use smallvec::SmallVec;

use crate::catalog::{BuiltinCheck, Param};
use crate::descriptor::{ArgSlot, CallDescriptor, Literal};
use crate::error::ConfigError;
use crate::member::MemberId;
use crate::message::MessageTemplate;

/// Builds the message template for `descriptor` applied to `member`.
///
/// Template arguments are the literal bounds in declaration order followed by
/// the member name. A non-blank literal message override replaces the
/// catalog template verbatim.
pub fn match_call(descriptor: &CallDescriptor, member: &MemberId) -> Result<MessageTemplate, ConfigError> {
    let check = BuiltinCheck::from_name(descriptor.check())
        .filter(|check| check.arity() == descriptor.arity())
        .ok_or_else(|| ConfigError::UnknownBuiltinCheck {
            check: descriptor.check().to_string(),
            arity: descriptor.arity(),
        })?;

    let mut template = check.default_template().to_string();
    let mut args: SmallVec<[String; 3]> = SmallVec::new();

    for (position, (param, slot)) in check.parameters().iter().zip(descriptor.args()).enumerate() {
        match param {
            Param::Value => {}
            Param::Bound => args.push(literal_arg(descriptor, position, slot)?.to_string()),
            Param::Message => {
                if let Some(text) = message_override(literal_arg(descriptor, position, slot)?) {
                    template = text;
                }
            }
        }
    }

    args.push(member.name().to_string());

    tracing::debug!(
        check = %check,
        member = %member,
        template = %template,
        "matched built-in check"
    );

    Ok(MessageTemplate::new(template, args))
}

fn literal_arg<'a>(
    descriptor: &CallDescriptor,
    position: usize,
    slot: &'a ArgSlot,
) -> Result<&'a Literal, ConfigError> {
    slot.as_literal().ok_or_else(|| ConfigError::NonLiteralArgument {
        check: descriptor.check().to_string(),
        position,
        expression: slot.to_string(),
    })
}

/// `None` and blank text keep the default template.
fn message_override(literal: &Literal) -> Option<String> {
    let text = literal.to_string();
    (!text.trim().is_empty()).then_some(text)
}

// ============================================================================
// TESTS
// ============================================================================
