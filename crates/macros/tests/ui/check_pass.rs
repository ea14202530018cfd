//! `check!` forms that must expand and type-check.

use autovalidator::catalog::Checks;
use autovalidator::constraint::BuiltinCall;
use autovalidator::descriptor::{ArgSlot, Literal};
use autovalidator::check;

struct Person {
    name: String,
    age: i32,
}

fn main() {
    let call: BuiltinCall<Person, String> = check!(|n, exp| exp.max_length(n, 3, None));
    assert_eq!(call.descriptor().to_string(), "max_length(n, 3, None)");

    let call: BuiltinCall<Person, i32> = check!(|n, exp| { exp.min_value(n, -18, Some("too young")) });
    assert_eq!(call.descriptor().args()[1], ArgSlot::literal(Literal::Int(-18)));
    assert_eq!(call.descriptor().args()[2], ArgSlot::literal(Literal::str("too young")));

    let call: BuiltinCall<Person, String> = check!(|n, _person, exp| exp.min_length(n, 1, None));
    assert_eq!(call.descriptor().check(), "min_length");

    let call: BuiltinCall<Person, String> =
        check!(|n: &String, _person: &Person, exp: &Checks| exp.is_email_address(n, None));
    assert_eq!(call.descriptor().check(), "is_email_address");

    let limit = 5;
    let call: BuiltinCall<Person, String> = check!(|n, exp| exp.max_length(n, limit, None));
    assert_eq!(call.descriptor().args()[1], ArgSlot::opaque("limit"));

    let call: BuiltinCall<Person, String> = check!(|_n, exp| exp.ignore());
    assert_eq!(call.descriptor().arity(), 0);

    let person = Person {
        name: String::new(),
        age: 1,
    };
    assert!(person.name.is_empty() && person.age > 0);
}
