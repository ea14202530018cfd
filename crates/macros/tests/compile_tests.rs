//! Compile-time tests for autovalidator-macros.
//!
//! These tests use trybuild to verify that the macro expansions type-check
//! in the forms the builder accepts and that malformed closures are reported
//! with a pointed error.

#[test]
fn test_member_selectors() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/member_pass.rs");
}

#[test]
fn test_member_selectors_fail() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/member_fail.rs");
}

#[test]
fn test_check_calls() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/check_pass.rs");
}

#[test]
fn test_check_calls_fail() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/check_fail.rs");
}
