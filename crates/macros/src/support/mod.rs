//! Internal support utilities for the call-site macros.
//!
//! Diagnostics and closure-parameter helpers shared by `member!` and
//! `check!`.

pub mod diag;
pub mod utils;
