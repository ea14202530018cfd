//! `check!` forms rejected during expansion.

use autovalidator::check;

fn main() {
    let _ = check!(|v| v.len());
    let _ = check!(|v, exp| v.len());
    let _ = check!(|v, [exp]| exp.ignore());
}
