//! `member!` forms rejected during expansion.

use autovalidator::member;

fn main() {
    let _ = member!(|a, b| a.name);
    let _ = member!(|(a, _b)| a.name);
}
