//! `check!` expansion.
//!
//! The closure body must be a single call on the checks handle, the last
//! closure parameter. The call is recorded as a `CallDescriptor` and the
//! closure itself is kept, unchanged apart from `move`, to run the check.

use proc_macro2::{Literal, Span, TokenStream};
use quote::quote;
use syn::{Expr, ExprClosure, Lit, Stmt, UnOp};

use crate::support::diag::error_spanned;
use crate::support::utils::{closure_param, is_ident, source_text, strip_parens};

pub fn expand(mut closure: ExprClosure) -> syn::Result<TokenStream> {
    let constructor = match closure.inputs.len() {
        2 => quote!(new),
        3 => quote!(with_instance),
        _ => {
            return Err(error_spanned(
                &closure.inputs,
                "check! expects `|value, checks| ...` or `|value, instance, checks| ...`",
            ));
        }
    };

    let checks = closure_param(&closure.inputs[closure.inputs.len() - 1], "the checks parameter")?;
    let call = match body_expr(&closure.body) {
        Expr::MethodCall(call) if is_ident(strip_parens(&call.receiver), checks.ident) => call,
        other => {
            return Err(error_spanned(
                other,
                format!(
                    "check! body must be a single built-in check call on `{}`, e.g. `{}.max_length(v, 10, None)`",
                    checks.ident, checks.ident
                ),
            ));
        }
    };

    let check = call.method.to_string();
    let slots = call.args.iter().map(lower_arg);
    let descriptor = quote! {
        ::autovalidator::descriptor::CallDescriptor::new(#check, ::std::vec![#(#slots),*])
    };

    if closure.capture.is_none() {
        closure.capture = Some(syn::Token![move](Span::call_site()));
    }

    Ok(quote! {
        ::autovalidator::constraint::BuiltinCall::#constructor(#descriptor, #closure)
    })
}

/// The single expression a closure body evaluates to.
fn body_expr(body: &Expr) -> &Expr {
    let body = strip_parens(body);
    if let Expr::Block(block) = body
        && block.block.stmts.len() == 1
        && let Stmt::Expr(inner, None) = &block.block.stmts[0]
    {
        return body_expr(inner);
    }
    body
}

/// Lower one call argument into an `ArgSlot`.
fn lower_arg(expr: &Expr) -> TokenStream {
    let slot = quote!(::autovalidator::descriptor::ArgSlot);
    match literal(expr) {
        Some(value) => quote!(#slot::literal(#value)),
        None => {
            let text = source_text(expr);
            quote!(#slot::opaque(#text))
        }
    }
}

/// `Literal` constructor for a literal argument, or `None` for computed ones.
fn literal(expr: &Expr) -> Option<TokenStream> {
    let lit = quote!(::autovalidator::descriptor::Literal);
    match strip_parens(expr) {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(s) => {
                let value = s.value();
                Some(quote!(#lit::str(#value)))
            }
            Lit::Int(int) => {
                let value = Literal::i128_suffixed(int.base10_parse().ok()?);
                Some(quote!(#lit::Int(#value)))
            }
            Lit::Float(float) => {
                let value = Literal::f64_suffixed(finite(float.base10_parse().ok()?)?);
                Some(quote!(#lit::Float(#value)))
            }
            Lit::Bool(b) => {
                let value = b.value;
                Some(quote!(#lit::Bool(#value)))
            }
            Lit::Char(c) => {
                let value = c.value();
                Some(quote!(#lit::Char(#value)))
            }
            _ => None,
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => match strip_parens(&unary.expr) {
            Expr::Lit(expr_lit) => match &expr_lit.lit {
                Lit::Int(int) => {
                    let value = Literal::i128_suffixed(int.base10_parse::<i128>().ok()?.checked_neg()?);
                    Some(quote!(#lit::Int(#value)))
                }
                Lit::Float(float) => {
                    let value = Literal::f64_suffixed(-finite(float.base10_parse().ok()?)?);
                    Some(quote!(#lit::Float(#value)))
                }
                _ => None,
            },
            _ => None,
        },
        Expr::Path(path) if is_none(&path.path) => Some(quote!(#lit::Null)),
        Expr::Call(call) if call.args.len() == 1 && is_some(&call.func) => literal(&call.args[0]),
        _ => None,
    }
}

fn is_none(path: &syn::Path) -> bool {
    let segments = &path.segments;
    path.is_ident("None")
        || (segments.len() == 2 && segments[0].ident == "Option" && segments[1].ident == "None")
}

fn is_some(func: &Expr) -> bool {
    matches!(strip_parens(func), Expr::Path(path) if path.path.is_ident("Some"))
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
