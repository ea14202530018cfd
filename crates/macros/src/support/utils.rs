use quote::ToTokens;
use syn::{Expr, Pat, Type};

use super::diag::error_spanned;

/// A closure parameter reduced to its binding name and optional type.
pub struct ClosureParam<'a> {
    pub ident: &'a syn::Ident,
    pub ty: Option<&'a Type>,
}

/// Accept `name` or `name: Type`; anything else is rejected.
pub fn closure_param<'a>(pat: &'a Pat, what: &str) -> syn::Result<ClosureParam<'a>> {
    match pat {
        Pat::Ident(pat_ident) if pat_ident.subpat.is_none() => Ok(ClosureParam {
            ident: &pat_ident.ident,
            ty: None,
        }),
        Pat::Type(pat_type) => {
            let inner = closure_param(&pat_type.pat, what)?;
            Ok(ClosureParam {
                ident: inner.ident,
                ty: Some(&pat_type.ty),
            })
        }
        other => Err(error_spanned(
            other,
            format!("{what} must be a plain identifier, optionally with a type"),
        )),
    }
}

/// Source text of an expression, as written.
pub fn source_text<T: ToTokens>(tokens: &T) -> String {
    tokens.to_token_stream().to_string()
}

/// Strip parentheses and invisible groups.
pub fn strip_parens(mut expr: &Expr) -> &Expr {
    loop {
        match expr {
            Expr::Paren(paren) => expr = &paren.expr,
            Expr::Group(group) => expr = &group.expr,
            _ => return expr,
        }
    }
}

/// Whether `expr` is the bare path `ident`.
pub fn is_ident(expr: &Expr, ident: &syn::Ident) -> bool {
    matches!(expr, Expr::Path(path) if path.qself.is_none() && path.path.is_ident(ident))
}
