//! `member!` expansion.
//!
//! The closure body is lowered twice: into a `SelectorExpr` constructor tree
//! that the runtime resolver inspects, and, for field chains rooted at the
//! parameter, into an accessor closure that reads the member.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Expr, ExprClosure, Member, Type, UnOp};

use crate::support::diag::error_spanned;
use crate::support::utils::{closure_param, is_ident, source_text, strip_parens};

pub fn expand(closure: ExprClosure) -> syn::Result<TokenStream> {
    if closure.inputs.len() != 1 {
        return Err(error_spanned(
            &closure.inputs,
            "member! expects a closure with exactly one parameter, e.g. `|m| m.name`",
        ));
    }
    let param = closure_param(&closure.inputs[0], "the member! parameter")?;
    let ident = param.ident;
    let param_name = ident.unraw().to_string();
    let body = &*closure.body;

    // `|m: &Model|` and `|m: Model|` both select from `Model`.
    let ty = param.ty.map(|ty| match ty {
        Type::Reference(reference) => &*reference.elem,
        ty => ty,
    });

    let tree = lower(body, ident);
    let selector = match ty {
        Some(ty) => quote!(::autovalidator::member::MemberSelector::<#ty, _>),
        None => quote!(::autovalidator::member::MemberSelector),
    };

    let Some(place) = field_place(body, ident) else {
        return Ok(quote! {
            #selector::opaque(#param_name, #tree)
        });
    };

    let accessor_param = match ty {
        Some(ty) => quote!(#ident: &#ty),
        None => quote!(#ident),
    };

    Ok(quote! {
        #selector::with_accessor(#param_name, #tree, |#accessor_param| &(#place))
    })
}

/// Lower an expression into `SelectorExpr` constructor calls.
fn lower(expr: &Expr, param: &syn::Ident) -> TokenStream {
    let sel = quote!(::autovalidator::member::SelectorExpr);
    match expr {
        Expr::Group(group) => lower(&group.expr, param),
        Expr::Paren(paren) => {
            let inner = lower(&paren.expr, param);
            quote!(#sel::paren(#inner))
        }
        Expr::Reference(reference) => {
            let inner = lower(&reference.expr, param);
            quote!(#sel::reference(#inner))
        }
        Expr::Unary(unary) if matches!(unary.op, UnOp::Deref(_)) => {
            let inner = lower(&unary.expr, param);
            quote!(#sel::deref(#inner))
        }
        Expr::Cast(cast) => {
            let inner = lower(&cast.expr, param);
            let ty = source_text(&cast.ty);
            quote!(#sel::cast(#inner, #ty))
        }
        Expr::Field(field) => {
            let base = lower(&field.base, param);
            let name = member_name(&field.member);
            quote!(#sel::field(#base, #name))
        }
        Expr::Path(_) if is_ident(expr, param) => {
            let name = param.unraw().to_string();
            quote!(#sel::parameter(#name))
        }
        Expr::Path(path) => {
            let text = source_text(path);
            quote!(#sel::path(#text))
        }
        Expr::MethodCall(call) => {
            let receiver = lower(&call.receiver, param);
            let method = call.method.unraw().to_string();
            quote!(#sel::method_call(#receiver, #method))
        }
        other => {
            let text = source_text(other);
            quote!(#sel::other(#text))
        }
    }
}

fn member_name(member: &Member) -> String {
    match member {
        Member::Named(ident) => ident.unraw().to_string(),
        Member::Unnamed(index) => index.index.to_string(),
    }
}

/// The field access an accessor should borrow, when the body is a field
/// chain rooted at the parameter. Top-level borrows and casts are peeled so
/// the accessor yields the member's own type. A top-level `*` is kept, so
/// `*m.name` reads through the field's `Deref` target.
fn field_place<'a>(body: &'a Expr, param: &syn::Ident) -> Option<&'a Expr> {
    let mut expr = body;
    loop {
        expr = strip_parens(expr);
        match expr {
            Expr::Reference(reference) => expr = &reference.expr,
            Expr::Cast(cast) => expr = &cast.expr,
            Expr::Field(_) => break,
            Expr::Unary(unary) if matches!(unary.op, UnOp::Deref(_)) => break,
            _ => return None,
        }
    }
    rooted_at(expr, param).then_some(expr)
}

fn rooted_at(expr: &Expr, param: &syn::Ident) -> bool {
    match strip_parens(expr) {
        Expr::Field(field) => rooted_at(&field.base, param),
        Expr::Unary(unary) if matches!(unary.op, UnOp::Deref(_)) => rooted_at(&unary.expr, param),
        other => is_ident(other, param),
    }
}
