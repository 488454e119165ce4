use crate::ir::{Expr, Stmt};

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};

impl ToTokens for Expr {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(match self {
            Expr::Path(path) => quote!(#path),
            Expr::SelfValue => quote!(self),
            Expr::Field(base, name) => quote!(#base.#name),
            Expr::Ident(ident) => quote!(#ident),
            Expr::Index(base, index) => quote!(#base[#index]),
            Expr::Deref(expr) => quote!((*#expr)),
            Expr::Ref(expr) => quote!(&#expr),
            Expr::RefMut(expr) => quote!(&mut #expr),
            Expr::Call { func, args } => quote!(#func(#(#args),*)),
            Expr::MethodCall {
                receiver,
                method,
                args,
            } => quote!(#receiver.#method(#(#args),*)),
            Expr::Lit(lit) => quote!(#lit),
            Expr::Default => quote!(::core::default::Default::default()),
            Expr::Unit => quote!(()),
            Expr::Tokens(stream) => stream.clone(),
        });
    }
}

impl ToTokens for Stmt {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(match self {
            Stmt::Let {
                name,
                mutable,
                ty,
                init,
            } => {
                let mutability = mutable.then(|| quote!(mut));
                let ty = ty.as_ref().map(|ty| quote!(: #ty));
                quote!(let #mutability #name #ty = #init;)
            }
            Stmt::LetElse {
                name,
                scrutinee,
                otherwise,
            } => quote! {
                let ::core::option::Option::Some(#name) = &#scrutinee else {
                    #(#otherwise)*
                };
            },
            Stmt::Assign { place, value } => quote!(#place = #value;),
            Stmt::If { cond, then } => quote! {
                if #cond {
                    #(#then)*
                }
            },
            Stmt::ForEach {
                key,
                value,
                iter,
                body,
            } => quote! {
                for (#key, #value) in #iter {
                    #(#body)*
                }
            },
            Stmt::Expr(expr) => quote!(#expr;),
            Stmt::Continue => quote!(continue;),
            Stmt::Return(expr) => quote!(return #expr;),
        });
    }
}

/// Renders a method body, turning a final `return` into a tail expression.
pub(super) fn body(stmts: &[Stmt]) -> TokenStream {
    match stmts.split_last() {
        Some((Stmt::Return(expr), init)) => quote! {
            #(#init)*
            #expr
        },
        _ => quote!(#(#stmts)*),
    }
}
