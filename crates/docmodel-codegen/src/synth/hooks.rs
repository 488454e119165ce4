use crate::ir::{Body, Expr, Method, Origin, Param, Receiver, Stmt};
use crate::schema::Model;

use proc_macro2::Span;
use syn::parse_quote;

/// Lifecycle hooks of the model capability, in emission order.
pub const HOOKS: [&str; 9] = [
    "queried", "creating", "created", "saving", "saved", "updating", "updated", "deleting",
    "deleted",
];

pub const COLLECTION_NAME: &str = "collection_name";

/// Hook methods: the user-declared body when one exists, a no-op otherwise.
pub(crate) fn hooks(runtime: &syn::Path, user: &[syn::ImplItemFn]) -> Vec<Method> {
    HOOKS
        .iter()
        .map(|hook| {
            match user.iter().find(|item| item.sig.ident == hook) {
                Some(item) => Method::user_declared(item.clone()),
                None => Method {
                    name: syn::Ident::new(hook, Span::call_site()),
                    attrs: vec![],
                    docs: vec![],
                    vis: syn::Visibility::Inherited,
                    receiver: Receiver::RefMut,
                    params: vec![],
                    ret: Some(parse_quote!(#runtime::Result<()>)),
                    body: Body::Stmts(vec![Stmt::Return(Expr::call(
                        parse_quote!(::core::result::Result::Ok),
                        vec![Expr::Unit],
                    ))]),
                    origin: Origin::Synthesized,
                },
            }
        })
        .collect()
}

/// `collection_name`, returning the lower camel case type name unless the
/// user declared their own.
pub(crate) fn collection_name(model: &Model, user: &[syn::ImplItemFn]) -> Method {
    if let Some(item) = user.iter().find(|item| item.sig.ident == COLLECTION_NAME) {
        return Method::user_declared(item.clone());
    }

    Method {
        name: syn::Ident::new(COLLECTION_NAME, Span::call_site()),
        attrs: vec![],
        docs: vec![],
        vis: syn::Visibility::Inherited,
        receiver: Receiver::Ref,
        params: vec![],
        ret: Some(parse_quote!(&'static str)),
        body: Body::Stmts(vec![Stmt::Return(Expr::str(&model.name.lower_camel()))]),
        origin: Origin::Synthesized,
    }
}

/// `id` and `set_id`, delegating to the embedded identity holder.
pub(crate) fn identity(model: &Model, runtime: &syn::Path) -> Vec<Method> {
    let holder = model
        .identity_path
        .iter()
        .fold(Expr::SelfValue, |expr, field| expr.field(field));
    let id = syn::Ident::new("id", Span::call_site());

    vec![
        Method {
            name: id.clone(),
            attrs: vec![],
            docs: vec![],
            vis: syn::Visibility::Inherited,
            receiver: Receiver::Ref,
            params: vec![],
            ret: Some(parse_quote!(#runtime::Id)),
            body: Body::Stmts(vec![Stmt::Return(holder.clone().method("id", vec![]))]),
            origin: Origin::Synthesized,
        },
        Method {
            name: syn::Ident::new("set_id", Span::call_site()),
            attrs: vec![],
            docs: vec![],
            vis: syn::Visibility::Inherited,
            receiver: Receiver::RefMut,
            params: vec![Param {
                name: id.clone(),
                ty: parse_quote!(#runtime::Id),
            }],
            ret: None,
            body: Body::Stmts(vec![Stmt::Expr(
                holder.method("set_id", vec![Expr::ident(&id)]),
            )]),
            origin: Origin::Synthesized,
        },
    ]
}
