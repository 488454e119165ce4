use crate::ir::{Body, Expr, Method, Origin, Param, Receiver, Stmt};

use proc_macro2::Span;
use syn::parse_quote;

/// Persistence methods, by name. Each forwards to the runtime function of
/// the same name.
pub const CRUD: [&str; 10] = [
    "find",
    "find_with_ctx",
    "find_by_id",
    "find_by_id_with_ctx",
    "create",
    "create_with_ctx",
    "update",
    "update_with_ctx",
    "delete",
    "delete_with_ctx",
];

#[derive(Clone, Copy)]
enum Arg {
    Filter,
    Id,
}

const OPS: [(&str, Option<Arg>, &str); 5] = [
    ("find", Some(Arg::Filter), " Loads the first document matching `filter` into `self`."),
    ("find_by_id", Some(Arg::Id), " Loads the document with identifier `id` into `self`."),
    ("create", None, " Inserts `self` as a new document."),
    ("update", None, " Replaces the stored document with `self`."),
    ("delete", None, " Removes the stored document."),
];

pub(crate) fn methods(runtime: &syn::Path) -> Vec<Method> {
    let ident = |name: &str| syn::Ident::new(name, Span::call_site());
    let ctx = ident("ctx");
    let db = ident("db");

    let mut methods = vec![];

    for (op, arg, doc) in OPS {
        for with_ctx in [false, true] {
            let name = if with_ctx {
                ident(&format!("{op}_with_ctx"))
            } else {
                ident(op)
            };

            let mut params = vec![];
            let mut args = vec![];

            if with_ctx {
                params.push(Param {
                    name: ctx.clone(),
                    ty: parse_quote!(&#runtime::Context),
                });
                args.push(Expr::ident(&ctx));
            }

            params.push(Param {
                name: db.clone(),
                ty: parse_quote!(&#runtime::Db),
            });
            args.push(Expr::ident(&db));
            args.push(Expr::SelfValue);

            match arg {
                Some(Arg::Filter) => {
                    let filter = ident("filter");
                    params.push(Param {
                        name: filter.clone(),
                        ty: parse_quote!(#runtime::Filter),
                    });
                    args.push(Expr::ident(&filter));
                }
                Some(Arg::Id) => {
                    let id = ident("id");
                    params.push(Param {
                        name: id.clone(),
                        ty: parse_quote!(&#runtime::Id),
                    });
                    args.push(Expr::ident(&id));
                }
                None => {}
            }

            methods.push(Method {
                name: name.clone(),
                attrs: vec![],
                docs: if with_ctx { vec![] } else { vec![doc.to_string()] },
                vis: parse_quote!(pub),
                receiver: Receiver::RefMut,
                params,
                ret: Some(parse_quote!(#runtime::Result<()>)),
                body: Body::Stmts(vec![Stmt::Return(Expr::call(
                    parse_quote!(#runtime::#name),
                    args,
                ))]),
                origin: Origin::Synthesized,
            });
        }
    }

    methods
}
