use crate::{
    synth::{is_reserved_method, COLLECTION_NAME, HOOKS},
    Result, TypeGraph,
};

use quote::ToTokens;

/// A previously generated file, read back so user edits survive
/// regeneration.
#[derive(Debug, Default)]
pub struct PreviousOutput {
    items: Vec<syn::Item>,
}

/// Declarations a user added to one generated struct.
#[derive(Debug, Clone, Default)]
pub struct UserDeclared {
    /// Methods of the inherent impl whose names are not regenerated
    pub methods: Vec<syn::ImplItemFn>,

    /// Non-method items of the inherent impl
    pub items: Vec<syn::ImplItem>,

    /// `collection_name` and hooks from the model capability impl
    pub model_fns: Vec<syn::ImplItemFn>,
}

impl UserDeclared {
    /// Combines declarations from the input with those of the previous
    /// output. Input declarations win on a name clash.
    pub fn merge(mut self, previous: UserDeclared) -> UserDeclared {
        let names = |fns: &[syn::ImplItemFn]| -> Vec<String> {
            fns.iter().map(|func| func.sig.ident.to_string()).collect()
        };

        let methods = names(&self.methods);
        self.methods.extend(
            previous
                .methods
                .into_iter()
                .filter(|func| !methods.contains(&func.sig.ident.to_string())),
        );

        let items: Vec<_> = self.items.iter().map(impl_item_key).collect();
        self.items.extend(
            previous
                .items
                .into_iter()
                .filter(|item| !items.contains(&impl_item_key(item))),
        );

        let model_fns = names(&self.model_fns);
        self.model_fns.extend(
            previous
                .model_fns
                .into_iter()
                .filter(|func| !model_fns.contains(&func.sig.ident.to_string())),
        );

        self
    }
}

/// Name of a non-method impl item, or its tokens when it has none.
fn impl_item_key(item: &syn::ImplItem) -> String {
    match item {
        syn::ImplItem::Const(item) => item.ident.to_string(),
        syn::ImplItem::Type(item) => item.ident.to_string(),
        syn::ImplItem::Fn(item) => item.sig.ident.to_string(),
        other => other.to_token_stream().to_string(),
    }
}

impl PreviousOutput {
    pub fn parse(source: &str) -> Result<PreviousOutput> {
        let file = syn::parse_file(source)?;
        Ok(PreviousOutput { items: file.items })
    }

    pub fn user_declared(&self, ty: &str) -> UserDeclared {
        let mut declared = UserDeclared::default();

        for item in owned_impls(&self.items, ty) {
            match &item.trait_ {
                None => {
                    for impl_item in &item.items {
                        match impl_item {
                            syn::ImplItem::Fn(func) => {
                                let name = func.sig.ident.to_string();
                                if is_reserved_method(&name) {
                                    tracing::trace!(%ty, %name, "dropping regenerated method");
                                } else {
                                    declared.methods.push(func.clone());
                                }
                            }
                            other => declared.items.push(other.clone()),
                        }
                    }
                }
                Some((_, path, _)) if is_model_trait(path) => {
                    for impl_item in &item.items {
                        let syn::ImplItem::Fn(func) = impl_item else {
                            continue;
                        };

                        let name = func.sig.ident.to_string();
                        if is_model_fn(&name) {
                            if !is_noop_hook(func) {
                                declared.model_fns.push(func.clone());
                            }
                        } else if name != "id" && name != "set_id" {
                            tracing::warn!(%ty, %name, "dropping unknown method from model impl");
                        }
                    }
                }
                Some(_) => {}
            }
        }

        declared
    }

    /// Items that do not belong to a struct of `graph` and are copied to
    /// the new output as they are.
    pub fn passthrough<'a>(&'a self, graph: &'a TypeGraph) -> impl Iterator<Item = &'a syn::Item> {
        self.items.iter().filter(move |item| match item {
            syn::Item::Struct(item) => !graph.contains(&item.ident.to_string()),
            syn::Item::Impl(item) => {
                let owned = self_ident(item).is_some_and(|ident| graph.contains(&ident.to_string()));
                !(owned && is_generated_impl(item))
            }
            _ => true,
        })
    }
}

pub(crate) fn self_ident(item: &syn::ItemImpl) -> Option<&syn::Ident> {
    match &*item.self_ty {
        syn::Type::Path(path) if path.qself.is_none() => {
            path.path.segments.last().map(|segment| &segment.ident)
        }
        _ => None,
    }
}

/// Inherent and model capability impls of `ty` in `items`.
pub(crate) fn owned_impls<'a>(
    items: &'a [syn::Item],
    ty: &'a str,
) -> impl Iterator<Item = &'a syn::ItemImpl> {
    items.iter().filter_map(move |item| match item {
        syn::Item::Impl(item) if self_ident(item).is_some_and(|ident| ident == ty) => Some(item),
        _ => None,
    })
}

/// Returns `true` for impls whose content the generator emits itself.
pub(crate) fn is_generated_impl(item: &syn::ItemImpl) -> bool {
    match &item.trait_ {
        None => true,
        Some((_, path, _)) => is_model_trait(path),
    }
}

pub(crate) fn is_model_fn(name: &str) -> bool {
    name == COLLECTION_NAME || HOOKS.contains(&name)
}

pub(crate) fn is_model_trait(path: &syn::Path) -> bool {
    path.segments
        .last()
        .is_some_and(|segment| segment.ident == "Model")
}

/// A hook whose body is exactly `Ok(())`, as generated.
fn is_noop_hook(func: &syn::ImplItemFn) -> bool {
    if func.sig.ident == COLLECTION_NAME || !func.attrs.is_empty() {
        return false;
    }

    let [syn::Stmt::Expr(syn::Expr::Call(call), None)] = func.block.stmts.as_slice() else {
        return false;
    };

    let syn::Expr::Path(path) = &*call.func else {
        return false;
    };

    let is_ok = path
        .path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "Ok");
    let is_unit = matches!(call.args.first(), Some(syn::Expr::Tuple(tuple)) if tuple.elems.is_empty());

    is_ok && call.args.len() == 1 && is_unit
}
