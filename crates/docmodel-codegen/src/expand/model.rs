use super::{methods, Expand};

use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;

impl Expand<'_> {
    pub(super) fn expand_struct(&self) -> TokenStream {
        let model = &self.output.model;
        let vis = &model.vis;
        let ident = model.ident();
        let derive = missing_derives(&model.attrs);
        let attrs = &model.attrs;

        let fields = self.output.fields.iter().map(|field| {
            let attrs = &field.attrs;
            let vis = &field.vis;
            let ident = &field.ident;
            let ty = &field.ty;
            quote! {
                #(#attrs)*
                #vis #ident: #ty
            }
        });

        quote! {
            #derive
            #(#attrs)*
            #vis struct #ident {
                #(#fields,)*
            }
        }
    }

    pub(super) fn expand_inherent_impl(&self) -> TokenStream {
        let output = self.output;
        if output.crud.is_empty() && output.user_methods.is_empty() && output.user_items.is_empty()
        {
            return quote!();
        }

        let ident = output.model.ident();
        let crud = output.crud.iter().map(methods::method);
        let user_items = &output.user_items;
        let user_methods = output.user_methods.iter().map(methods::method);

        quote! {
            impl #ident {
                #(#crud)*
                #(#user_items)*
                #(#user_methods)*
            }
        }
    }

    pub(super) fn expand_model_impl(&self) -> TokenStream {
        let output = self.output;
        let Some(collection_name) = &output.collection_name else {
            return quote!();
        };

        let runtime = self.runtime;
        let ident = output.model.ident();
        let collection_name = methods::method(collection_name);
        let identity = output.identity.iter().map(methods::method);
        let hooks = output.hooks.iter().map(methods::method);

        quote! {
            impl #runtime::Model for #ident {
                #collection_name
                #(#identity)*
                #(#hooks)*
            }
        }
    }
}

/// `#[derive(..)]` with whichever of `Default`, `Serialize` and
/// `Deserialize` the struct does not derive yet.
fn missing_derives(attrs: &[syn::Attribute]) -> TokenStream {
    let mut present = vec![];
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        if let Ok(paths) =
            attr.parse_args_with(Punctuated::<syn::Path, syn::Token![,]>::parse_terminated)
        {
            present.extend(
                paths
                    .iter()
                    .filter_map(|path| path.segments.last())
                    .map(|segment| segment.ident.to_string()),
            );
        }
    }

    let missing: Vec<_> = [
        ("Default", quote!(::core::default::Default)),
        ("Serialize", quote!(::serde::Serialize)),
        ("Deserialize", quote!(::serde::Deserialize)),
    ]
    .into_iter()
    .filter(|(name, _)| !present.iter().any(|present| present == name))
    .map(|(_, path)| path)
    .collect();

    if missing.is_empty() {
        quote!()
    } else {
        quote!(#[derive(#(#missing),*)])
    }
}
