use super::stmt;
use crate::ir::{Body, Method, Receiver};

use proc_macro2::TokenStream;
use quote::quote;

pub(super) fn method(method: &Method) -> TokenStream {
    let stmts = match &method.body {
        Body::Verbatim(item) => return quote!(#item),
        Body::Stmts(stmts) => stmts,
    };

    let docs = method.docs.iter().map(|doc| quote!(#[doc = #doc]));
    let attrs = &method.attrs;
    let vis = &method.vis;
    let name = &method.name;
    let receiver = match method.receiver {
        Receiver::Ref => quote!(&self),
        Receiver::RefMut => quote!(&mut self),
    };
    let params = method.params.iter().map(|param| {
        let name = &param.name;
        let ty = &param.ty;
        quote!(#name: #ty)
    });
    let ret = method.ret.as_ref().map(|ty| quote!(-> #ty));
    let body = stmt::body(stmts);

    quote! {
        #(#docs)*
        #(#attrs)*
        #vis fn #name(#receiver #(, #params)*) #ret {
            #body
        }
    }
}
