mod methods;
mod model;
mod stmt;

use crate::synth::TypeOutput;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The struct being expanded
    output: &'a TypeOutput,

    /// Path prefix for runtime types
    runtime: &'a syn::Path,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let model_struct = self.expand_struct();
        let inherent_impl = self.expand_inherent_impl();
        let model_impl = self.expand_model_impl();

        quote! {
            #model_struct
            #inherent_impl
            #model_impl
        }
    }
}

/// Renders a whole output file: copied items first, then every struct with
/// its impls, then the resolver methods ordered by name across all structs.
pub(crate) fn file(
    outputs: &[TypeOutput],
    items: &[&syn::Item],
    runtime: &syn::Path,
) -> TokenStream {
    let models = outputs.iter().map(|output| Expand { output, runtime }.expand());
    let resolvers = resolver_impls(outputs);

    quote! {
        #(#items)*
        #(#models)*
        #resolvers
    }
}

/// Resolvers sorted by method name, ties broken by type name. Consecutive
/// methods of one type share an impl block.
fn resolver_impls(outputs: &[TypeOutput]) -> TokenStream {
    let mut resolvers: Vec<_> = outputs
        .iter()
        .flat_map(|output| {
            output
                .resolvers
                .iter()
                .map(move |method| (output.model.ident(), method))
        })
        .collect();

    resolvers.sort_by(|(a_ty, a), (b_ty, b)| a.name.cmp(&b.name).then_with(|| a_ty.cmp(b_ty)));

    let mut tokens = TokenStream::new();
    let mut rest = resolvers.as_slice();

    while let Some(((ident, _), _)) = rest.split_first() {
        let len = rest.iter().take_while(|(other, _)| other == ident).count();
        let (group, tail) = rest.split_at(len);
        let methods = group.iter().map(|(_, method)| methods::method(method));

        tokens.extend(quote! {
            impl #ident {
                #(#methods)*
            }
        });
        rest = tail;
    }

    tokens
}
