//! Per-type method descriptors handed to rendering.

mod crud;
pub use crud::CRUD;

mod hooks;
pub use hooks::{COLLECTION_NAME, HOOKS};

mod names;
pub use names::MAX_LEVELS;

mod resolver;
pub use resolver::Resolver;

use crate::{
    ir::Method,
    merge::{PreviousOutput, UserDeclared},
    schema::{Model, Schema},
    CodegenError, Config, Result, TypeGraph,
};

use syn::parse_quote;

/// Prefix of every resolver method name.
pub const RESOLVER_PREFIX: &str = "get_resolved_";

/// Everything emitted for one struct.
#[derive(Debug, Clone)]
pub struct TypeOutput {
    pub model: Model,

    /// Struct fields in output order: embedded, declared, then resolver slots
    pub fields: Vec<OutputField>,

    /// Model capability methods; empty unless the struct is a collection
    pub collection_name: Option<Method>,
    pub identity: Vec<Method>,
    pub hooks: Vec<Method>,

    pub crud: Vec<Method>,

    /// Resolver methods sorted by name
    pub resolvers: Vec<Method>,

    /// Methods and other items the user added to the struct's inherent impl
    pub user_methods: Vec<Method>,
    pub user_items: Vec<syn::ImplItem>,
}

#[derive(Debug, Clone)]
pub struct OutputField {
    pub attrs: Vec<syn::Attribute>,
    pub vis: syn::Visibility,
    pub ident: syn::Ident,
    pub ty: syn::Type,

    /// True for the private cache fields added for a resolver
    pub slot: bool,
}

/// Returns `true` for method names the generator always regenerates.
pub fn is_reserved_method(name: &str) -> bool {
    name.starts_with(RESOLVER_PREFIX)
        || name == COLLECTION_NAME
        || name == "id"
        || name == "set_id"
        || CRUD.contains(&name)
        || HOOKS.contains(&name)
}

pub fn synthesize(
    graph: &TypeGraph,
    schema: &Schema,
    previous: Option<&PreviousOutput>,
    config: &Config,
) -> Result<Vec<TypeOutput>> {
    let runtime = config.runtime()?;
    let id_ident = syn::Ident::new(&config.id_type, proc_macro2::Span::call_site());
    let id_ty: syn::Type = parse_quote!(#runtime::#id_ident);

    schema
        .models
        .iter()
        .map(|model| {
            let previous = previous
                .map(|previous| previous.user_declared(&model.name.text))
                .unwrap_or_default();
            let declared = graph.user_declared(&model.name.text)?;

            if !model.collection && !declared.model_fns.is_empty() {
                return Err(CodegenError::UnsupportedDeclaration {
                    name: model.name.text.clone(),
                    reason: "only collections implement the model capability",
                });
            }

            let user = declared.merge(previous);

            type_output(model, &user, &runtime, &id_ty)
        })
        .collect()
}

fn type_output(
    model: &Model,
    user: &UserDeclared,
    runtime: &syn::Path,
    id_ty: &syn::Type,
) -> Result<TypeOutput> {
    let mut fields = vec![];
    let mut slots = vec![];
    let mut resolvers = vec![];

    for field in model.ordered_fields() {
        let mut ty = field.ty.clone();

        if field.flags.resolvable {
            let resolver = resolver::synthesize(model, field, runtime, id_ty)?;
            ty = resolver.field_ty;
            slots.extend(resolver.slots);
            resolvers.push(resolver.method);
        }

        fields.push(OutputField {
            attrs: field.attrs.clone(),
            vis: field.vis.clone(),
            ident: field.ident().clone(),
            ty,
            slot: false,
        });
    }

    fields.extend(slots);
    resolvers.sort_by(|a, b| a.name.cmp(&b.name));

    let (collection_name, identity, hooks, crud) = if model.collection {
        (
            Some(hooks::collection_name(model, &user.model_fns)),
            hooks::identity(model, runtime),
            hooks::hooks(runtime, &user.model_fns),
            crud::methods(runtime),
        )
    } else {
        (None, vec![], vec![], vec![])
    };

    Ok(TypeOutput {
        model: model.clone(),
        fields,
        collection_name,
        identity,
        hooks,
        crud,
        resolvers,
        user_methods: user
            .methods
            .iter()
            .cloned()
            .map(Method::user_declared)
            .collect(),
        user_items: user.items.clone(),
    })
}
