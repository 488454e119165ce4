use crate::{
    merge::{self, UserDeclared},
    schema::Shape,
    synth::is_reserved_method,
    CodegenError, Config, Result,
};

use indexmap::IndexMap;

/// Maximum number of alias expansions followed for one type.
const MAX_ALIAS_DEPTH: usize = 16;

/// Every struct and type alias declared by the input sources, in
/// declaration order.
#[derive(Debug, Default)]
pub struct TypeGraph {
    structs: IndexMap<String, syn::ItemStruct>,
    aliases: IndexMap<String, syn::Type>,

    /// Declarations that are not classified and are copied to the output.
    items: Vec<syn::Item>,
}

impl TypeGraph {
    pub fn new() -> TypeGraph {
        TypeGraph::default()
    }

    pub fn from_sources(sources: &[&str], config: &Config) -> Result<TypeGraph> {
        let mut graph = TypeGraph::new();
        for source in sources {
            graph.add_source(source, config)?;
        }
        Ok(graph)
    }

    pub fn add_source(&mut self, source: &str, config: &Config) -> Result<()> {
        let file = syn::parse_file(source)?;

        for item in file.items {
            match item {
                syn::Item::Struct(item) => self.add_struct(item, config)?,
                syn::Item::Type(item) => self.add_alias(item, config),
                item => self.items.push(item),
            }
        }

        Ok(())
    }

    fn add_struct(&mut self, item: syn::ItemStruct, config: &Config) -> Result<()> {
        let name = item.ident.to_string();

        if config.is_reserved(&name) {
            tracing::warn!(%name, "skipping struct with a reserved name");
            return Ok(());
        }

        if !matches!(item.fields, syn::Fields::Named(_)) {
            tracing::debug!(%name, "copying struct without named fields");
            self.items.push(syn::Item::Struct(item));
            return Ok(());
        }

        if !item.generics.params.is_empty() {
            return Err(CodegenError::UnsupportedDeclaration {
                name,
                reason: "generic structs cannot be stored",
            });
        }

        if self.structs.contains_key(&name) {
            return Err(CodegenError::UnsupportedDeclaration {
                name,
                reason: "declared more than once",
            });
        }

        self.structs.insert(name, item);
        Ok(())
    }

    fn add_alias(&mut self, item: syn::ItemType, config: &Config) {
        let name = item.ident.to_string();

        if config.is_reserved(&name) {
            tracing::warn!(%name, "skipping type alias with a reserved name");
            return;
        }

        if item.generics.params.is_empty() {
            self.aliases.insert(name, (*item.ty).clone());
        }
        self.items.push(syn::Item::Type(item));
    }

    pub fn structs(&self) -> impl Iterator<Item = &syn::ItemStruct> {
        self.structs.values()
    }

    pub fn get(&self, name: &str) -> Option<&syn::ItemStruct> {
        self.structs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.structs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Declarations copied to the output as they are. Inherent and model
    /// capability impls of declared structs are merged into the generated
    /// impls instead.
    pub fn passthrough(&self) -> impl Iterator<Item = &syn::Item> {
        self.items.iter().filter(|item| match item {
            syn::Item::Impl(item) => {
                let owned = merge::self_ident(item).is_some_and(|ident| self.contains(&ident.to_string()));
                !(owned && merge::is_generated_impl(item))
            }
            _ => true,
        })
    }

    /// Methods, impl items and hooks the input declares for `ty`.
    pub fn user_declared(&self, ty: &str) -> Result<UserDeclared> {
        let mut declared = UserDeclared::default();

        for item in merge::owned_impls(&self.items, ty) {
            if !merge::is_generated_impl(item) {
                continue;
            }
            let model_impl = item.trait_.is_some();

            for impl_item in &item.items {
                let func = match impl_item {
                    syn::ImplItem::Fn(func) => func,
                    other if !model_impl => {
                        declared.items.push(other.clone());
                        continue;
                    }
                    _ => {
                        return Err(CodegenError::UnsupportedDeclaration {
                            name: ty.to_string(),
                            reason: "model impls may only declare hooks and `collection_name`",
                        })
                    }
                };

                let name = func.sig.ident.to_string();
                if model_impl {
                    if !merge::is_model_fn(&name) {
                        return Err(CodegenError::UnsupportedDeclaration {
                            name: format!("{ty}::{name}"),
                            reason: "model impls may only declare hooks and `collection_name`",
                        });
                    }
                    declared.model_fns.push(func.clone());
                } else if is_reserved_method(&name) {
                    return Err(CodegenError::UnsupportedDeclaration {
                        name: format!("{ty}::{name}"),
                        reason: "the method name is reserved for generated methods",
                    });
                } else {
                    declared.methods.push(func.clone());
                }
            }
        }

        Ok(declared)
    }

    /// Shape of `ty` with local type aliases expanded.
    pub fn shape_of(&self, ty: &syn::Type) -> Shape {
        self.expand_aliases(&Shape::from_syn(ty), 0)
    }

    fn expand_aliases(&self, shape: &Shape, depth: usize) -> Shape {
        if depth >= MAX_ALIAS_DEPTH {
            return shape.clone();
        }

        shape.substitute(&mut |ident| {
            let target = self.aliases.get(&ident.to_string())?;
            Some(self.expand_aliases(&Shape::from_syn(target), depth + 1))
        })
    }
}
