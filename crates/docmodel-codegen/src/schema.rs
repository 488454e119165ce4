mod chain;
pub use chain::{Chain, Link, LinkKind};

mod field;
pub use field::{Field, FieldFlags};

mod model;
pub use model::Model;

mod name;
pub use name::Name;

mod shape;
pub use shape::Shape;

use crate::{source::TypeGraph, CodegenError, Config, Result};

use indexmap::IndexMap;
use proc_macro2::TokenTree;
use quote::ToTokens;

use std::collections::HashSet;

/// Classified view of every struct in a [`TypeGraph`].
#[derive(Debug)]
pub struct Schema {
    pub models: Vec<Model>,
}

impl Schema {
    /// Classifies every struct. Runs only after the whole graph is known,
    /// so cross-references between structs resolve in any order.
    pub fn from_graph(graph: &TypeGraph, config: &Config) -> Result<Schema> {
        let mut models = IndexMap::new();
        for item in graph.structs() {
            let model = Model::from_ast(item, graph, config)?;
            models.insert(model.name.text.clone(), model);
        }

        // Identity holders propagate through embedding.
        let paths: Vec<_> = models
            .keys()
            .map(|name| identity_path(name, &models, &mut HashSet::new()))
            .collect();

        for (model, path) in models.values_mut().zip(paths) {
            if let Some(path) = path {
                model.collection = true;
                model.identity_path = path;
            }
        }

        let collections: HashSet<String> = models
            .values()
            .filter(|model| model.collection)
            .map(|model| model.name.text.clone())
            .collect();

        for model in models.values_mut() {
            for field in &mut model.fields {
                if field.flags.reference {
                    field.flags.resolvable = field
                        .shape
                        .terminal_ident()
                        .is_some_and(|ident| collections.contains(&ident.to_string()));
                } else if let Shape::Opaque { ty } = field.shape.terminal() {
                    if !field.opt_out && mentions_any(ty, &collections) {
                        return Err(CodegenError::UnsupportedType {
                            model: model.name.text.clone(),
                            field: field.name.text.clone(),
                            ty: ty.to_token_stream().to_string(),
                        });
                    }
                }
            }

            tracing::debug!(
                model = %model.name.text,
                collection = model.collection,
                fields = model.fields.len(),
                resolvable = model.resolvable_fields().count(),
                "classified struct"
            );
        }

        Ok(Schema {
            models: models.into_values().collect(),
        })
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.name.text == name)
    }
}

/// Field path from `name` to its identity holder, following embedded
/// fields. Embedding cycles are cut by `visiting`.
fn identity_path(
    name: &str,
    models: &IndexMap<String, Model>,
    visiting: &mut HashSet<String>,
) -> Option<Vec<syn::Ident>> {
    let model = models.get(name)?;
    if !visiting.insert(name.to_string()) {
        return None;
    }

    let mut found = None;

    for field in model.fields.iter().filter(|field| field.flags.embedded && !field.opt_out) {
        if field.flags.identity_holder {
            found = Some(vec![field.ident().clone()]);
            break;
        }

        let Shape::Named { ident, .. } = &field.shape else {
            continue;
        };

        if let Some(mut path) = identity_path(&ident.to_string(), models, visiting) {
            path.insert(0, field.ident().clone());
            found = Some(path);
            break;
        }
    }

    visiting.remove(name);
    found
}

/// Returns `true` if any identifier inside `ty` names one of `names`.
fn mentions_any(ty: &syn::Type, names: &HashSet<String>) -> bool {
    fn walk(tokens: proc_macro2::TokenStream, names: &HashSet<String>) -> bool {
        tokens.into_iter().any(|tree| match tree {
            TokenTree::Ident(ident) => names.contains(&ident.to_string()),
            TokenTree::Group(group) => walk(group.stream(), names),
            _ => false,
        })
    }

    walk(ty.to_token_stream(), names)
}
