use super::{Field, Name};
use crate::{source::TypeGraph, Config, Result};

#[derive(Debug, Clone)]
pub struct Model {
    pub name: Name,

    pub vis: syn::Visibility,

    /// Struct attributes, derives included
    pub attrs: Vec<syn::Attribute>,

    /// Fields in declaration order
    pub fields: Vec<Field>,

    /// True if the struct embeds the identity holder, directly or through
    /// embedded structs, and so lives in its own collection
    pub collection: bool,

    /// Field path from the struct to its identity holder
    pub identity_path: Vec<syn::Ident>,
}

impl Model {
    pub(super) fn from_ast(
        item: &syn::ItemStruct,
        graph: &TypeGraph,
        config: &Config,
    ) -> Result<Model> {
        let syn::Fields::Named(node) = &item.fields else {
            return Err(syn::Error::new_spanned(item, "model fields must be named").into());
        };

        let fields = node
            .named
            .iter()
            .enumerate()
            .map(|(index, field)| Field::from_ast(field, &item.ident, index, graph, config))
            .collect::<Result<Vec<_>>>()?;

        Ok(Model {
            name: Name::from_ident(&item.ident),
            vis: item.vis.clone(),
            attrs: item.attrs.clone(),
            fields,
            collection: false,
            identity_path: vec![],
        })
    }

    pub fn ident(&self) -> &syn::Ident {
        &self.name.ident
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name.text == name)
    }

    /// Fields in output order: embedded fields first, then the rest in
    /// declaration order.
    pub fn ordered_fields(&self) -> impl Iterator<Item = &Field> {
        let embedded = self.fields.iter().filter(|field| field.flags.embedded);
        let other = self.fields.iter().filter(|field| !field.flags.embedded);
        embedded.chain(other)
    }

    pub fn resolvable_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.flags.resolvable)
    }
}
