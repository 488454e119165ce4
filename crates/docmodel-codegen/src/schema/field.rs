use super::{Name, Shape};
use crate::{source::TypeGraph, CodegenError, Config, Result};

use syn::punctuated::Punctuated;

const PRIMITIVES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
    "usize", "f32", "f64", "String", "str",
];

#[derive(Debug, Clone)]
pub struct Field {
    /// Index of field in the containing model
    pub id: usize,

    pub name: Name,

    pub vis: syn::Visibility,

    /// Attributes copied to the output, without the opt-out attribute
    pub attrs: Vec<syn::Attribute>,

    /// Declared type
    pub ty: syn::Type,

    /// Declared type with local aliases expanded
    pub shape: Shape,

    pub flags: FieldFlags,

    /// True if the field carries the opt-out attribute, e.g. `#[docmodel(skip)]`
    pub opt_out: bool,
}

/// Classification of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldFlags {
    /// Terminal type is a primitive, time or identifier type
    pub builtin: bool,

    /// Field is flattened into its parent with `#[serde(flatten)]`
    pub embedded: bool,

    /// Field type is the identity holder itself
    pub identity_holder: bool,

    /// Field points at another type by identifier
    pub reference: bool,

    pub map: bool,
    pub pointer: bool,
    pub slice: bool,

    /// Reference whose terminal is a stored model; gets a resolver
    pub resolvable: bool,
}

impl Field {
    pub(super) fn from_ast(
        field: &syn::Field,
        model: &syn::Ident,
        id: usize,
        graph: &TypeGraph,
        config: &Config,
    ) -> Result<Field> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "model fields must be named").into());
        };

        let name = Name::from_ident(ident);
        let shape = graph.shape_of(&field.ty);

        let mut opt_out = false;
        let mut embedded = false;
        let mut attrs = vec![];

        for attr in &field.attrs {
            if attr.path().is_ident(config.opt_out_attr.as_str()) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        opt_out = true;
                        Ok(())
                    } else {
                        Err(meta.error("unsupported attribute; expected `skip`"))
                    }
                })?;
                continue;
            }

            if attr.path().is_ident("serde") && is_flatten(attr)? {
                embedded = true;
            }

            attrs.push(attr.clone());
        }

        let terminal = shape.terminal_ident().map(|ident| ident.to_string());
        let holds_identity = terminal.as_deref() == Some(config.identity_holder.as_str());

        if holds_identity && !opt_out {
            if !embedded {
                return Err(CodegenError::IdentityNotEmbedded {
                    model: model.to_string(),
                    field: name.text,
                    holder: config.identity_holder.clone(),
                });
            }

            if shape.is_container() {
                return Err(CodegenError::IdentityIndirect {
                    model: model.to_string(),
                    field: name.text,
                    holder: config.identity_holder.clone(),
                });
            }
        }

        let builtin = terminal
            .as_deref()
            .is_some_and(|terminal| is_builtin(terminal, config));
        let identity_holder = holds_identity && !opt_out;
        let named = matches!(shape.terminal(), Shape::Named { .. });

        let flags = FieldFlags {
            builtin,
            embedded,
            identity_holder,
            reference: named && !builtin && !embedded && !identity_holder && !opt_out,
            map: shape.is_map(),
            pointer: shape.is_pointer(),
            slice: shape.is_slice(),
            resolvable: false,
        };

        Ok(Field {
            id,
            name,
            vis: field.vis.clone(),
            attrs,
            ty: field.ty.clone(),
            shape,
            flags,
            opt_out,
        })
    }

    pub fn ident(&self) -> &syn::Ident {
        &self.name.ident
    }

    /// Key type of the outermost layer, when it is a map.
    pub fn map_key(&self) -> Option<&syn::Type> {
        self.shape.map_key()
    }

    /// Name of the struct this field is resolved into, if resolvable.
    pub fn target(&self) -> Option<&syn::Ident> {
        if self.flags.resolvable {
            self.shape.terminal_ident()
        } else {
            None
        }
    }
}

fn is_builtin(name: &str, config: &Config) -> bool {
    PRIMITIVES.contains(&name) || config.is_time_type(name) || name == config.id_type
}

fn is_flatten(attr: &syn::Attribute) -> Result<bool> {
    let syn::Meta::List(list) = &attr.meta else {
        return Ok(false);
    };

    let metas = list.parse_args_with(Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated)?;
    Ok(metas.iter().any(|meta| meta.path().is_ident("flatten")))
}
