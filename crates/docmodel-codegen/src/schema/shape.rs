use quote::ToTokens;
use syn::parse_quote;

/// Structural view of a field type: container layers around a terminal.
#[derive(Debug, Clone)]
pub enum Shape {
    /// `HashMap<K, V>` or `BTreeMap<K, V>`.
    Map {
        path: syn::Path,
        key: syn::Type,
        value: Box<Shape>,
    },

    /// `Option<T>`.
    Pointer { elem: Box<Shape> },

    /// `Vec<T>`.
    Slice { elem: Box<Shape> },

    /// A named type. `ident` is the last path segment.
    Named { ty: syn::Type, ident: syn::Ident },

    /// Any type the generator does not look into: references, tuples,
    /// arrays, function pointers, trait objects.
    Opaque { ty: syn::Type },
}

impl Shape {
    pub fn from_syn(ty: &syn::Type) -> Shape {
        match ty {
            syn::Type::Paren(paren) => Shape::from_syn(&paren.elem),
            syn::Type::Group(group) => Shape::from_syn(&group.elem),
            syn::Type::Path(path) if path.qself.is_none() => Shape::from_path(ty, &path.path),
            _ => Shape::Opaque { ty: ty.clone() },
        }
    }

    fn from_path(ty: &syn::Type, path: &syn::Path) -> Shape {
        let Some(last) = path.segments.last() else {
            return Shape::Opaque { ty: ty.clone() };
        };

        let args = generic_types(&last.arguments);

        match (last.ident.to_string().as_str(), args.as_slice()) {
            ("Box", [elem]) => Shape::from_syn(elem),
            ("Option", [elem]) => Shape::Pointer {
                elem: Box::new(Shape::from_syn(elem)),
            },
            ("Vec", [elem]) => Shape::Slice {
                elem: Box::new(Shape::from_syn(elem)),
            },
            ("HashMap" | "BTreeMap", [key, value]) => {
                let mut path = path.clone();
                if let Some(last) = path.segments.last_mut() {
                    last.arguments = syn::PathArguments::None;
                }

                Shape::Map {
                    path,
                    key: (*key).clone(),
                    value: Box::new(Shape::from_syn(value)),
                }
            }
            _ => Shape::Named {
                ty: ty.clone(),
                ident: last.ident.clone(),
            },
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Shape::Map { .. })
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Shape::Pointer { .. })
    }

    pub fn is_slice(&self) -> bool {
        matches!(self, Shape::Slice { .. })
    }

    pub fn is_container(&self) -> bool {
        self.peel().is_some()
    }

    /// Removes exactly one container layer.
    pub fn peel(&self) -> Option<&Shape> {
        match self {
            Shape::Map { value, .. } => Some(value),
            Shape::Pointer { elem } | Shape::Slice { elem } => Some(elem),
            Shape::Named { .. } | Shape::Opaque { .. } => None,
        }
    }

    /// The innermost, non-container shape.
    pub fn terminal(&self) -> &Shape {
        let mut shape = self;
        while let Some(next) = shape.peel() {
            shape = next;
        }
        shape
    }

    /// Last path segment of the terminal, if it is a named type.
    pub fn terminal_ident(&self) -> Option<&syn::Ident> {
        match self.terminal() {
            Shape::Named { ident, .. } => Some(ident),
            _ => None,
        }
    }

    /// Number of container layers.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut shape = self;
        while let Some(next) = shape.peel() {
            depth += 1;
            shape = next;
        }
        depth
    }

    /// Key type of the outermost layer, when it is a map.
    pub fn map_key(&self) -> Option<&syn::Type> {
        match self {
            Shape::Map { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Same container layers around a different terminal.
    pub fn map_terminal(&self, terminal: &syn::Type) -> Shape {
        match self {
            Shape::Map { path, key, value } => Shape::Map {
                path: path.clone(),
                key: key.clone(),
                value: Box::new(value.map_terminal(terminal)),
            },
            Shape::Pointer { elem } => Shape::Pointer {
                elem: Box::new(elem.map_terminal(terminal)),
            },
            Shape::Slice { elem } => Shape::Slice {
                elem: Box::new(elem.map_terminal(terminal)),
            },
            Shape::Named { .. } | Shape::Opaque { .. } => Shape::from_syn(terminal),
        }
    }

    /// Replaces named terminals using `f`; `None` keeps the shape as is.
    pub(crate) fn substitute(&self, f: &mut impl FnMut(&syn::Ident) -> Option<Shape>) -> Shape {
        match self {
            Shape::Map { path, key, value } => Shape::Map {
                path: path.clone(),
                key: key.clone(),
                value: Box::new(value.substitute(f)),
            },
            Shape::Pointer { elem } => Shape::Pointer {
                elem: Box::new(elem.substitute(f)),
            },
            Shape::Slice { elem } => Shape::Slice {
                elem: Box::new(elem.substitute(f)),
            },
            Shape::Named { ident, .. } => f(ident).unwrap_or_else(|| self.clone()),
            Shape::Opaque { .. } => self.clone(),
        }
    }

    pub fn to_type(&self) -> syn::Type {
        match self {
            Shape::Map { path, key, value } => {
                generic(path.clone(), vec![key.clone(), value.to_type()])
            }
            Shape::Pointer { elem } => {
                generic(parse_quote!(::core::option::Option), vec![elem.to_type()])
            }
            Shape::Slice { elem } => generic(parse_quote!(::std::vec::Vec), vec![elem.to_type()]),
            Shape::Named { ty, .. } | Shape::Opaque { ty } => ty.clone(),
        }
    }
}

/// `path<args>`, built without reparsing `args`.
fn generic(mut path: syn::Path, args: Vec<syn::Type>) -> syn::Type {
    if let Some(last) = path.segments.last_mut() {
        last.arguments = syn::PathArguments::AngleBracketed(syn::AngleBracketedGenericArguments {
            colon2_token: None,
            lt_token: Default::default(),
            args: args.into_iter().map(syn::GenericArgument::Type).collect(),
            gt_token: Default::default(),
        });
    }

    syn::Type::Path(syn::TypePath { qself: None, path })
}

impl ToTokens for Shape {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        self.to_type().to_tokens(tokens);
    }
}

fn generic_types(arguments: &syn::PathArguments) -> Vec<&syn::Type> {
    let syn::PathArguments::AngleBracketed(args) = arguments else {
        return vec![];
    };

    args.args
        .iter()
        .filter_map(|arg| match arg {
            syn::GenericArgument::Type(ty) => Some(ty),
            _ => None,
        })
        .collect()
}
