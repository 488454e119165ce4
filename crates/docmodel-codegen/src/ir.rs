//! Structured description of the methods the generator emits.
//!
//! Synthesis builds these descriptors and rendering turns them into tokens;
//! neither side handles source text directly.

use proc_macro2::TokenStream;

#[derive(Debug, Clone)]
pub struct Method {
    pub name: syn::Ident,

    /// Outer attributes, e.g. `#[allow(non_snake_case)]`
    pub attrs: Vec<syn::Attribute>,

    pub docs: Vec<String>,

    pub vis: syn::Visibility,

    pub receiver: Receiver,

    pub params: Vec<Param>,

    /// Return type; `None` for `()`
    pub ret: Option<syn::Type>,

    pub body: Body,

    pub origin: Origin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    Ref,
    RefMut,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: syn::Ident,
    pub ty: syn::Type,
}

#[derive(Debug, Clone)]
pub enum Body {
    Stmts(Vec<Stmt>),

    /// A user-declared method, emitted exactly as it was read.
    Verbatim(Box<syn::ImplItemFn>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Synthesized,
    UserDeclared,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    /// `let [mut] name[: ty] = init;`
    Let {
        name: syn::Ident,
        mutable: bool,
        ty: Option<syn::Type>,
        init: Expr,
    },

    /// `let Some(name) = &scrutinee else { otherwise };`
    LetElse {
        name: syn::Ident,
        scrutinee: Expr,
        otherwise: Vec<Stmt>,
    },

    /// `place = value;`
    Assign { place: Expr, value: Expr },

    If { cond: Expr, then: Vec<Stmt> },

    /// `for (key, value) in iter { body }`
    ForEach {
        key: syn::Ident,
        value: syn::Ident,
        iter: Expr,
        body: Vec<Stmt>,
    },

    Expr(Expr),

    Continue,

    Return(Expr),
}

#[derive(Debug, Clone)]
pub enum Expr {
    /// A path to an item, e.g. `docmodel::find_by_id`
    Path(syn::Path),

    SelfValue,

    /// `base.name`
    Field(Box<Expr>, syn::Ident),

    Ident(syn::Ident),

    /// `base[index]`
    Index(Box<Expr>, Box<Expr>),

    Deref(Box<Expr>),

    Ref(Box<Expr>),

    RefMut(Box<Expr>),

    Call { func: Box<Expr>, args: Vec<Expr> },

    MethodCall {
        receiver: Box<Expr>,
        method: syn::Ident,
        args: Vec<Expr>,
    },

    Lit(syn::Lit),

    /// `::core::default::Default::default()`
    Default,

    Unit,

    Tokens(TokenStream),
}

impl Method {
    pub fn is_user_declared(&self) -> bool {
        self.origin == Origin::UserDeclared
    }

    /// Wraps a method read from a previous output.
    pub fn user_declared(item: syn::ImplItemFn) -> Method {
        let receiver = match item.sig.receiver() {
            Some(receiver) if receiver.mutability.is_some() => Receiver::RefMut,
            _ => Receiver::Ref,
        };

        Method {
            name: item.sig.ident.clone(),
            attrs: vec![],
            docs: vec![],
            vis: item.vis.clone(),
            receiver,
            params: vec![],
            ret: match &item.sig.output {
                syn::ReturnType::Default => None,
                syn::ReturnType::Type(_, ty) => Some((**ty).clone()),
            },
            body: Body::Verbatim(Box::new(item)),
            origin: Origin::UserDeclared,
        }
    }
}

impl Expr {
    pub fn ident(name: &syn::Ident) -> Expr {
        Expr::Ident(name.clone())
    }

    pub fn self_field(name: &syn::Ident) -> Expr {
        Expr::Field(Box::new(Expr::SelfValue), name.clone())
    }

    pub fn str(value: &str) -> Expr {
        Expr::Lit(syn::Lit::Str(syn::LitStr::new(
            value,
            proc_macro2::Span::call_site(),
        )))
    }

    pub fn bool(value: bool) -> Expr {
        Expr::Lit(syn::Lit::Bool(syn::LitBool::new(
            value,
            proc_macro2::Span::call_site(),
        )))
    }

    pub fn call(func: syn::Path, args: Vec<Expr>) -> Expr {
        Expr::Call {
            func: Box::new(Expr::Path(func)),
            args,
        }
    }

    pub fn method(self, method: &str, args: Vec<Expr>) -> Expr {
        Expr::MethodCall {
            receiver: Box::new(self),
            method: syn::Ident::new(method, proc_macro2::Span::call_site()),
            args,
        }
    }

    pub fn field(self, name: &syn::Ident) -> Expr {
        Expr::Field(Box::new(self), name.clone())
    }

    pub fn index(self, index: Expr) -> Expr {
        Expr::Index(Box::new(self), Box::new(index))
    }

    pub fn deref(self) -> Expr {
        Expr::Deref(Box::new(self))
    }

    pub fn by_ref(self) -> Expr {
        Expr::Ref(Box::new(self))
    }

    pub fn by_mut(self) -> Expr {
        Expr::RefMut(Box::new(self))
    }
}
