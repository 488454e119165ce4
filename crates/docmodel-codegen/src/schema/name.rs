use heck::ToLowerCamelCase;
use syn::ext::IdentExt;

/// Identifier of a struct or field, with the derived names the generator
/// builds from it.
#[derive(Debug, Clone)]
pub struct Name {
    pub ident: syn::Ident,

    /// Identifier text without a raw `r#` prefix.
    pub text: String,
}

impl Name {
    pub fn from_ident(ident: &syn::Ident) -> Name {
        Name {
            ident: ident.clone(),
            text: ident.unraw().to_string(),
        }
    }

    /// `prefix` followed by this name, e.g. `err_author`.
    pub fn prefixed(&self, prefix: &str) -> syn::Ident {
        syn::Ident::new(&format!("{prefix}{}", self.text), self.ident.span())
    }

    pub fn lower_camel(&self) -> String {
        self.text.to_lower_camel_case()
    }
}
