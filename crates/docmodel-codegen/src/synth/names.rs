use proc_macro2::Span;

const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of nesting levels that can be given distinct local names.
pub const MAX_LEVELS: usize = ALPHABET.len();

/// Local variable names used at one nesting level of a resolver body.
#[derive(Debug, Clone)]
pub(crate) struct LevelNames {
    /// Loop key, e.g. `ka`
    pub(crate) key: syn::Ident,

    /// Loop value, e.g. `va`
    pub(crate) value: syn::Ident,

    /// Freshly inserted pointee, e.g. `a_assign`
    pub(crate) assign: syn::Ident,

    /// Dereferenced identifier, e.g. `a_id`
    pub(crate) id: syn::Ident,

    /// Map entry being resolved, e.g. `a_value`
    pub(crate) entry: syn::Ident,
}

impl LevelNames {
    pub(crate) fn new(level: usize) -> Option<LevelNames> {
        let letter = char::from(*ALPHABET.get(level)?);
        let ident = |name: String| syn::Ident::new(&name, Span::call_site());

        Some(LevelNames {
            key: ident(format!("k{letter}")),
            value: ident(format!("v{letter}")),
            assign: ident(format!("{letter}_assign")),
            id: ident(format!("{letter}_id")),
            entry: ident(format!("{letter}_value")),
        })
    }

    /// True if the names at `level` are not snake case.
    pub(crate) fn is_upper(level: usize) -> bool {
        ALPHABET.get(level).is_some_and(u8::is_ascii_uppercase)
    }
}
