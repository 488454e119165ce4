use std::path::PathBuf;

/// Errors that abort a generator run. No output is produced.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("parse error: {0}")]
    Parse(#[from] syn::Error),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{model}.{field}: `{holder}` must be embedded with #[serde(flatten)]")]
    IdentityNotEmbedded {
        model: String,
        field: String,
        holder: String,
    },

    #[error("{model}.{field}: `{holder}` must be embedded directly, not inside a container")]
    IdentityIndirect {
        model: String,
        field: String,
        holder: String,
    },

    #[error("{model}.{field}: containers nest {depth} levels deep, at most {max} are supported")]
    NestingTooDeep {
        model: String,
        field: String,
        depth: usize,
        max: usize,
    },

    #[error("{model}.{field}: type `{ty}` cannot hold a resolvable reference")]
    UnsupportedType {
        model: String,
        field: String,
        ty: String,
    },

    #[error("unsupported declaration `{name}`: {reason}")]
    UnsupportedDeclaration { name: String, reason: &'static str },

    #[error("{model}: no embedding path leads to the identity holder")]
    IdentityNotFound { model: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = CodegenError> = std::result::Result<T, E>;
