use crate::{CodegenError, Result};

use serde::Deserialize;

/// Generator settings.
///
/// Deserializable so build scripts can load it from any serde format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Type embedded by every stored model.
    pub identity_holder: String,

    /// Identifier type stored in place of a resolved reference.
    pub id_type: String,

    /// Path of the runtime crate the generated code calls into.
    pub runtime_path: String,

    /// Type names treated as time values and never resolved.
    pub time_types: Vec<String>,

    /// Declarations with these names are not read from the input.
    pub reserved_names: Vec<String>,

    /// Name of the field attribute carrying `skip`, e.g. `#[docmodel(skip)]`.
    pub opt_out_attr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identity_holder: "BaseModel".to_string(),
            id_type: "Id".to_string(),
            runtime_path: "docmodel".to_string(),
            time_types: [
                "Timestamp",
                "DateTime",
                "NaiveDate",
                "NaiveDateTime",
                "SystemTime",
                "Instant",
                "Duration",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            reserved_names: vec!["BaseModel".to_string(), "Id".to_string()],
            opt_out_attr: "docmodel".to_string(),
        }
    }
}

impl Config {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity_holder(mut self, name: impl Into<String>) -> Self {
        self.identity_holder = name.into();
        self
    }

    pub fn id_type(mut self, name: impl Into<String>) -> Self {
        self.id_type = name.into();
        self
    }

    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Adds a type name treated as a time value.
    pub fn time_type(mut self, name: impl Into<String>) -> Self {
        self.time_types.push(name.into());
        self
    }

    pub fn reserved_name(mut self, name: impl Into<String>) -> Self {
        self.reserved_names.push(name.into());
        self
    }

    pub fn opt_out_attr(mut self, name: impl Into<String>) -> Self {
        self.opt_out_attr = name.into();
        self
    }

    pub(crate) fn is_reserved(&self, name: &str) -> bool {
        self.reserved_names.iter().any(|reserved| reserved == name)
    }

    pub(crate) fn is_time_type(&self, name: &str) -> bool {
        self.time_types.iter().any(|time| time == name)
    }

    /// Parses the configured runtime path.
    pub(crate) fn runtime(&self) -> Result<syn::Path> {
        syn::parse_str(&self.runtime_path).map_err(|err| {
            CodegenError::Config(format!(
                "runtime path `{}` is not a path: {err}",
                self.runtime_path
            ))
        })
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (setting, value) in [
            ("identity holder", &self.identity_holder),
            ("id type", &self.id_type),
            ("opt-out attribute", &self.opt_out_attr),
        ] {
            if syn::parse_str::<syn::Ident>(value).is_err() {
                return Err(CodegenError::Config(format!(
                    "{setting} `{value}` is not an identifier"
                )));
            }
        }

        self.runtime().map(|_| ())
    }
}
