use crate::{Id, Result};

use serde::Serialize;
use serde_json::Value;

use std::fmt;

/// Equality filter over top-level document fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    terms: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Filter {
        Filter::default()
    }

    /// Matches the document with the given identifier.
    pub fn by_id(id: Id) -> Filter {
        Filter {
            terms: vec![("_id".to_string(), Value::String(id.to_string()))],
        }
    }

    /// Adds a `field == value` term.
    pub fn eq(mut self, field: impl Into<String>, value: impl Serialize) -> Result<Filter> {
        self.terms.push((field.into(), serde_json::to_value(value)?));
        Ok(self)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.terms.iter().map(|(field, value)| (field.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns `true` if every term equals the corresponding document field.
    pub fn matches(&self, document: &serde_json::Map<String, Value>) -> bool {
        self.terms
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, value)) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {value}")?;
        }
        f.write_str("}")
    }
}
