use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::{fmt, str::FromStr};

/// Identifier of a stored document.
///
/// The default value is the nil identifier, which marks a model that has not
/// been persisted yet.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Id(Uuid);

impl Id {
    /// Generates a new random identifier.
    pub fn new() -> Id {
        Id(Uuid::new_v4())
    }

    pub const fn nil() -> Id {
        Id(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for Id {
    fn from(value: Uuid) -> Id {
        Id(value)
    }
}

impl FromStr for Id {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Id> {
        Ok(Id(Uuid::parse_str(s)?))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Identity holder embedded by every stored model.
///
/// Embed it with `#[serde(flatten)]`; the identifier is stored under `_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseModel {
    #[serde(rename = "_id", default)]
    pub id: Id,
}

impl BaseModel {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}
