mod memory;
pub use memory::Memory;

use crate::{Filter, Id, Result};

use async_trait::async_trait;

use std::fmt;

/// A stored document: the serialized form of a model.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Database and collection a driver operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace<'a> {
    pub database: &'a str,
    pub collection: &'a str,
}

impl fmt::Display for Namespace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}

/// Storage backend used by [`Db`](crate::Db).
#[async_trait]
pub trait Driver: fmt::Debug + Send + Sync + 'static {
    /// Returns the first document matching `filter`.
    async fn find_one(&self, ns: Namespace<'_>, filter: &Filter) -> Result<Option<Document>>;

    /// Returns the documents whose identifier is in `ids`, in any order.
    /// Identifiers without a document are skipped.
    async fn find_many_by_ids(&self, ns: Namespace<'_>, ids: &[Id]) -> Result<Vec<Document>>;

    /// Inserts a document, assigning a fresh identifier when its `_id` is
    /// missing or nil. Returns the stored identifier.
    async fn insert_one(&self, ns: Namespace<'_>, document: Document) -> Result<Id>;

    /// Replaces the document with identifier `id`.
    async fn replace_one(&self, ns: Namespace<'_>, id: Id, document: Document) -> Result<()>;

    /// Removes the document with identifier `id`.
    async fn delete_one(&self, ns: Namespace<'_>, id: Id) -> Result<()>;
}

/// Reads the `_id` field of a stored document.
pub fn document_id(document: &Document) -> Result<Option<Id>> {
    match document.get("_id") {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
    }
}
