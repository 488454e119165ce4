use super::{document_id, Document, Driver, Namespace};
use crate::{Error, Filter, Id, Result};

use async_trait::async_trait;
use indexmap::IndexMap;

use std::{collections::HashMap, sync::Mutex};

/// In-process driver keeping documents in insertion order.
///
/// Batch lookups return documents in reverse storage order; callers must not
/// depend on the order a driver returns.
#[derive(Debug, Default)]
pub struct Memory {
    collections: Mutex<HashMap<(String, String), IndexMap<Id, Document>>>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    fn with_collection<R>(
        &self,
        ns: Namespace<'_>,
        f: impl FnOnce(&mut IndexMap<Id, Document>) -> R,
    ) -> Result<R> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|_| crate::err!("memory driver state poisoned"))?;
        let collection = collections
            .entry((ns.database.to_string(), ns.collection.to_string()))
            .or_default();
        Ok(f(collection))
    }
}

#[async_trait]
impl Driver for Memory {
    async fn find_one(&self, ns: Namespace<'_>, filter: &Filter) -> Result<Option<Document>> {
        self.with_collection(ns, |collection| {
            collection
                .values()
                .find(|document| filter.matches(document))
                .cloned()
        })
    }

    async fn find_many_by_ids(&self, ns: Namespace<'_>, ids: &[Id]) -> Result<Vec<Document>> {
        self.with_collection(ns, |collection| {
            collection
                .iter()
                .rev()
                .filter(|(id, _)| ids.contains(id))
                .map(|(_, document)| document.clone())
                .collect()
        })
    }

    async fn insert_one(&self, ns: Namespace<'_>, mut document: Document) -> Result<Id> {
        let id = match document_id(&document)? {
            Some(id) if !id.is_nil() => id,
            _ => Id::new(),
        };
        document.insert("_id".to_string(), serde_json::to_value(id)?);

        self.with_collection(ns, |collection| {
            if collection.contains_key(&id) {
                return Err(crate::err!("duplicate identifier {id} in {ns}"));
            }
            collection.insert(id, document);
            Ok(id)
        })?
    }

    async fn replace_one(&self, ns: Namespace<'_>, id: Id, mut document: Document) -> Result<()> {
        document.insert("_id".to_string(), serde_json::to_value(id)?);

        self.with_collection(ns, |collection| match collection.get_mut(&id) {
            Some(stored) => {
                *stored = document;
                Ok(())
            }
            None => Err(Error::record_not_found(format!("{ns} _id={id}"))),
        })?
    }

    async fn delete_one(&self, ns: Namespace<'_>, id: Id) -> Result<()> {
        self.with_collection(ns, |collection| match collection.shift_remove(&id) {
            Some(_) => Ok(()),
            None => Err(Error::record_not_found(format!("{ns} _id={id}"))),
        })?
    }
}
