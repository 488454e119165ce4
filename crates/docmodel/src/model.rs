use crate::{Id, Result};

use serde::{de::DeserializeOwned, Serialize};

/// A document type stored in its own collection.
///
/// Implementations are generated with no-op lifecycle hooks. A hook whose
/// body was edited by hand is carried over on every regeneration.
pub trait Model: Default + Serialize + DeserializeOwned + Send + 'static {
    /// Name of the collection documents of this type are stored in.
    fn collection_name(&self) -> &'static str;

    fn id(&self) -> Id;

    fn set_id(&mut self, id: Id);

    /// Called after the model has been loaded by a query.
    fn queried(&mut self) -> Result<()>;

    /// Called before a new model is inserted.
    fn creating(&mut self) -> Result<()>;

    /// Called after a new model has been inserted.
    fn created(&mut self) -> Result<()>;

    /// Called before an existing model is replaced.
    fn updating(&mut self) -> Result<()>;

    /// Called after an existing model has been replaced.
    fn updated(&mut self) -> Result<()>;

    /// Called before a model is written, on both create and update.
    fn saving(&mut self) -> Result<()>;

    /// Called after a model has been written, on both create and update.
    fn saved(&mut self) -> Result<()>;

    fn deleting(&mut self) -> Result<()>;

    fn deleted(&mut self) -> Result<()>;
}
