//! Persistence functions invoked by generated model methods.
//!
//! Every function has a `_with_ctx` variant taking an explicit [`Context`];
//! the plain variant applies the handle's configured operation timeout.

use crate::{driver::Document, Context, Db, Error, Filter, Id, Model, Result};

use std::collections::HashMap;

/// Loads the first document matching `filter` into `model`, then runs the
/// `queried` hook.
pub fn find<M: Model>(db: &Db, model: &mut M, filter: Filter) -> Result<()> {
    find_with_ctx(&db.default_context(), db, model, filter)
}

pub fn find_with_ctx<M: Model>(
    ctx: &Context,
    db: &Db,
    model: &mut M,
    filter: Filter,
) -> Result<()> {
    let ns = db.namespace(model.collection_name())?;
    tracing::trace!(%ns, %filter, "find");

    let document = db
        .run(ctx, db.driver().find_one(ns, &filter))?
        .ok_or_else(|| Error::record_not_found(format!("{ns} filter={filter}")))?;

    *model = decode(document)?;
    model.queried()
}

/// Loads the document with identifier `id` into `model`.
///
/// A missing document is an error.
pub fn find_by_id<M: Model>(db: &Db, model: &mut M, id: &Id) -> Result<()> {
    find_by_id_with_ctx(&db.default_context(), db, model, id)
}

pub fn find_by_id_with_ctx<M: Model>(
    ctx: &Context,
    db: &Db,
    model: &mut M,
    id: &Id,
) -> Result<()> {
    find_with_ctx(ctx, db, model, Filter::by_id(*id))
}

/// Loads every document whose identifier is in `ids` into `results`.
///
/// `results` is replaced with the loaded models ordered by the position of
/// their identifier in `ids`. Identifiers without a document are omitted
/// rather than reported, and a repeated identifier yields one model.
pub fn find_many_by_ids<M: Model>(db: &Db, results: &mut Vec<M>, ids: &[Id]) -> Result<()> {
    find_many_by_ids_with_ctx(&db.default_context(), db, results, ids)
}

pub fn find_many_by_ids_with_ctx<M: Model>(
    ctx: &Context,
    db: &Db,
    results: &mut Vec<M>,
    ids: &[Id],
) -> Result<()> {
    results.clear();
    if ids.is_empty() {
        return Ok(());
    }

    let collection = M::default().collection_name();
    let ns = db.namespace(collection)?;
    tracing::trace!(%ns, ids = ids.len(), "find_many_by_ids");

    let documents = db.run(ctx, db.driver().find_many_by_ids(ns, ids))?;

    let mut positions = HashMap::with_capacity(ids.len());
    for (position, id) in ids.iter().enumerate() {
        positions.entry(*id).or_insert(position);
    }

    let mut loaded = Vec::with_capacity(documents.len());
    for document in documents {
        let model: M = decode(document)?;
        let Some(&position) = positions.get(&model.id()) else {
            tracing::warn!(%ns, id = %model.id(), "driver returned an unrequested document");
            continue;
        };
        loaded.push((position, model));
    }

    loaded.sort_by_key(|(position, _)| *position);
    loaded.dedup_by_key(|(position, _)| *position);

    if loaded.len() < positions.len() {
        tracing::debug!(
            %ns,
            requested = positions.len(),
            found = loaded.len(),
            "batch lookup omitted missing documents"
        );
    }

    for (_, mut model) in loaded {
        model.queried()?;
        results.push(model);
    }

    Ok(())
}

/// Inserts `model` as a new document and stores the assigned identifier.
///
/// Hooks run in the order `creating`, `saving`, then after the insert
/// `created`, `saved`.
pub fn create<M: Model>(db: &Db, model: &mut M) -> Result<()> {
    create_with_ctx(&db.default_context(), db, model)
}

pub fn create_with_ctx<M: Model>(ctx: &Context, db: &Db, model: &mut M) -> Result<()> {
    model.creating()?;
    model.saving()?;

    let ns = db.namespace(model.collection_name())?;
    let document = encode(model)?;
    let id = db.run(ctx, db.driver().insert_one(ns, document))?;
    tracing::debug!(%ns, %id, "created");

    model.set_id(id);
    model.created()?;
    model.saved()
}

/// Replaces the stored document of `model`.
///
/// Hooks run in the order `updating`, `saving`, then after the write
/// `updated`, `saved`.
pub fn update<M: Model>(db: &Db, model: &mut M) -> Result<()> {
    update_with_ctx(&db.default_context(), db, model)
}

pub fn update_with_ctx<M: Model>(ctx: &Context, db: &Db, model: &mut M) -> Result<()> {
    model.updating()?;
    model.saving()?;

    let ns = db.namespace(model.collection_name())?;
    let id = persisted_id(model)?;
    let document = encode(model)?;
    db.run(ctx, db.driver().replace_one(ns, id, document))?;
    tracing::debug!(%ns, %id, "updated");

    model.updated()?;
    model.saved()
}

/// Removes the stored document of `model`.
pub fn delete<M: Model>(db: &Db, model: &mut M) -> Result<()> {
    delete_with_ctx(&db.default_context(), db, model)
}

pub fn delete_with_ctx<M: Model>(ctx: &Context, db: &Db, model: &mut M) -> Result<()> {
    model.deleting()?;

    let ns = db.namespace(model.collection_name())?;
    let id = persisted_id(model)?;
    db.run(ctx, db.driver().delete_one(ns, id))?;
    tracing::debug!(%ns, %id, "deleted");

    model.deleted()
}

fn persisted_id<M: Model>(model: &M) -> Result<Id> {
    let id = model.id();
    if id.is_nil() {
        return Err(Error::invalid_model(format!(
            "{} has no identifier; create it first",
            model.collection_name()
        )));
    }
    Ok(id)
}

fn encode<M: Model>(model: &M) -> Result<Document> {
    match serde_json::to_value(model)? {
        serde_json::Value::Object(document) => Ok(document),
        other => Err(Error::invalid_model(format!(
            "{} serialized to a non-document value: {other}",
            model.collection_name()
        ))),
    }
}

fn decode<M: Model>(document: Document) -> Result<M> {
    Ok(serde_json::from_value(serde_json::Value::Object(document))?)
}
