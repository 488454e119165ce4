mod context;
pub use context::Context;

pub mod crud;
pub use crud::{
    create, create_with_ctx, delete, delete_with_ctx, find, find_by_id, find_by_id_with_ctx,
    find_many_by_ids, find_many_by_ids_with_ctx, find_with_ctx, update, update_with_ctx,
};

pub mod db;
pub use db::Db;

pub mod driver;

mod error;
pub use error::{Error, IntoError};

mod filter;
pub use filter::Filter;

mod id;
pub use id::{BaseModel, Id};

mod model;
pub use model::Model;

mod resolved;
pub use resolved::Resolved;

pub use async_trait::async_trait;

pub type Result<T, E = Error> = core::result::Result<T, E>;
