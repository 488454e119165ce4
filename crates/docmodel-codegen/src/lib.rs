//! Source-to-source generator for document models.
//!
//! Reads plain struct declarations, classifies their fields, and emits the
//! same structs extended with persistence methods, lifecycle hooks and
//! memoized resolvers for fields that reference other stored models.

mod config;
pub use config::Config;

mod error;
pub use error::{CodegenError, Result};

mod expand;

mod generator;
pub use generator::{generate_from_files, Generator};

pub mod ir;

mod merge;
pub use merge::PreviousOutput;

pub mod schema;

mod source;
pub use source::TypeGraph;

pub mod synth;
