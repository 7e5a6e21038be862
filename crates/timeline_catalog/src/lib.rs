//! Timeline catalog: typed REST client for the media timeline backend.
mod catalog;
mod error;
mod handle;
mod wire;

pub use catalog::{
    BatchJob, CatalogSettings, CatalogStats, ImportFile, ImportJobState, RemoteCatalog,
    RestCatalog,
};
pub use error::CatalogError;
pub use handle::{CatalogEvent, CatalogHandle};
