//! Domain types: tracks and the catalog that orders them

mod catalog;
mod track;

pub use catalog::Catalog;
pub use track::Track;
