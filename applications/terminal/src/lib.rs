//! Marigold Terminal - playlist player host for the command line

pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod media;
pub mod session;
pub mod view;

use marigold_core::Catalog;
use std::path::Path;

pub use driver::{Flow, TerminalPlayer};
pub use error::{Result, TerminalError};

/// Load the catalog at `path`, or the built-in demo playlist
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path).map_err(TerminalError::from),
        None => Ok(Catalog::demo()),
    }
}
