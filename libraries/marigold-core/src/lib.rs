//! Marigold Player Core
//!
//! Platform-agnostic track and catalog types shared by the playback library
//! and every host application.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track` and the ordered, immutable `Catalog`
//! - **Catalog Loading**: TOML catalogs and the built-in demo playlist
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use marigold_core::{Catalog, Track};
//!
//! let catalog = Catalog::new(vec![
//!     Track::new("Sunny", "Benjamin Tissot", "https://example.com/sunny.mp3"),
//! ]);
//!
//! assert_eq!(catalog.len(), 1);
//! assert_eq!(catalog.get(0).map(|t| t.title.as_str()), Some("Sunny"));
//! assert!(catalog.get(1).is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{Catalog, Track};
