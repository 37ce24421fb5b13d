//! Loaders for static rule content: the spell CSV and the reference cache.

mod reference;
mod spells;

use std::path::PathBuf;

use charsheet_domain::CatalogLoadError;

pub use reference::ReferenceData;
pub use spells::load_spell_catalog;

/// Errors that can occur while loading content files.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Spell catalog error: {0}")]
    Catalog(#[from] CatalogLoadError),
}
