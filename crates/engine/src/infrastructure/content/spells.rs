//! Spell catalog loading from a CSV file.

use std::path::Path;

use charsheet_domain::{SpellCatalog, SpellDetail};
use tokio::fs;

use super::ContentError;

/// Load the spell catalog from `path`, enriched with `details`.
///
/// An unreadable file, missing included, is an error.
pub async fn load_spell_catalog(
    path: &Path,
    details: &[SpellDetail],
) -> Result<SpellCatalog, ContentError> {
    let bytes = fs::read(path).await.map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = SpellCatalog::from_csv_reader(bytes.as_slice())?.enrich(details);
    tracing::info!(path = %path.display(), spells = catalog.len(), "Loaded spell catalog");
    Ok(catalog)
}
