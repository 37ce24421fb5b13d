//! Application state and composition.

use std::sync::Arc;

use charsheet_domain::{CharacterEngine, RuleTables};

use crate::infrastructure::{
    clock::SystemClock,
    config::AppConfig,
    content::{load_spell_catalog, ContentError, ReferenceData},
    persistence::JsonFileCharacterStore,
    ports::{CharacterStore, ClockPort},
};
use crate::use_cases::CharacterUseCases;

/// Main application state.
///
/// Holds the store and every use case. The rules engine and its tables are
/// built once and shared.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub engine: Arc<CharacterEngine>,
}

/// Container for the store ports.
pub struct Repositories {
    pub character: Arc<dyn CharacterStore>,
}

/// Container for all use cases.
pub struct UseCases {
    pub character: CharacterUseCases,
}

impl App {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        engine: Arc<CharacterEngine>,
        reference: Arc<ReferenceData>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let character = CharacterUseCases::new(store.clone(), engine.clone(), reference, clock);

        Self {
            repositories: Repositories { character: store },
            use_cases: UseCases { character },
            engine,
        }
    }

    /// Load content files named by `config` and open the JSON store.
    pub async fn load(config: &AppConfig) -> Result<Self, ContentError> {
        let reference = ReferenceData::load(&config.equipment_cache, &config.spell_details).await;
        let catalog = load_spell_catalog(&config.spells_csv, reference.spell_details()).await?;

        let engine = CharacterEngine::new(Arc::new(RuleTables::standard()), Arc::new(catalog));
        let store = JsonFileCharacterStore::new(config.store_path.clone());
        tracing::debug!(store = %store.path().display(), "Opened character store");

        Ok(Self::new(
            Arc::new(store),
            Arc::new(engine),
            Arc::new(reference),
            Arc::new(SystemClock::new()),
        ))
    }
}
