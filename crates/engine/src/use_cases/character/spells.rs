//! Learn and prepare spell use cases.

use std::sync::Arc;

use charsheet_domain::{CharacterEngine, Spell};

use crate::infrastructure::locks::CharacterLocks;
use crate::infrastructure::ports::CharacterStore;

use super::error::CharacterOpError;
use super::load_character;

/// Add a spell for a learn-mode caster (bard, ranger, sorcerer, warlock).
pub struct LearnSpell {
    store: Arc<dyn CharacterStore>,
    engine: Arc<CharacterEngine>,
    locks: Arc<CharacterLocks>,
}

impl LearnSpell {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        engine: Arc<CharacterEngine>,
        locks: Arc<CharacterLocks>,
    ) -> Self {
        Self {
            store,
            engine,
            locks,
        }
    }

    pub async fn execute(&self, name: &str, spell: &str) -> Result<Spell, CharacterOpError> {
        let _guard = self.locks.lock(name).await;
        let mut character = load_character(self.store.as_ref(), name).await?;

        let learned = self
            .engine
            .learn_spell(&mut character, spell)
            .inspect_err(|e| {
                tracing::debug!(
                    character = %name.trim(),
                    spell = %spell,
                    code = e.error_code(),
                    "Learn rejected"
                )
            })?;
        self.store.save(&character).await?;

        tracing::info!(character = %character.name(), spell = %learned.name, "Learned spell");
        Ok(learned)
    }
}

/// Add a spell for a prepare-mode caster (cleric, druid, paladin, wizard).
pub struct PrepareSpell {
    store: Arc<dyn CharacterStore>,
    engine: Arc<CharacterEngine>,
    locks: Arc<CharacterLocks>,
}

impl PrepareSpell {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        engine: Arc<CharacterEngine>,
        locks: Arc<CharacterLocks>,
    ) -> Self {
        Self {
            store,
            engine,
            locks,
        }
    }

    pub async fn execute(&self, name: &str, spell: &str) -> Result<Spell, CharacterOpError> {
        let _guard = self.locks.lock(name).await;
        let mut character = load_character(self.store.as_ref(), name).await?;

        let prepared = self
            .engine
            .prepare_spell(&mut character, spell)
            .inspect_err(|e| {
                tracing::debug!(
                    character = %name.trim(),
                    spell = %spell,
                    code = e.error_code(),
                    "Prepare rejected"
                )
            })?;
        self.store.save(&character).await?;

        tracing::info!(
            character = %character.name(),
            spell = %prepared.name,
            level = prepared.level.as_number(),
            "Prepared spell"
        );
        Ok(prepared)
    }
}
