//! Create character use case.

use std::sync::Arc;

use charsheet_domain::{Character, CharacterEngine, CharacterName, NewCharacter};

use crate::infrastructure::locks::CharacterLocks;
use crate::infrastructure::ports::{CharacterStore, ClockPort};

use super::error::CharacterOpError;

/// Build a new character and persist it. Names are unique per store.
pub struct CreateCharacter {
    store: Arc<dyn CharacterStore>,
    engine: Arc<CharacterEngine>,
    locks: Arc<CharacterLocks>,
    clock: Arc<dyn ClockPort>,
}

impl CreateCharacter {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        engine: Arc<CharacterEngine>,
        locks: Arc<CharacterLocks>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            store,
            engine,
            locks,
            clock,
        }
    }

    pub async fn execute(&self, input: NewCharacter) -> Result<Character, CharacterOpError> {
        let name = CharacterName::new(input.name.as_str())?;
        let _guard = self.locks.lock(name.as_str()).await;

        if self.store.get_by_name(name.as_str()).await?.is_some() {
            return Err(CharacterOpError::AlreadyExists(name.to_string()));
        }

        let character = self.engine.create(input, self.clock.now())?;
        self.store.save(&character).await?;

        tracing::info!(
            character = %character.name(),
            race = %character.race(),
            class = %character.class(),
            level = character.level(),
            "Created character"
        );
        Ok(character)
    }
}
