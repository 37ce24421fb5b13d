//! Read-only character queries.
//!
//! Derived stats are recomputed on load so the result always reflects the
//! current rule tables, whatever was stored.

use std::sync::Arc;

use charsheet_domain::{Character, CharacterEngine};

use crate::infrastructure::ports::CharacterStore;

use super::error::CharacterOpError;
use super::load_character;

pub struct ViewCharacter {
    store: Arc<dyn CharacterStore>,
    engine: Arc<CharacterEngine>,
}

impl ViewCharacter {
    pub fn new(store: Arc<dyn CharacterStore>, engine: Arc<CharacterEngine>) -> Self {
        Self { store, engine }
    }

    pub async fn execute(&self, name: &str) -> Result<Character, CharacterOpError> {
        let mut character = load_character(self.store.as_ref(), name).await?;
        self.engine.refresh(&mut character);
        Ok(character)
    }
}

pub struct ListCharacters {
    store: Arc<dyn CharacterStore>,
    engine: Arc<CharacterEngine>,
}

impl ListCharacters {
    pub fn new(store: Arc<dyn CharacterStore>, engine: Arc<CharacterEngine>) -> Self {
        Self { store, engine }
    }

    pub async fn execute(&self) -> Result<Vec<Character>, CharacterOpError> {
        let mut characters = self.store.list().await?;
        for character in &mut characters {
            self.engine.refresh(character);
        }
        Ok(characters)
    }
}
