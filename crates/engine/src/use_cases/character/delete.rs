//! Delete character use case.

use std::sync::Arc;

use crate::infrastructure::locks::CharacterLocks;
use crate::infrastructure::ports::CharacterStore;

use super::error::CharacterOpError;

pub struct DeleteCharacter {
    store: Arc<dyn CharacterStore>,
    locks: Arc<CharacterLocks>,
}

impl DeleteCharacter {
    pub fn new(store: Arc<dyn CharacterStore>, locks: Arc<CharacterLocks>) -> Self {
        Self { store, locks }
    }

    pub async fn execute(&self, name: &str) -> Result<(), CharacterOpError> {
        let _guard = self.locks.lock(name).await;

        self.store.delete(name).await.map_err(|e| {
            if e.is_not_found() {
                CharacterOpError::NotFound(name.trim().to_string())
            } else {
                CharacterOpError::Repo(e)
            }
        })?;

        tracing::info!(character = %name.trim(), "Deleted character");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCharacterStore, RepoError};

    #[tokio::test]
    async fn deletes_by_name() {
        let mut store = MockCharacterStore::new();
        store.expect_delete().times(1).returning(|_| Ok(()));

        DeleteCharacter::new(Arc::new(store), Arc::new(CharacterLocks::new()))
            .execute("Merlin")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_character_maps_to_not_found() {
        let mut store = MockCharacterStore::new();
        store
            .expect_delete()
            .returning(|name| Err(RepoError::not_found("Character", name)));

        let err = DeleteCharacter::new(Arc::new(store), Arc::new(CharacterLocks::new()))
            .execute("Ghost")
            .await
            .unwrap_err();

        assert!(matches!(err, CharacterOpError::NotFound(name) if name == "Ghost"));
    }
}
