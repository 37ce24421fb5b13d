//! In-process character store for tests and dry runs.

use async_trait::async_trait;
use charsheet_domain::{Character, CharacterId};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{CharacterStore, RepoError};

/// Same contract as the JSON store, nothing touches disk.
#[derive(Default)]
pub struct InMemoryCharacterStore {
    characters: RwLock<Vec<Character>>,
}

impl InMemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_characters(characters: impl IntoIterator<Item = Character>) -> Self {
        Self {
            characters: RwLock::new(characters.into_iter().collect()),
        }
    }
}

#[async_trait]
impl CharacterStore for InMemoryCharacterStore {
    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        let mut characters = self.characters.write().await;

        if characters
            .iter()
            .any(|c| c.id() != character.id() && c.name().matches(character.name().as_str()))
        {
            return Err(RepoError::conflict(format!(
                "name '{}' already taken",
                character.name()
            )));
        }

        match characters.iter_mut().find(|c| c.id() == character.id()) {
            Some(existing) => *existing = character.clone(),
            None => characters.push(character.clone()),
        }
        Ok(())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Character>, RepoError> {
        let characters = self.characters.read().await;
        Ok(characters.iter().find(|c| c.name().matches(name)).cloned())
    }

    async fn get_by_id(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let characters = self.characters.read().await;
        Ok(characters.iter().find(|c| c.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Character>, RepoError> {
        Ok(self.characters.read().await.clone())
    }

    async fn delete(&self, name: &str) -> Result<(), RepoError> {
        let mut characters = self.characters.write().await;
        let before = characters.len();
        characters.retain(|c| !c.name().matches(name));
        if characters.len() == before {
            return Err(RepoError::not_found("Character", name.trim()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::test_support::{fighter, wizard};

    #[tokio::test]
    async fn round_trips_by_name_and_id() {
        let store = InMemoryCharacterStore::new();
        let merlin = wizard("Merlin");
        store.save(&merlin).await.unwrap();

        assert_eq!(store.get_by_name("merlin").await.unwrap(), Some(merlin.clone()));
        assert_eq!(store.get_by_id(merlin.id()).await.unwrap(), Some(merlin));
    }

    #[tokio::test]
    async fn rejects_name_owned_by_another_id() {
        let store = InMemoryCharacterStore::with_characters([wizard("Merlin")]);

        let err = store.save(&fighter("MERLIN")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let store = InMemoryCharacterStore::with_characters([wizard("Merlin"), fighter("Conan")]);

        store.delete("conan").await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert!(store.delete("Conan").await.unwrap_err().is_not_found());
    }
}
