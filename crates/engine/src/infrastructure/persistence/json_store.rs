//! Flat-file character store: one pretty-printed JSON array.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use charsheet_domain::{Character, CharacterId};
use tokio::fs;
use tokio::sync::Mutex;

use crate::infrastructure::ports::{CharacterStore, RepoError};

/// Character store backed by a single JSON file.
///
/// A missing or empty file is an empty store. Writes go to a sibling temp
/// file that is then renamed over the original. All file access is
/// serialized through an internal mutex.
pub struct JsonFileCharacterStore {
    path: PathBuf,
    file_lock: Mutex<()>,
}

impl JsonFileCharacterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self.path.file_name().unwrap_or_default().to_os_string();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }

    async fn read_all(&self) -> Result<Vec<Character>, RepoError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => serde_json::from_str(&content).map_err(RepoError::serialization),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(RepoError::io("read", e)),
        }
    }

    async fn write_all(&self, characters: &[Character]) -> Result<(), RepoError> {
        let json = serde_json::to_string_pretty(characters).map_err(RepoError::serialization)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| RepoError::io("create_dir", e))?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, json)
            .await
            .map_err(|e| RepoError::io("write", e))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| RepoError::io("rename", e))
    }
}

#[async_trait]
impl CharacterStore for JsonFileCharacterStore {
    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        let _guard = self.file_lock.lock().await;
        let mut characters = self.read_all().await?;

        if let Some(owner) = characters
            .iter()
            .find(|c| c.id() != character.id() && c.name().matches(character.name().as_str()))
        {
            return Err(RepoError::conflict(format!(
                "name '{}' already belongs to character {}",
                owner.name(),
                owner.id()
            )));
        }

        match characters.iter_mut().find(|c| c.id() == character.id()) {
            Some(existing) => *existing = character.clone(),
            None => characters.push(character.clone()),
        }

        self.write_all(&characters).await?;
        tracing::debug!(
            character = %character.name(),
            path = %self.path.display(),
            "Saved character"
        );
        Ok(())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Character>, RepoError> {
        let _guard = self.file_lock.lock().await;
        let characters = self.read_all().await?;
        Ok(characters.into_iter().find(|c| c.name().matches(name)))
    }

    async fn get_by_id(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let _guard = self.file_lock.lock().await;
        let characters = self.read_all().await?;
        Ok(characters.into_iter().find(|c| c.id() == id))
    }

    async fn list(&self) -> Result<Vec<Character>, RepoError> {
        let _guard = self.file_lock.lock().await;
        self.read_all().await
    }

    async fn delete(&self, name: &str) -> Result<(), RepoError> {
        let _guard = self.file_lock.lock().await;
        let mut characters = self.read_all().await?;

        let position = characters
            .iter()
            .position(|c| c.name().matches(name))
            .ok_or_else(|| RepoError::not_found("Character", name.trim()))?;
        characters.remove(position);

        self.write_all(&characters).await?;
        tracing::debug!(character = %name.trim(), path = %self.path.display(), "Deleted character");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::test_support::{fighter, wizard};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileCharacterStore {
        JsonFileCharacterStore::new(dir.path().join("characters.json"))
    }

    #[tokio::test]
    async fn missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.list().await.unwrap().is_empty());
        assert!(store.get_by_name("Merlin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "  \n").unwrap();

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_by_name_and_id() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let merlin = wizard("Merlin");

        store.save(&merlin).await.unwrap();

        let by_name = store.get_by_name("MERLIN").await.unwrap().unwrap();
        assert_eq!(by_name, merlin);
        let by_id = store.get_by_id(merlin.id()).await.unwrap().unwrap();
        assert_eq!(by_id, merlin);
    }

    #[tokio::test]
    async fn file_is_a_pretty_json_array() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&wizard("Merlin")).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(1));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn save_replaces_by_id() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let merlin = wizard("Merlin");
        store.save(&merlin).await.unwrap();
        store.save(&fighter("Conan")).await.unwrap();

        store.save(&merlin).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name().as_str(), "Merlin");
        assert_eq!(all[1].name().as_str(), "Conan");
    }

    #[tokio::test]
    async fn same_name_different_id_conflicts() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&wizard("Merlin")).await.unwrap();

        let err = store.save(&fighter("merlin")).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_and_reports_missing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&wizard("Merlin")).await.unwrap();

        store.delete("merlin").await.unwrap();
        assert!(store.list().await.unwrap().is_empty());

        let err = store.delete("Merlin").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, RepoError::Serialization(_)));
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileCharacterStore::new(dir.path().join("party").join("characters.json"));

        store.save(&wizard("Merlin")).await.unwrap();
        assert!(store.path().exists());
    }
}
