use async_trait::async_trait;
use charsheet_domain::{Character, CharacterId};

use super::error::RepoError;

// =============================================================================
// Character Store
// =============================================================================

/// Persistent collection of characters, keyed externally by name.
///
/// Name comparisons are case-insensitive. Adapters must refuse to save a
/// character whose name is already owned by a different id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// Insert or replace by id.
    async fn save(&self, character: &Character) -> Result<(), RepoError>;
    async fn get_by_name(&self, name: &str) -> Result<Option<Character>, RepoError>;
    async fn get_by_id(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    /// All characters in insertion order.
    async fn list(&self) -> Result<Vec<Character>, RepoError>;
    /// Fails with `NotFound` when no character has that name.
    async fn delete(&self, name: &str) -> Result<(), RepoError>;
}
