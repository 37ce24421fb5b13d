//! Character store adapters.

mod json_store;
mod memory_store;

pub use json_store::JsonFileCharacterStore;
pub use memory_store::InMemoryCharacterStore;
