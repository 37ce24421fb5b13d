//! Aggregate roots - domain objects that own their related data
//!
//! The character aggregate:
//! - Has a unique identity
//! - Owns its equipment and spell list (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Is mutated only by `CharacterEngine`, which refreshes derived stats

pub mod character;

pub use character::{Character, DerivedStats, SpellSlots};
