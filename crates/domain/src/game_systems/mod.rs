//! D&D 5th Edition character rules.
//!
//! - `math`: ability modifiers and proficiency bonus
//! - `tables`: injectable lookup tables (racial bonuses, skills, armor, slots)
//! - `spell_slots`: canonical slot progressions per caster family
//! - `catalog`: the spell catalog and its CSV loader
//! - `engine`: character creation, stat derivation and mutation rules

pub mod catalog;
pub mod engine;
pub mod math;
pub mod spell_slots;
pub mod tables;

pub use catalog::{CatalogLoadError, SpellCatalog, SpellDetail};
pub use engine::{CharacterEngine, NewCharacter};
pub use tables::{ArmorProfile, DexCap, RuleTables, SlotTable};
