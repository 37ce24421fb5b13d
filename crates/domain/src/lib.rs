//! Character rules for 5th-edition tabletop characters.
//!
//! Pure and deterministic: no logging, no file access. Spell data is parsed
//! from any `io::Read`; persistence and presentation live in the engine
//! crate.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use aggregates::{Character, DerivedStats, SpellSlots};
pub use entities::{
    spell_key, Armor, Equipment, EquipmentSlot, Shield, Spell, SpellLevel, Weapon,
    MAX_SPELL_LEVEL, UNKNOWN_CATEGORY,
};
pub use error::{CharacterError, DomainError};
pub use game_systems::math::{modifier, proficiency_bonus};
pub use game_systems::{
    ArmorProfile, CatalogLoadError, CharacterEngine, DexCap, NewCharacter, RuleTables, SlotTable,
    SpellCatalog, SpellDetail,
};
pub use ids::CharacterId;
pub use value_objects::{
    name_key, Ability, AbilityBonuses, AbilityScores, Background, CasterFamily, CharacterClass,
    CharacterName, PreparationMode, Race, Skill,
};
