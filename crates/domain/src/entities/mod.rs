//! Domain entities - Core business objects referenced by characters

mod equipment;
mod spell;

pub use equipment::{Armor, Equipment, EquipmentSlot, Shield, Weapon, UNKNOWN_CATEGORY};
pub use spell::{spell_key, Spell, SpellLevel, MAX_SPELL_LEVEL};
