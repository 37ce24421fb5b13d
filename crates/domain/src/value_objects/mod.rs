//! Value objects - Immutable objects defined by their attributes
//!
//! Closed enumerations are parsed once at the boundary with `FromStr`;
//! unknown input is a `DomainError::Parse`.

mod abilities;
mod background;
mod class;
mod names;
mod race;
mod skill;

pub use abilities::{Ability, AbilityBonuses, AbilityScores};
pub use background::Background;
pub use class::{CasterFamily, CharacterClass, PreparationMode};
pub use names::{name_key, CharacterName};
pub use race::Race;
pub use skill::Skill;
