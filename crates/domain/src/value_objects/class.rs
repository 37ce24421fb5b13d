//! Character classes and their spellcasting traits

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Ability;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

/// Which slot progression a caster class follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasterFamily {
    /// Wizard, cleric, druid, bard, sorcerer
    Full,
    /// Paladin, ranger
    Half,
    /// Warlock pact magic
    Pact,
}

/// How a caster class adds spells to its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreparationMode {
    /// Spells are learned permanently (bard, sorcerer, warlock, ranger).
    Learns,
    /// Spells are prepared from the class list (cleric, druid, paladin, wizard).
    Prepares,
}

impl PreparationMode {
    /// Third-person verb, e.g. "learns".
    pub fn verb(&self) -> &'static str {
        match self {
            PreparationMode::Learns => "learns",
            PreparationMode::Prepares => "prepares",
        }
    }

    pub fn verb_infinitive(&self) -> &'static str {
        match self {
            PreparationMode::Learns => "learn them",
            PreparationMode::Prepares => "prepare them",
        }
    }

    pub fn other(&self) -> PreparationMode {
        match self {
            PreparationMode::Learns => PreparationMode::Prepares,
            PreparationMode::Prepares => PreparationMode::Learns,
        }
    }
}

impl CharacterClass {
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Barbarian,
            CharacterClass::Bard,
            CharacterClass::Cleric,
            CharacterClass::Druid,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Paladin,
            CharacterClass::Ranger,
            CharacterClass::Rogue,
            CharacterClass::Sorcerer,
            CharacterClass::Warlock,
            CharacterClass::Wizard,
        ]
    }

    /// Lowercase identifier, also used in spell lists.
    pub fn key(&self) -> &'static str {
        match self {
            CharacterClass::Barbarian => "barbarian",
            CharacterClass::Bard => "bard",
            CharacterClass::Cleric => "cleric",
            CharacterClass::Druid => "druid",
            CharacterClass::Fighter => "fighter",
            CharacterClass::Monk => "monk",
            CharacterClass::Paladin => "paladin",
            CharacterClass::Ranger => "ranger",
            CharacterClass::Rogue => "rogue",
            CharacterClass::Sorcerer => "sorcerer",
            CharacterClass::Warlock => "warlock",
            CharacterClass::Wizard => "wizard",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CharacterClass::Barbarian => "Barbarian",
            CharacterClass::Bard => "Bard",
            CharacterClass::Cleric => "Cleric",
            CharacterClass::Druid => "Druid",
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Monk => "Monk",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Sorcerer => "Sorcerer",
            CharacterClass::Warlock => "Warlock",
            CharacterClass::Wizard => "Wizard",
        }
    }

    /// Slot progression, or `None` for non-casters.
    pub fn caster_family(&self) -> Option<CasterFamily> {
        match self {
            CharacterClass::Wizard
            | CharacterClass::Cleric
            | CharacterClass::Druid
            | CharacterClass::Bard
            | CharacterClass::Sorcerer => Some(CasterFamily::Full),
            CharacterClass::Paladin | CharacterClass::Ranger => Some(CasterFamily::Half),
            CharacterClass::Warlock => Some(CasterFamily::Pact),
            CharacterClass::Barbarian
            | CharacterClass::Fighter
            | CharacterClass::Monk
            | CharacterClass::Rogue => None,
        }
    }

    pub fn is_caster(&self) -> bool {
        self.caster_family().is_some()
    }

    /// Ability that drives spell save DC and spell attack bonus.
    pub fn spellcasting_ability(&self) -> Option<Ability> {
        match self {
            CharacterClass::Wizard => Some(Ability::Intelligence),
            CharacterClass::Cleric | CharacterClass::Druid | CharacterClass::Ranger => {
                Some(Ability::Wisdom)
            }
            CharacterClass::Paladin
            | CharacterClass::Sorcerer
            | CharacterClass::Bard
            | CharacterClass::Warlock => Some(Ability::Charisma),
            _ => None,
        }
    }

    pub fn preparation_mode(&self) -> Option<PreparationMode> {
        match self {
            CharacterClass::Cleric
            | CharacterClass::Druid
            | CharacterClass::Paladin
            | CharacterClass::Wizard => Some(PreparationMode::Prepares),
            class if class.is_caster() => Some(PreparationMode::Learns),
            _ => None,
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for CharacterClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        CharacterClass::all()
            .iter()
            .copied()
            .find(|class| class.key() == normalized)
            .ok_or_else(|| DomainError::parse(format!("Unknown class: {}", s)))
    }
}
