//! Spell entity as loaded from the spell catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::CharacterClass;

/// Highest spell level in the slot tables.
pub const MAX_SPELL_LEVEL: u8 = 9;

/// A spell a character can learn or prepare.
///
/// Identity is the case-folded name; `name` keeps the catalog's display form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Spell {
    /// Display name of the spell
    pub name: String,
    /// Spell level (cantrip = 0)
    pub level: SpellLevel,
    /// Classes whose spell list includes this spell
    #[serde(default)]
    pub classes: Vec<CharacterClass>,
    /// School of magic (e.g., "Evocation"), display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    /// Range text (e.g., "120 feet"), display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

impl Spell {
    pub fn new(name: impl Into<String>, level: SpellLevel) -> Self {
        Self {
            name: name.into().trim().to_string(),
            level,
            classes: Vec::new(),
            school: None,
            range: None,
        }
    }

    pub fn with_classes(mut self, classes: impl IntoIterator<Item = CharacterClass>) -> Self {
        for class in classes {
            if !self.classes.contains(&class) {
                self.classes.push(class);
            }
        }
        self
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = Some(school.into());
        self
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Normalized lookup key.
    pub fn key(&self) -> String {
        spell_key(&self.name)
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.key() == spell_key(name)
    }
}

/// Normalize a spell name for case-insensitive lookup.
pub fn spell_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Spell level representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SpellLevel {
    /// Cantrip (level 0 spell, can be cast at will)
    Cantrip,
    /// Leveled spell (1-9)
    Level(u8),
}

impl SpellLevel {
    /// Convert to numeric level (cantrip = 0).
    pub fn as_number(&self) -> u8 {
        match self {
            SpellLevel::Cantrip => 0,
            SpellLevel::Level(n) => *n,
        }
    }

    /// Check if this is a cantrip.
    pub fn is_cantrip(&self) -> bool {
        matches!(self, SpellLevel::Cantrip)
    }
}

impl TryFrom<u8> for SpellLevel {
    type Error = DomainError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(SpellLevel::Cantrip),
            1..=MAX_SPELL_LEVEL => Ok(SpellLevel::Level(level)),
            _ => Err(DomainError::validation(format!(
                "Spell level must be between 0 and {}, got {}",
                MAX_SPELL_LEVEL, level
            ))),
        }
    }
}

impl From<SpellLevel> for u8 {
    fn from(level: SpellLevel) -> u8 {
        level.as_number()
    }
}

impl fmt::Display for SpellLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpellLevel::Cantrip => write!(f, "Cantrip"),
            SpellLevel::Level(n) => write!(f, "Level {}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spell_level_conversion() {
        assert_eq!(SpellLevel::try_from(0).unwrap(), SpellLevel::Cantrip);
        assert_eq!(SpellLevel::try_from(3).unwrap(), SpellLevel::Level(3));
        assert_eq!(SpellLevel::try_from(9).unwrap(), SpellLevel::Level(9));
        assert!(SpellLevel::try_from(10).is_err());
    }

    #[test]
    fn spell_level_as_number() {
        assert_eq!(SpellLevel::Cantrip.as_number(), 0);
        assert_eq!(SpellLevel::Level(5).as_number(), 5);
        assert!(SpellLevel::Cantrip.is_cantrip());
        assert!(!SpellLevel::Level(1).is_cantrip());
    }

    #[test]
    fn spell_serializes_level_as_number() {
        let spell = Spell::new("Fireball", SpellLevel::Level(3))
            .with_classes([CharacterClass::Wizard, CharacterClass::Sorcerer])
            .with_school("Evocation");
        let json = serde_json::to_value(&spell).unwrap();
        assert_eq!(json["level"], 3);
        assert_eq!(json["classes"][0], "wizard");
        assert!(json.get("range").is_none());

        let back: Spell = serde_json::from_value(json).unwrap();
        assert_eq!(back, spell);
    }

    #[test]
    fn spell_name_matching_is_case_insensitive() {
        let spell = Spell::new(" Magic Missile ", SpellLevel::Level(1));
        assert_eq!(spell.name, "Magic Missile");
        assert!(spell.is_named("magic missile"));
        assert!(spell.is_named("  MAGIC MISSILE"));
        assert!(!spell.is_named("Shield"));
    }

    #[test]
    fn duplicate_classes_collapse() {
        let spell = Spell::new("Light", SpellLevel::Cantrip)
            .with_classes([CharacterClass::Cleric, CharacterClass::Cleric]);
        assert_eq!(spell.classes, vec![CharacterClass::Cleric]);
    }
}
