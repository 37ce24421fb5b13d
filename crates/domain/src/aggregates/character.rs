//! Character aggregate
//!
//! # Invariants
//!
//! - `name` is non-empty and trimmed (enforced by `CharacterName`)
//! - `level` is at least 1
//! - Ability scores include racial bonuses and never change after creation
//! - Everything in [`DerivedStats`] is recomputed by the engine from race,
//!   class, level, ability scores and equipment. There are no public setters;
//!   the only way to change a character is through `CharacterEngine`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::{Equipment, Spell};
use crate::ids::CharacterId;
use crate::value_objects::{
    Ability, AbilityScores, Background, CharacterClass, CharacterName, Race, Skill,
};

/// Spell level (0 = cantrips) to number of slots.
pub type SpellSlots = BTreeMap<u8, u8>;

/// Statistics computed from a character's base attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub proficiency_bonus: i32,
    pub armor_class: i32,
    pub initiative: i32,
    pub passive_perception: i32,
    #[serde(default)]
    pub spellcasting_ability: Option<Ability>,
    #[serde(default)]
    pub spell_save_dc: i32,
    #[serde(default)]
    pub spell_attack_bonus: i32,
    #[serde(default)]
    pub spell_slots: SpellSlots,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    // Identity
    id: CharacterId,
    name: CharacterName,

    // Base attributes
    race: Race,
    class: CharacterClass,
    #[serde(default)]
    background: Option<Background>,
    level: u8,
    ability_scores: AbilityScores,
    #[serde(default)]
    skill_proficiencies: Vec<Skill>,

    // Mutable through the engine only
    #[serde(default)]
    equipment: Equipment,
    #[serde(default)]
    spells: Vec<Spell>,

    created_at: DateTime<Utc>,

    #[serde(default)]
    derived: DerivedStats,
}

impl Character {
    /// Assemble a character with empty derived stats.
    ///
    /// Only the engine calls this; it refreshes the derived block before the
    /// character is handed out.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: CharacterName,
        race: Race,
        class: CharacterClass,
        background: Option<Background>,
        level: u8,
        ability_scores: AbilityScores,
        skill_proficiencies: Vec<Skill>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            name,
            race,
            class,
            background,
            level,
            ability_scores,
            skill_proficiencies,
            equipment: Equipment::default(),
            spells: Vec::new(),
            created_at,
            derived: DerivedStats::default(),
        }
    }

    // =========================================================================
    // Accessors (read-only)
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    #[inline]
    pub fn race(&self) -> Race {
        self.race
    }

    #[inline]
    pub fn class(&self) -> CharacterClass {
        self.class
    }

    #[inline]
    pub fn background(&self) -> Option<Background> {
        self.background
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    pub fn ability_scores(&self) -> &AbilityScores {
        &self.ability_scores
    }

    pub fn skill_proficiencies(&self) -> &[Skill] {
        &self.skill_proficiencies
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn derived(&self) -> &DerivedStats {
        &self.derived
    }

    // Shorthands for the derived block

    pub fn proficiency_bonus(&self) -> i32 {
        self.derived.proficiency_bonus
    }

    pub fn armor_class(&self) -> i32 {
        self.derived.armor_class
    }

    pub fn initiative(&self) -> i32 {
        self.derived.initiative
    }

    pub fn passive_perception(&self) -> i32 {
        self.derived.passive_perception
    }

    pub fn spell_slots(&self) -> &SpellSlots {
        &self.derived.spell_slots
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_proficient(&self, skill: Skill) -> bool {
        self.skill_proficiencies.contains(&skill)
    }

    /// Ability modifier for the skill's ability, plus proficiency bonus when
    /// the character is proficient.
    pub fn skill_modifier(&self, skill: Skill) -> i32 {
        let base = self.ability_scores.modifier(skill.ability());
        if self.is_proficient(skill) {
            base + self.derived.proficiency_bonus
        } else {
            base
        }
    }

    pub fn knows_spell(&self, name: &str) -> bool {
        self.spells.iter().any(|spell| spell.is_named(name))
    }

    // =========================================================================
    // Crate-internal mutation (engine only)
    // =========================================================================

    pub(crate) fn equipment_mut(&mut self) -> &mut Equipment {
        &mut self.equipment
    }

    pub(crate) fn push_spell(&mut self, spell: Spell) {
        self.spells.push(spell);
    }

    pub(crate) fn set_derived(&mut self, derived: DerivedStats) {
        self.derived = derived;
    }
}
