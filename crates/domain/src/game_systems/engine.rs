//! Character creation, derived-stat computation and rule-checked mutation.
//!
//! Every mutator runs through [`CharacterEngine::apply`], which works on a
//! draft copy, refreshes the derived stats and only then commits. A rejected
//! operation leaves the character exactly as it was.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::catalog::SpellCatalog;
use super::math;
use super::tables::RuleTables;
use crate::aggregates::{Character, DerivedStats, SpellSlots};
use crate::entities::{Armor, EquipmentSlot, Shield, Spell, Weapon};
use crate::error::CharacterError;
use crate::value_objects::{
    Ability, AbilityScores, Background, CharacterClass, CharacterName, PreparationMode, Race,
    Skill,
};

/// Armor class bonus from a shield.
const SHIELD_BONUS: i32 = 2;

/// Base value for passive Perception and unarmored AC.
const BASE_TEN: i32 = 10;

/// Base value of the spell save DC before proficiency and ability.
const SPELL_DC_BASE: i32 = 8;

/// Input for [`CharacterEngine::create`].
#[derive(Debug, Clone)]
pub struct NewCharacter {
    pub name: String,
    pub race: Race,
    pub class: CharacterClass,
    pub background: Option<Background>,
    pub level: i32,
    /// Scores before racial bonuses.
    pub ability_scores: AbilityScores,
    /// Explicit proficiencies; `None` picks the class/background defaults.
    pub skills: Option<Vec<Skill>>,
}

impl NewCharacter {
    /// Level 1, no background, all scores 10, default skills.
    pub fn new(name: impl Into<String>, race: Race, class: CharacterClass) -> Self {
        Self {
            name: name.into(),
            race,
            class,
            background: None,
            level: 1,
            ability_scores: AbilityScores::default(),
            skills: None,
        }
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_ability_scores(mut self, scores: AbilityScores) -> Self {
        self.ability_scores = scores;
        self
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = Some(skills);
        self
    }
}

/// Applies the character rules with injected tables and spell catalog.
#[derive(Debug, Clone)]
pub struct CharacterEngine {
    tables: Arc<RuleTables>,
    catalog: Arc<SpellCatalog>,
}

impl CharacterEngine {
    pub fn new(tables: Arc<RuleTables>, catalog: Arc<SpellCatalog>) -> Self {
        Self { tables, catalog }
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    pub fn catalog(&self) -> &SpellCatalog {
        &self.catalog
    }

    // =========================================================================
    // Creation and derivation
    // =========================================================================

    /// Validate input, apply racial bonuses, pick skills and derive stats.
    ///
    /// # Errors
    ///
    /// `CharacterError::Validation` for an empty name or a level below 1.
    pub fn create(
        &self,
        input: NewCharacter,
        now: DateTime<Utc>,
    ) -> Result<Character, CharacterError> {
        let name = CharacterName::new(input.name)?;
        if input.level < 1 {
            return Err(CharacterError::validation(format!(
                "Level cannot be lower than 1, got {}",
                input.level
            )));
        }
        let level = u8::try_from(input.level).map_err(|_| {
            CharacterError::validation(format!("Level {} is out of range", input.level))
        })?;

        let scores = input
            .ability_scores
            .with_bonuses(&self.tables.racial_bonuses(input.race));

        let skills = match input.skills {
            Some(mut chosen) => {
                let mut seen = Vec::with_capacity(chosen.len());
                chosen.retain(|skill| {
                    let fresh = !seen.contains(skill);
                    seen.push(*skill);
                    fresh
                });
                chosen
            }
            None => self.tables.default_skills(input.class, input.background),
        };

        let mut character = Character::new(
            name,
            input.race,
            input.class,
            input.background,
            level,
            scores,
            skills,
            now,
        );
        self.refresh(&mut character);
        Ok(character)
    }

    /// Recompute every derived stat from the character's base attributes.
    /// Idempotent.
    pub fn refresh(&self, character: &mut Character) {
        let derived = self.derive(character);
        character.set_derived(derived);
    }

    fn derive(&self, character: &Character) -> DerivedStats {
        let scores = character.ability_scores();
        let class = character.class();
        let proficiency_bonus = math::proficiency_bonus(character.level());

        let mut derived = DerivedStats {
            proficiency_bonus,
            armor_class: self.armor_class(character),
            initiative: scores.modifier(Ability::Dexterity),
            passive_perception: BASE_TEN + scores.modifier(Ability::Wisdom),
            ..DerivedStats::default()
        };

        if class.is_caster() {
            let ability = class
                .spellcasting_ability()
                .unwrap_or(Ability::Intelligence);
            let ability_mod = scores.modifier(ability);
            derived.spellcasting_ability = Some(ability);
            derived.spell_save_dc = SPELL_DC_BASE + proficiency_bonus + ability_mod;
            derived.spell_attack_bonus = proficiency_bonus + ability_mod;
            derived.spell_slots = self.tables.spell_slot_table(class, character.level());
        }

        derived
    }

    fn armor_class(&self, character: &Character) -> i32 {
        let scores = character.ability_scores();
        let dex_mod = scores.modifier(Ability::Dexterity);

        let base = match &character.equipment().armor {
            Some(armor) => self.tables.armor(&armor.name).armor_class(dex_mod),
            None => match character.class() {
                CharacterClass::Barbarian => {
                    BASE_TEN + dex_mod + scores.modifier(Ability::Constitution)
                }
                CharacterClass::Monk => BASE_TEN + dex_mod + scores.modifier(Ability::Wisdom),
                _ => BASE_TEN + dex_mod,
            },
        };

        if character.equipment().shield.is_some() {
            base + SHIELD_BONUS
        } else {
            base
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Run `mutation` on a draft, refresh it, and commit only on success.
    fn apply<T>(
        &self,
        character: &mut Character,
        mutation: impl FnOnce(&mut Character) -> Result<T, CharacterError>,
    ) -> Result<T, CharacterError> {
        let mut draft = character.clone();
        let outcome = mutation(&mut draft)?;
        self.refresh(&mut draft);
        *character = draft;
        Ok(outcome)
    }

    /// Put a weapon in the main-hand or off-hand slot.
    pub fn equip_weapon(
        &self,
        character: &mut Character,
        weapon: Weapon,
        slot: EquipmentSlot,
    ) -> Result<(), CharacterError> {
        if !slot.holds_weapons() {
            return Err(CharacterError::InvalidSlot(slot));
        }
        self.apply(character, |draft| {
            ensure_free(draft, slot)?;
            let equipment = draft.equipment_mut();
            if slot == EquipmentSlot::MainHand {
                equipment.main_hand = Some(weapon);
            } else {
                equipment.off_hand = Some(weapon);
            }
            Ok(())
        })
    }

    pub fn equip_armor(
        &self,
        character: &mut Character,
        armor: Armor,
    ) -> Result<(), CharacterError> {
        self.apply(character, |draft| {
            ensure_free(draft, EquipmentSlot::Armor)?;
            draft.equipment_mut().armor = Some(armor);
            Ok(())
        })
    }

    pub fn equip_shield(
        &self,
        character: &mut Character,
        shield: Shield,
    ) -> Result<(), CharacterError> {
        self.apply(character, |draft| {
            ensure_free(draft, EquipmentSlot::Shield)?;
            draft.equipment_mut().shield = Some(shield);
            Ok(())
        })
    }

    /// Add a spell to a learn-mode caster's list. Returns the catalog entry.
    pub fn learn_spell(
        &self,
        character: &mut Character,
        spell_name: &str,
    ) -> Result<Spell, CharacterError> {
        self.apply(character, |draft| {
            let spell = self.resolve_spell(draft, spell_name, PreparationMode::Learns)?;
            draft.push_spell(spell.clone());
            Ok(spell)
        })
    }

    /// Add a spell to a prepare-mode caster's list, provided a slot of the
    /// spell's level exists. Returns the catalog entry.
    pub fn prepare_spell(
        &self,
        character: &mut Character,
        spell_name: &str,
    ) -> Result<Spell, CharacterError> {
        self.apply(character, |draft| {
            let spell = self.resolve_spell(draft, spell_name, PreparationMode::Prepares)?;
            let slots = self.tables.spell_slot_table(draft.class(), draft.level());
            ensure_slot(&slots, &spell)?;
            draft.push_spell(spell.clone());
            Ok(spell)
        })
    }

    /// Shared checks for learn and prepare, in order: castable, mode,
    /// catalog, class list, duplicate.
    fn resolve_spell(
        &self,
        character: &Character,
        spell_name: &str,
        operation: PreparationMode,
    ) -> Result<Spell, CharacterError> {
        let class = character.class();
        let mode = class
            .preparation_mode()
            .ok_or(CharacterError::NotCastable { class })?;
        if mode != operation {
            return Err(CharacterError::WrongPreparationMode { class, mode });
        }

        let spell = self
            .catalog
            .find_by_name(spell_name)
            .ok_or_else(|| CharacterError::SpellNotFound(spell_name.trim().to_string()))?;
        if !spell.classes.contains(&class) {
            return Err(CharacterError::NotInClassList {
                spell: spell.name.clone(),
                class,
            });
        }
        if character.knows_spell(&spell.name) {
            return Err(CharacterError::DuplicateSpell(spell.name.clone()));
        }

        Ok(spell.clone())
    }
}

fn ensure_free(character: &Character, slot: EquipmentSlot) -> Result<(), CharacterError> {
    match character.equipment().occupant(slot) {
        Some(occupant) => Err(CharacterError::SlotOccupied {
            slot,
            occupant: occupant.to_string(),
        }),
        None => Ok(()),
    }
}

/// Cantrips only fail when the table lists zero cantrips; a table without a
/// level-0 entry means the class has none and is not a slot error.
fn ensure_slot(slots: &SpellSlots, spell: &Spell) -> Result<(), CharacterError> {
    let level = spell.level.as_number();
    let insufficient = || CharacterError::InsufficientSlot {
        spell: spell.name.clone(),
        level,
    };

    if spell.level.is_cantrip() {
        return match slots.get(&0) {
            Some(0) => Err(insufficient()),
            _ => Ok(()),
        };
    }

    let highest = slots.keys().copied().max().unwrap_or(0);
    if level > highest {
        return Err(insufficient());
    }
    match slots.get(&level) {
        Some(count) if *count > 0 => Ok(()),
        _ => Err(insufficient()),
    }
}
