//! Static rule tables: racial bonuses, skill lists, spell slots, armor.
//!
//! `RuleTables` is an immutable value built once at startup with
//! [`RuleTables::standard`] and shared behind an `Arc`. Tests build fixture
//! tables with the `with_*` builders.

use std::collections::{BTreeMap, HashMap};

use super::spell_slots;
use crate::aggregates::SpellSlots;
use crate::value_objects::{
    Ability, AbilityBonuses, Background, CasterFamily, CharacterClass, Race, Skill,
};

/// Character-level threshold to the slot table that applies from that level.
pub type SlotTable = BTreeMap<u8, SpellSlots>;

/// Skill count used when a class has no entry in the count table.
const DEFAULT_SKILL_COUNT: usize = 2;

/// Skills granted by a background when picking defaults.
const BACKGROUND_SKILL_COUNT: usize = 2;

/// Armor class of unarmored or unrecognized armor before modifiers.
const UNARMORED_BASE: i32 = 10;

/// How much Dexterity contributes to an armor's AC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DexCap {
    /// Full Dex modifier (light armor).
    Uncapped,
    /// Dex modifier up to the cap (medium armor).
    Capped(i32),
    /// No Dex contribution (heavy armor).
    Fixed,
}

impl DexCap {
    pub fn contribution(&self, dex_mod: i32) -> i32 {
        match self {
            DexCap::Uncapped => dex_mod,
            DexCap::Capped(cap) => dex_mod.min(*cap),
            DexCap::Fixed => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmorProfile {
    pub base_ac: i32,
    pub dex_cap: DexCap,
}

impl ArmorProfile {
    pub const fn new(base_ac: i32, dex_cap: DexCap) -> Self {
        Self { base_ac, dex_cap }
    }

    pub fn armor_class(&self, dex_mod: i32) -> i32 {
        self.base_ac + self.dex_cap.contribution(dex_mod)
    }
}

impl Default for ArmorProfile {
    fn default() -> Self {
        Self::new(UNARMORED_BASE, DexCap::Uncapped)
    }
}

/// Lookup tables parameterizing the character engine.
///
/// Every lookup on a missing key returns an empty or default value; closed
/// enums keep unknown names out at the parsing boundary.
#[derive(Debug, Clone, Default)]
pub struct RuleTables {
    racial_bonuses: HashMap<Race, AbilityBonuses>,
    class_skills: HashMap<CharacterClass, Vec<Skill>>,
    background_skills: HashMap<Background, Vec<Skill>>,
    skill_counts: HashMap<CharacterClass, usize>,
    slot_tables: HashMap<CasterFamily, SlotTable>,
    armor: HashMap<String, ArmorProfile>,
}

impl RuleTables {
    /// Empty tables, for building fixtures.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The canonical 5e tables.
    pub fn standard() -> Self {
        use Ability::*;

        let mut tables = Self::empty();

        let races: &[(Race, &[(Ability, i32)])] = &[
            (
                Race::Human,
                &[
                    (Strength, 1),
                    (Dexterity, 1),
                    (Constitution, 1),
                    (Intelligence, 1),
                    (Wisdom, 1),
                    (Charisma, 1),
                ],
            ),
            (Race::VariantHuman, &[(Strength, 1), (Dexterity, 1)]),
            (Race::HillDwarf, &[(Constitution, 2), (Wisdom, 1)]),
            (Race::Dwarf, &[(Constitution, 2)]),
            (Race::MountainDwarf, &[(Constitution, 2), (Strength, 2)]),
            (Race::HighElf, &[(Dexterity, 2), (Intelligence, 1)]),
            (Race::WoodElf, &[(Dexterity, 2), (Wisdom, 1)]),
            (Race::Drow, &[(Dexterity, 2), (Charisma, 1)]),
            (Race::LightfootHalfling, &[(Dexterity, 2), (Charisma, 1)]),
            (Race::StoutHalfling, &[(Dexterity, 2), (Constitution, 1)]),
            (Race::Dragonborn, &[(Strength, 2), (Charisma, 1)]),
            (Race::ForestGnome, &[(Intelligence, 2), (Dexterity, 1)]),
            (Race::RockGnome, &[(Intelligence, 2), (Constitution, 1)]),
            (Race::Gnome, &[(Intelligence, 2)]),
            (
                Race::HalfElf,
                &[(Charisma, 2), (Constitution, 1), (Dexterity, 1)],
            ),
            (Race::HalfOrc, &[(Strength, 2), (Constitution, 1)]),
            (Race::Tiefling, &[(Charisma, 2), (Intelligence, 1)]),
            (Race::Aasimar, &[(Charisma, 2), (Constitution, 1)]),
            (Race::Firbolg, &[(Wisdom, 2), (Strength, 1)]),
            (Race::Goliath, &[(Strength, 2), (Constitution, 1)]),
            (Race::Tabaxi, &[(Dexterity, 2), (Charisma, 1)]),
            (
                Race::Triton,
                &[(Strength, 1), (Constitution, 1), (Charisma, 1)],
            ),
        ];
        for (race, bonuses) in races {
            tables = tables.with_racial_bonuses(*race, bonuses.iter().copied());
        }

        let class_skills: &[(CharacterClass, &[Skill])] = &[
            (
                CharacterClass::Barbarian,
                &[
                    Skill::AnimalHandling,
                    Skill::Athletics,
                    Skill::Intimidation,
                    Skill::Nature,
                    Skill::Perception,
                    Skill::Survival,
                ],
            ),
            (
                CharacterClass::Bard,
                &[
                    Skill::Arcana,
                    Skill::Deception,
                    Skill::Insight,
                    Skill::Intimidation,
                    Skill::Performance,
                    Skill::Persuasion,
                    Skill::Religion,
                ],
            ),
            (
                CharacterClass::Cleric,
                &[
                    Skill::History,
                    Skill::Insight,
                    Skill::Medicine,
                    Skill::Persuasion,
                    Skill::Religion,
                ],
            ),
            (
                CharacterClass::Druid,
                &[
                    Skill::Arcana,
                    Skill::AnimalHandling,
                    Skill::Insight,
                    Skill::Medicine,
                    Skill::Nature,
                    Skill::Perception,
                    Skill::Religion,
                    Skill::Survival,
                ],
            ),
            (
                CharacterClass::Fighter,
                &[
                    Skill::Acrobatics,
                    Skill::AnimalHandling,
                    Skill::Athletics,
                    Skill::History,
                    Skill::Insight,
                    Skill::Intimidation,
                    Skill::Perception,
                    Skill::Survival,
                ],
            ),
            (
                CharacterClass::Monk,
                &[
                    Skill::Acrobatics,
                    Skill::Athletics,
                    Skill::History,
                    Skill::Insight,
                    Skill::Religion,
                    Skill::Stealth,
                ],
            ),
            (
                CharacterClass::Paladin,
                &[
                    Skill::Athletics,
                    Skill::Insight,
                    Skill::Intimidation,
                    Skill::Medicine,
                    Skill::Persuasion,
                    Skill::Religion,
                ],
            ),
            (
                CharacterClass::Ranger,
                &[
                    Skill::AnimalHandling,
                    Skill::Athletics,
                    Skill::Insight,
                    Skill::Investigation,
                    Skill::Nature,
                    Skill::Perception,
                    Skill::Stealth,
                    Skill::Survival,
                ],
            ),
            (
                CharacterClass::Rogue,
                &[
                    Skill::Acrobatics,
                    Skill::Athletics,
                    Skill::Deception,
                    Skill::Insight,
                    Skill::Intimidation,
                    Skill::Investigation,
                    Skill::Perception,
                    Skill::Performance,
                    Skill::Persuasion,
                    Skill::SleightOfHand,
                    Skill::Stealth,
                ],
            ),
            (
                CharacterClass::Sorcerer,
                &[
                    Skill::Arcana,
                    Skill::Deception,
                    Skill::Insight,
                    Skill::Intimidation,
                    Skill::Persuasion,
                    Skill::Religion,
                ],
            ),
            (
                CharacterClass::Warlock,
                &[
                    Skill::Arcana,
                    Skill::Deception,
                    Skill::History,
                    Skill::Intimidation,
                    Skill::Investigation,
                    Skill::Nature,
                    Skill::Religion,
                ],
            ),
            (
                CharacterClass::Wizard,
                &[
                    Skill::Arcana,
                    Skill::History,
                    Skill::Insight,
                    Skill::Investigation,
                    Skill::Medicine,
                    Skill::Religion,
                ],
            ),
        ];
        for (class, skills) in class_skills {
            tables = tables.with_class_skills(*class, skills.iter().copied());
        }

        let background_skills: &[(Background, [Skill; 2])] = &[
            (Background::Acolyte, [Skill::Insight, Skill::Religion]),
            (Background::Charlatan, [Skill::Deception, Skill::SleightOfHand]),
            (Background::Criminal, [Skill::Deception, Skill::Stealth]),
            (Background::Entertainer, [Skill::Acrobatics, Skill::Performance]),
            (Background::FolkHero, [Skill::AnimalHandling, Skill::Survival]),
            (Background::GuildArtisan, [Skill::Insight, Skill::Persuasion]),
            (Background::Hermit, [Skill::Medicine, Skill::Religion]),
            (Background::Noble, [Skill::History, Skill::Persuasion]),
            (Background::Outlander, [Skill::Athletics, Skill::Survival]),
            (Background::Sage, [Skill::Arcana, Skill::History]),
            (Background::Sailor, [Skill::Athletics, Skill::Perception]),
            (Background::Soldier, [Skill::Athletics, Skill::Intimidation]),
            (Background::Urchin, [Skill::SleightOfHand, Skill::Stealth]),
        ];
        for (background, skills) in background_skills {
            tables = tables.with_background_skills(*background, *skills);
        }

        for class in CharacterClass::all() {
            let count = match class {
                CharacterClass::Bard | CharacterClass::Ranger => 3,
                CharacterClass::Rogue => 4,
                _ => 2,
            };
            tables = tables.with_skill_count(*class, count);
        }

        tables = tables
            .with_slot_table(CasterFamily::Full, spell_slots::full_caster())
            .with_slot_table(CasterFamily::Half, spell_slots::half_caster())
            .with_slot_table(CasterFamily::Pact, spell_slots::pact_caster());

        let armor: &[(&[&str], ArmorProfile)] = &[
            (&["padded", "padded armor"], ArmorProfile::new(11, DexCap::Uncapped)),
            (&["leather", "leather armor"], ArmorProfile::new(11, DexCap::Uncapped)),
            (
                &["studded leather", "studded leather armor"],
                ArmorProfile::new(12, DexCap::Uncapped),
            ),
            (&["hide", "hide armor"], ArmorProfile::new(12, DexCap::Capped(2))),
            (&["chain shirt"], ArmorProfile::new(13, DexCap::Capped(2))),
            (&["scale mail"], ArmorProfile::new(14, DexCap::Capped(2))),
            (&["breastplate"], ArmorProfile::new(14, DexCap::Capped(2))),
            (&["half plate", "half plate armor"], ArmorProfile::new(15, DexCap::Capped(2))),
            (&["ring mail"], ArmorProfile::new(14, DexCap::Fixed)),
            (&["chain mail"], ArmorProfile::new(16, DexCap::Fixed)),
            (&["splint", "splint armor"], ArmorProfile::new(17, DexCap::Fixed)),
            (&["plate", "plate armor"], ArmorProfile::new(18, DexCap::Fixed)),
        ];
        for (names, profile) in armor {
            for name in names.iter() {
                tables = tables.with_armor(name, *profile);
            }
        }

        tables
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub fn with_racial_bonuses(
        mut self,
        race: Race,
        bonuses: impl IntoIterator<Item = (Ability, i32)>,
    ) -> Self {
        self.racial_bonuses.insert(race, bonuses.into_iter().collect());
        self
    }

    /// Skills are stored sorted and de-duplicated.
    pub fn with_class_skills(
        mut self,
        class: CharacterClass,
        skills: impl IntoIterator<Item = Skill>,
    ) -> Self {
        self.class_skills.insert(class, sorted(skills));
        self
    }

    pub fn with_background_skills(
        mut self,
        background: Background,
        skills: impl IntoIterator<Item = Skill>,
    ) -> Self {
        self.background_skills.insert(background, sorted(skills));
        self
    }

    pub fn with_skill_count(mut self, class: CharacterClass, count: usize) -> Self {
        self.skill_counts.insert(class, count);
        self
    }

    pub fn with_slot_table(mut self, family: CasterFamily, table: SlotTable) -> Self {
        self.slot_tables.insert(family, table);
        self
    }

    pub fn with_armor(mut self, name: &str, profile: ArmorProfile) -> Self {
        self.armor.insert(armor_key(name), profile);
        self
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Ability bonuses for a race; empty when the race has none.
    pub fn racial_bonuses(&self, race: Race) -> AbilityBonuses {
        self.racial_bonuses.get(&race).cloned().unwrap_or_default()
    }

    /// Skills the class may choose from, alphabetical.
    pub fn class_skill_set(&self, class: CharacterClass) -> &[Skill] {
        self.class_skills.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Skills granted by a background, alphabetical.
    pub fn background_skill_set(&self, background: Background) -> &[Skill] {
        self.background_skills
            .get(&background)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn default_skill_count(&self, class: CharacterClass) -> usize {
        self.skill_counts
            .get(&class)
            .copied()
            .unwrap_or(DEFAULT_SKILL_COUNT)
    }

    /// Starting proficiencies when none are chosen: the first
    /// `default_skill_count` class skills, then the first two background
    /// skills not already taken.
    pub fn default_skills(
        &self,
        class: CharacterClass,
        background: Option<Background>,
    ) -> Vec<Skill> {
        let mut skills: Vec<Skill> = self
            .class_skill_set(class)
            .iter()
            .take(self.default_skill_count(class))
            .copied()
            .collect();

        if let Some(background) = background {
            for skill in self
                .background_skill_set(background)
                .iter()
                .take(BACKGROUND_SKILL_COUNT)
            {
                if !skills.contains(skill) {
                    skills.push(*skill);
                }
            }
        }

        skills
    }

    /// Slots for a class at a character level.
    ///
    /// Uses the entry with the highest level threshold at or below `level`.
    /// Non-casters, and casters below their first threshold, get an empty
    /// table.
    pub fn spell_slot_table(&self, class: CharacterClass, level: u8) -> SpellSlots {
        class
            .caster_family()
            .and_then(|family| self.slot_tables.get(&family))
            .and_then(|table| table.range(..=level).next_back())
            .map(|(_, slots)| slots.clone())
            .unwrap_or_default()
    }

    /// Armor profile by name (trimmed, case-insensitive). Unknown armor is
    /// treated as base 10 with full Dex.
    pub fn armor(&self, name: &str) -> ArmorProfile {
        self.armor
            .get(&armor_key(name))
            .copied()
            .unwrap_or_default()
    }
}

fn sorted(skills: impl IntoIterator<Item = Skill>) -> Vec<Skill> {
    let mut skills: Vec<Skill> = skills.into_iter().collect();
    skills.sort();
    skills.dedup();
    skills
}

fn armor_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_gets_plus_one_everywhere() {
        let tables = RuleTables::standard();
        let bonuses = tables.racial_bonuses(Race::Human);
        assert_eq!(bonuses.len(), 6);
        assert!(bonuses.values().all(|bonus| *bonus == 1));
    }

    #[test]
    fn subrace_bonuses() {
        let tables = RuleTables::standard();
        let hill = tables.racial_bonuses(Race::HillDwarf);
        assert_eq!(hill.get(&Ability::Constitution), Some(&2));
        assert_eq!(hill.get(&Ability::Wisdom), Some(&1));

        let half_elf = tables.racial_bonuses(Race::HalfElf);
        assert_eq!(half_elf.get(&Ability::Charisma), Some(&2));
        assert_eq!(half_elf.values().sum::<i32>(), 4);
    }

    #[test]
    fn race_without_entry_gets_no_bonus() {
        let tables = RuleTables::standard();
        assert!(tables.racial_bonuses(Race::Elf).is_empty());
        assert!(RuleTables::empty().racial_bonuses(Race::Human).is_empty());
    }

    #[test]
    fn class_skill_sets_are_alphabetical() {
        let tables = RuleTables::standard();
        for class in CharacterClass::all() {
            let skills = tables.class_skill_set(*class);
            assert!(!skills.is_empty(), "{} has no skills", class);
            assert!(skills.windows(2).all(|w| w[0] < w[1]));
        }
        // Druid lists Arcana before Animal Handling in the rulebook order
        assert_eq!(
            tables.class_skill_set(CharacterClass::Druid)[0],
            Skill::AnimalHandling
        );
    }

    #[test]
    fn default_skill_counts() {
        let tables = RuleTables::standard();
        assert_eq!(tables.default_skill_count(CharacterClass::Bard), 3);
        assert_eq!(tables.default_skill_count(CharacterClass::Ranger), 3);
        assert_eq!(tables.default_skill_count(CharacterClass::Rogue), 4);
        assert_eq!(tables.default_skill_count(CharacterClass::Wizard), 2);
        assert_eq!(
            RuleTables::empty().default_skill_count(CharacterClass::Rogue),
            DEFAULT_SKILL_COUNT
        );
    }

    #[test]
    fn default_skills_take_class_then_background() {
        let tables = RuleTables::standard();
        let skills = tables.default_skills(CharacterClass::Wizard, Some(Background::Sage));
        // Wizard: Arcana, History; Sage: Arcana, History (duplicates dropped)
        assert_eq!(skills, vec![Skill::Arcana, Skill::History]);

        let skills = tables.default_skills(CharacterClass::Rogue, Some(Background::Criminal));
        assert_eq!(
            skills,
            vec![
                Skill::Acrobatics,
                Skill::Athletics,
                Skill::Deception,
                Skill::Insight,
                Skill::Stealth,
            ]
        );

        let skills = tables.default_skills(CharacterClass::Fighter, None);
        assert_eq!(skills, vec![Skill::Acrobatics, Skill::AnimalHandling]);
    }

    #[test]
    fn spell_slots_walk_thresholds_downward() {
        let tables = RuleTables::standard();
        let wizard_1 = tables.spell_slot_table(CharacterClass::Wizard, 1);
        assert_eq!(wizard_1, SpellSlots::from([(0, 3), (1, 2)]));

        // Level 4 falls back to the level-3 entry
        let wizard_4 = tables.spell_slot_table(CharacterClass::Wizard, 4);
        assert_eq!(wizard_4, tables.spell_slot_table(CharacterClass::Wizard, 3));
        assert_eq!(wizard_4.get(&2), Some(&2));

        // Beyond the last threshold keeps the capstone entry
        let wizard_20 = tables.spell_slot_table(CharacterClass::Wizard, 20);
        assert_eq!(wizard_20.get(&9), Some(&1));
    }

    #[test]
    fn half_casters_have_nothing_before_fifth_level() {
        let tables = RuleTables::standard();
        assert!(tables.spell_slot_table(CharacterClass::Paladin, 4).is_empty());
        let ranger_5 = tables.spell_slot_table(CharacterClass::Ranger, 5);
        assert_eq!(ranger_5, SpellSlots::from([(1, 4), (2, 2)]));
    }

    #[test]
    fn warlock_pact_slots() {
        let tables = RuleTables::standard();
        assert_eq!(
            tables.spell_slot_table(CharacterClass::Warlock, 1),
            SpellSlots::from([(0, 2), (1, 1)])
        );
        assert_eq!(
            tables.spell_slot_table(CharacterClass::Warlock, 12),
            SpellSlots::from([(0, 4), (5, 3)])
        );
    }

    #[test]
    fn non_casters_have_no_slots() {
        let tables = RuleTables::standard();
        for class in [
            CharacterClass::Barbarian,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Rogue,
        ] {
            assert!(tables.spell_slot_table(class, 20).is_empty());
        }
    }

    #[test]
    fn fixture_slot_table_replaces_canonical() {
        let fixture = SlotTable::from([(1, SpellSlots::from([(1, 9)]))]);
        let tables = RuleTables::standard().with_slot_table(CasterFamily::Full, fixture);
        assert_eq!(
            tables.spell_slot_table(CharacterClass::Cleric, 10),
            SpellSlots::from([(1, 9)])
        );
    }

    #[test]
    fn armor_lookup() {
        let tables = RuleTables::standard();
        assert_eq!(tables.armor("Leather"), ArmorProfile::new(11, DexCap::Uncapped));
        assert_eq!(tables.armor("  chain   SHIRT "), ArmorProfile::new(13, DexCap::Capped(2)));
        assert_eq!(tables.armor("Plate Armor"), ArmorProfile::new(18, DexCap::Fixed));
        assert_eq!(tables.armor("plate"), ArmorProfile::new(18, DexCap::Fixed));
        assert_eq!(tables.armor("mithril pajamas"), ArmorProfile::default());
    }

    #[test]
    fn dex_cap_contribution() {
        assert_eq!(DexCap::Uncapped.contribution(4), 4);
        assert_eq!(DexCap::Capped(2).contribution(4), 2);
        assert_eq!(DexCap::Capped(2).contribution(-1), -1);
        assert_eq!(DexCap::Fixed.contribution(4), 0);
    }
}
