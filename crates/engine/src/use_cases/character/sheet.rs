//! Character sheet rendering.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::str::FromStr;
use std::sync::Arc;

use charsheet_domain::{Ability, Character, CharacterEngine, Skill};

use crate::infrastructure::ports::CharacterStore;

use super::error::CharacterOpError;
use super::load_character;

/// Output formats for [`CharacterSheet`]. Only markdown today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetFormat {
    #[default]
    Markdown,
}

impl FromStr for SheetFormat {
    type Err = CharacterOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(SheetFormat::Markdown),
            _ => Err(CharacterOpError::UnsupportedFormat(s.trim().to_string())),
        }
    }
}

pub struct CharacterSheet {
    store: Arc<dyn CharacterStore>,
    engine: Arc<CharacterEngine>,
}

impl CharacterSheet {
    pub fn new(store: Arc<dyn CharacterStore>, engine: Arc<CharacterEngine>) -> Self {
        Self { store, engine }
    }

    pub async fn execute(
        &self,
        name: &str,
        format: SheetFormat,
    ) -> Result<String, CharacterOpError> {
        let mut character = load_character(self.store.as_ref(), name).await?;
        self.engine.refresh(&mut character);

        match format {
            SheetFormat::Markdown => Ok(render_markdown(&character)),
        }
    }
}

fn signed(value: i32) -> String {
    format!("{:+}", value)
}

/// Render the full sheet: identity, abilities, skills, equipment, combat and
/// spellcasting. Caster sections are omitted for non-casters.
pub fn render_markdown(character: &Character) -> String {
    let mut out = String::new();
    let scores = character.ability_scores();
    let derived = character.derived();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "# {}\n", character.name());

    let _ = writeln!(out, "## Character");
    let _ = writeln!(out, "Class: {}", character.class().display_name());
    let _ = writeln!(out, "Race: {}", character.race().display_name());
    if let Some(background) = character.background() {
        let _ = writeln!(out, "Background: {}", background.display_name());
    }
    let _ = writeln!(out, "Level: {}", character.level());
    let _ = writeln!(out, "Proficiency bonus: {}", signed(character.proficiency_bonus()));
    let _ = writeln!(out, "Passive perception: {}\n", character.passive_perception());

    let _ = writeln!(out, "## Ability scores");
    for ability in Ability::all() {
        let _ = writeln!(
            out,
            "{}: {} ({})",
            ability.abbreviation(),
            scores.get(*ability),
            signed(scores.modifier(*ability))
        );
    }
    out.push('\n');

    let _ = writeln!(out, "## Skills");
    for skill in Skill::all() {
        let mark = if character.is_proficient(*skill) { "[x]" } else { "[ ]" };
        let _ = writeln!(
            out,
            "{} {} ({}) {}",
            mark,
            skill.display_name(),
            skill.ability().abbreviation(),
            signed(character.skill_modifier(*skill))
        );
    }
    out.push('\n');

    let _ = writeln!(out, "## Equipment");
    let equipment = character.equipment();
    if let Some(weapon) = &equipment.main_hand {
        let _ = writeln!(out, "Main hand: {}", weapon.name);
    }
    if let Some(weapon) = &equipment.off_hand {
        let _ = writeln!(out, "Off hand: {}", weapon.name);
    }
    if let Some(armor) = &equipment.armor {
        let _ = writeln!(out, "Armor: {}", armor.name);
    }
    if let Some(shield) = &equipment.shield {
        let _ = writeln!(out, "Shield: {}", shield.name);
    }
    out.push('\n');

    let _ = writeln!(out, "## Combat stats");
    let _ = writeln!(out, "Armor class: {}", character.armor_class());
    let _ = writeln!(out, "Initiative bonus: {}\n", signed(character.initiative()));

    if !character.spell_slots().is_empty() {
        let _ = writeln!(out, "## Spell slots");
        for (level, count) in character.spell_slots() {
            let _ = writeln!(out, "Level {}: {}", level, count);
        }
        out.push('\n');
    }

    if let Some(ability) = derived.spellcasting_ability {
        let _ = writeln!(out, "## Spellcasting");
        let _ = writeln!(out, "Spellcasting ability: {}", ability.display_name());
        let _ = writeln!(out, "Spell save DC: {}", derived.spell_save_dc);
        let _ = writeln!(out, "Spell attack bonus: {}\n", signed(derived.spell_attack_bonus));
    }

    if !character.spells().is_empty() {
        let _ = writeln!(out, "## Spells\n");
        let mut by_level: BTreeMap<u8, Vec<&str>> = BTreeMap::new();
        for spell in character.spells() {
            by_level
                .entry(spell.level.as_number())
                .or_default()
                .push(spell.name.as_str());
        }
        for (level, names) in by_level {
            let _ = writeln!(out, "### Level {}", level);
            for name in names {
                let _ = writeln!(out, "- {}", name);
            }
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockCharacterStore;
    use crate::use_cases::character::test_support::{character, engine};
    use charsheet_domain::{CharacterClass, Race};

    #[test]
    fn format_parsing() {
        assert_eq!("Markdown".parse::<SheetFormat>().unwrap(), SheetFormat::Markdown);
        assert!(matches!(
            "pdf".parse::<SheetFormat>(),
            Err(CharacterOpError::UnsupportedFormat(f)) if f == "pdf"
        ));
    }

    #[test]
    fn wizard_sheet_has_caster_sections() {
        let mut merlin = character("Merlin", Race::Human, CharacterClass::Wizard);
        engine().prepare_spell(&mut merlin, "Magic Missile").unwrap();
        engine().prepare_spell(&mut merlin, "Fire Bolt").unwrap();

        let sheet = render_markdown(&merlin);

        assert!(sheet.starts_with("# Merlin\n"));
        assert!(sheet.contains("INT: 11 (+0)"));
        assert!(sheet.contains("Proficiency bonus: +2"));
        assert!(sheet.contains("## Spell slots\nLevel 0: 3\nLevel 1: 2\n"));
        assert!(sheet.contains("Spellcasting ability: Intelligence"));
        assert!(sheet.contains("Spell save DC: 10"));
        assert!(sheet.contains("### Level 0\n- Fire Bolt\n"));
        assert!(sheet.contains("### Level 1\n- Magic Missile\n"));
    }

    #[test]
    fn fighter_sheet_omits_caster_sections() {
        let conan = character("Conan", Race::Human, CharacterClass::Fighter);

        let sheet = render_markdown(&conan);

        assert!(!sheet.contains("## Spell slots"));
        assert!(!sheet.contains("## Spellcasting"));
        assert!(!sheet.contains("## Spells"));
        assert_eq!(sheet.matches("] ").count(), Skill::all().len());
    }

    #[test]
    fn proficient_skills_are_checked() {
        let conan = character("Conan", Race::Human, CharacterClass::Fighter);
        let sheet = render_markdown(&conan);

        for skill in conan.skill_proficiencies() {
            assert!(sheet.contains(&format!("[x] {} (", skill.display_name())));
        }
    }

    #[tokio::test]
    async fn execute_loads_and_renders() {
        let merlin = character("Merlin", Race::Human, CharacterClass::Wizard);
        let mut store = MockCharacterStore::new();
        store
            .expect_get_by_name()
            .returning(move |_| Ok(Some(merlin.clone())));

        let sheet = CharacterSheet::new(Arc::new(store), engine())
            .execute("Merlin", SheetFormat::Markdown)
            .await
            .unwrap();

        assert!(sheet.contains("## Combat stats\nArmor class: 10\nInitiative bonus: +0\n"));
    }
}
