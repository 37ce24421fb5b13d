//! Plain-text rendering for command output.

use charsheet_domain::{Character, Spell};

/// Short multi-line summary shown after create, view and equip.
pub fn summary(character: &Character) -> String {
    let derived = character.derived();
    let mut lines = vec![
        format!(
            "{}: level {} {} {}",
            character.name(),
            character.level(),
            character.race().display_name(),
            character.class().display_name()
        ),
        format!(
            "AC {} | Initiative {:+} | Proficiency {:+} | Passive Perception {}",
            character.armor_class(),
            character.initiative(),
            character.proficiency_bonus(),
            character.passive_perception()
        ),
    ];

    if let Some(ability) = derived.spellcasting_ability {
        lines.push(format!(
            "Spellcasting: {} | Save DC {} | Attack {:+}",
            ability.display_name(),
            derived.spell_save_dc,
            derived.spell_attack_bonus
        ));
    }
    if !character.spell_slots().is_empty() {
        let slots: Vec<String> = character
            .spell_slots()
            .iter()
            .map(|(level, count)| format!("{}:{}", level, count))
            .collect();
        lines.push(format!("Slots: {}", slots.join(" ")));
    }
    if !character.spells().is_empty() {
        let names: Vec<&str> = character.spells().iter().map(|s| s.name.as_str()).collect();
        lines.push(format!("Spells: {}", names.join(", ")));
    }

    lines.join("\n")
}

pub fn list(characters: &[Character]) -> String {
    if characters.is_empty() {
        return "No characters".to_string();
    }
    characters
        .iter()
        .map(|c| {
            format!(
                "{} (level {} {} {})",
                c.name(),
                c.level(),
                c.race().display_name(),
                c.class().display_name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn spell_added(verb: &str, character: &str, spell: &Spell) -> String {
    let level = if spell.level.is_cantrip() {
        "cantrip".to_string()
    } else {
        format!("level {}", spell.level.as_number())
    };
    format!("{} {} {} ({})", character.trim(), verb, spell.name, level)
}
