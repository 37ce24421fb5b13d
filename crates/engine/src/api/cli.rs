//! Command-line interface.
//!
//! Closed vocabularies (race, class, background, skill, slot) are parsed by
//! clap through their `FromStr` impls, so unknown values never reach a use
//! case.

use std::path::PathBuf;

use charsheet_domain::{
    AbilityScores, Background, CharacterClass, DomainError, EquipmentSlot, NewCharacter, Race,
    Skill,
};
use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::api::render;
use crate::app::App;
use crate::use_cases::character::{EquipRequest, SheetFormat};
use crate::use_cases::CharacterOpError;

#[derive(Debug, Parser)]
#[command(name = "charsheet", version, about = "Tabletop character sheets with derived stats")]
pub struct Cli {
    /// Character store file (overrides CHARSHEET_STORE_PATH)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Spell CSV file (overrides CHARSHEET_SPELLS_CSV)
    #[arg(long, global = true)]
    pub spells: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a character and derive its stats
    Create(CreateArgs),
    /// Show a character summary
    View {
        #[arg(long)]
        name: String,
    },
    /// List all characters
    List,
    /// Delete a character
    Delete {
        #[arg(long)]
        name: String,
    },
    /// Equip a weapon, armor or shield
    Equip(EquipArgs),
    /// Learn a spell (bard, ranger, sorcerer, warlock)
    LearnSpell {
        #[arg(long)]
        name: String,
        #[arg(long)]
        spell: String,
    },
    /// Prepare a spell (cleric, druid, paladin, wizard)
    PrepareSpell {
        #[arg(long)]
        name: String,
        #[arg(long)]
        spell: String,
    },
    /// Print the full character sheet
    Sheet {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "markdown")]
        format: String,
    },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub race: Race,
    #[arg(long)]
    pub class: CharacterClass,
    #[arg(long, default_value = "acolyte")]
    pub background: Background,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub level: i32,

    #[arg(long = "str", default_value_t = 10)]
    pub strength: i32,
    #[arg(long = "dex", default_value_t = 10)]
    pub dexterity: i32,
    #[arg(long = "con", default_value_t = 10)]
    pub constitution: i32,
    #[arg(long = "int", default_value_t = 10)]
    pub intelligence: i32,
    #[arg(long = "wis", default_value_t = 10)]
    pub wisdom: i32,
    #[arg(long = "cha", default_value_t = 10)]
    pub charisma: i32,

    /// Comma-separated skill proficiencies; defaults come from class and background
    #[arg(long, value_delimiter = ',')]
    pub skills: Vec<Skill>,
}

impl CreateArgs {
    pub fn into_input(self) -> NewCharacter {
        let scores = AbilityScores::new(
            self.strength,
            self.dexterity,
            self.constitution,
            self.intelligence,
            self.wisdom,
            self.charisma,
        );
        let mut input = NewCharacter::new(self.name, self.race, self.class)
            .with_level(self.level)
            .with_ability_scores(scores)
            .with_background(self.background);
        if !self.skills.is_empty() {
            input = input.with_skills(self.skills);
        }
        input
    }
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("item").required(true).args(["weapon", "armor", "shield"])))]
pub struct EquipArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, requires = "slot")]
    pub weapon: Option<String>,
    /// Weapon slot: main hand or off hand
    #[arg(long)]
    pub slot: Option<EquipmentSlot>,
    #[arg(long)]
    pub armor: Option<String>,
    #[arg(long)]
    pub shield: Option<String>,
}

impl EquipArgs {
    pub fn request(&self) -> Result<EquipRequest, DomainError> {
        match (&self.weapon, &self.armor, &self.shield) {
            (Some(weapon), None, None) => {
                let slot = self
                    .slot
                    .ok_or_else(|| DomainError::validation("A weapon needs --slot"))?;
                Ok(EquipRequest::Weapon {
                    name: weapon.clone(),
                    slot,
                })
            }
            (None, Some(armor), None) => Ok(EquipRequest::Armor(armor.clone())),
            (None, None, Some(shield)) => Ok(EquipRequest::Shield(shield.clone())),
            _ => Err(DomainError::validation(
                "Equip exactly one of --weapon, --armor or --shield",
            )),
        }
    }
}

/// Run one command and return the text to print.
pub async fn run(app: &App, command: Command) -> Result<String, CharacterOpError> {
    let characters = &app.use_cases.character;

    match command {
        Command::Create(args) => {
            let character = characters.create.execute(args.into_input()).await?;
            Ok(render::summary(&character))
        }
        Command::View { name } => {
            let character = characters.view.execute(&name).await?;
            Ok(render::summary(&character))
        }
        Command::List => {
            let all = characters.list.execute().await?;
            Ok(render::list(&all))
        }
        Command::Delete { name } => {
            characters.delete.execute(&name).await?;
            Ok(format!("Deleted {}", name.trim()))
        }
        Command::Equip(args) => {
            let request = args.request()?;
            let item = request.item_name().to_string();
            let character = characters.equip.execute(&args.name, request).await?;
            Ok(format!("Equipped {}\n{}", item, render::summary(&character)))
        }
        Command::LearnSpell { name, spell } => {
            let learned = characters.learn_spell.execute(&name, &spell).await?;
            Ok(render::spell_added("learned", &name, &learned))
        }
        Command::PrepareSpell { name, spell } => {
            let prepared = characters.prepare_spell.execute(&name, &spell).await?;
            Ok(render::spell_added("prepared", &name, &prepared))
        }
        Command::Sheet { name, format } => {
            let format: SheetFormat = format.parse()?;
            characters.sheet.execute(&name, format).await
        }
    }
}
