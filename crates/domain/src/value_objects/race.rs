//! Playable races

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    Human,
    VariantHuman,
    Dwarf,
    HillDwarf,
    MountainDwarf,
    Elf,
    HighElf,
    WoodElf,
    Drow,
    Halfling,
    LightfootHalfling,
    StoutHalfling,
    Dragonborn,
    Gnome,
    ForestGnome,
    RockGnome,
    HalfElf,
    HalfOrc,
    Tiefling,
    Aasimar,
    Firbolg,
    Goliath,
    Tabaxi,
    Triton,
}

impl Race {
    pub fn all() -> &'static [Race] {
        &[
            Race::Human,
            Race::VariantHuman,
            Race::Dwarf,
            Race::HillDwarf,
            Race::MountainDwarf,
            Race::Elf,
            Race::HighElf,
            Race::WoodElf,
            Race::Drow,
            Race::Halfling,
            Race::LightfootHalfling,
            Race::StoutHalfling,
            Race::Dragonborn,
            Race::Gnome,
            Race::ForestGnome,
            Race::RockGnome,
            Race::HalfElf,
            Race::HalfOrc,
            Race::Tiefling,
            Race::Aasimar,
            Race::Firbolg,
            Race::Goliath,
            Race::Tabaxi,
            Race::Triton,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Race::Human => "Human",
            Race::VariantHuman => "Variant Human",
            Race::Dwarf => "Dwarf",
            Race::HillDwarf => "Hill Dwarf",
            Race::MountainDwarf => "Mountain Dwarf",
            Race::Elf => "Elf",
            Race::HighElf => "High Elf",
            Race::WoodElf => "Wood Elf",
            Race::Drow => "Drow",
            Race::Halfling => "Halfling",
            Race::LightfootHalfling => "Lightfoot Halfling",
            Race::StoutHalfling => "Stout Halfling",
            Race::Dragonborn => "Dragonborn",
            Race::Gnome => "Gnome",
            Race::ForestGnome => "Forest Gnome",
            Race::RockGnome => "Rock Gnome",
            Race::HalfElf => "Half-Elf",
            Race::HalfOrc => "Half-Orc",
            Race::Tiefling => "Tiefling",
            Race::Aasimar => "Aasimar",
            Race::Firbolg => "Firbolg",
            Race::Goliath => "Goliath",
            Race::Tabaxi => "Tabaxi",
            Race::Triton => "Triton",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Race {
    type Err = DomainError;

    /// Case-insensitive; hyphens and underscores read as spaces, and subrace
    /// names are accepted in either order ("high elf" or "elf high").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .to_lowercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "human" => Ok(Race::Human),
            "variant human" | "human variant" => Ok(Race::VariantHuman),
            "dwarf" => Ok(Race::Dwarf),
            "hill dwarf" | "dwarf hill" => Ok(Race::HillDwarf),
            "mountain dwarf" | "dwarf mountain" => Ok(Race::MountainDwarf),
            "elf" => Ok(Race::Elf),
            "high elf" | "elf high" => Ok(Race::HighElf),
            "wood elf" | "elf wood" => Ok(Race::WoodElf),
            "drow" | "elf drow" | "dark elf" => Ok(Race::Drow),
            "halfling" => Ok(Race::Halfling),
            "lightfoot halfling" | "halfling lightfoot" => Ok(Race::LightfootHalfling),
            "stout halfling" | "halfling stout" => Ok(Race::StoutHalfling),
            "dragonborn" => Ok(Race::Dragonborn),
            "gnome" => Ok(Race::Gnome),
            "forest gnome" | "gnome forest" => Ok(Race::ForestGnome),
            "rock gnome" | "gnome rock" => Ok(Race::RockGnome),
            "half elf" => Ok(Race::HalfElf),
            "half orc" => Ok(Race::HalfOrc),
            "tiefling" => Ok(Race::Tiefling),
            "aasimar" => Ok(Race::Aasimar),
            "firbolg" => Ok(Race::Firbolg),
            "goliath" => Ok(Race::Goliath),
            "tabaxi" => Ok(Race::Tabaxi),
            "triton" => Ok(Race::Triton),
            _ => Err(DomainError::parse(format!("Unknown race: {}", s))),
        }
    }
}
