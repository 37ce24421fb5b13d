//! Equipment slots and the items that fill them.
//!
//! Item descriptors come from the reference cache and are display data; armor
//! class math goes through the armor table by name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Category assigned to items missing from the reference data.
pub const UNKNOWN_CATEGORY: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Armor,
    Shield,
}

impl EquipmentSlot {
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::MainHand,
            EquipmentSlot::OffHand,
            EquipmentSlot::Armor,
            EquipmentSlot::Shield,
        ]
    }

    pub fn holds_weapons(&self) -> bool {
        matches!(self, EquipmentSlot::MainHand | EquipmentSlot::OffHand)
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EquipmentSlot::MainHand => "main hand",
            EquipmentSlot::OffHand => "off hand",
            EquipmentSlot::Armor => "armor",
            EquipmentSlot::Shield => "shield",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for EquipmentSlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "main hand" | "mainhand" | "main" => Ok(EquipmentSlot::MainHand),
            "off hand" | "offhand" | "off" => Ok(EquipmentSlot::OffHand),
            "armor" | "armour" => Ok(EquipmentSlot::Armor),
            "shield" => Ok(EquipmentSlot::Shield),
            _ => Err(DomainError::parse(format!("Unknown equipment slot: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub category: String,
    pub range: String,
    #[serde(default)]
    pub two_handed: bool,
}

impl Weapon {
    /// Neutral descriptor for a weapon with no reference data.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: UNKNOWN_CATEGORY.to_string(),
            range: "0".to_string(),
            two_handed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    /// Armor class as listed in the reference data (display only).
    #[serde(default)]
    pub armor_class: i32,
    #[serde(default)]
    pub dex_bonus: bool,
}

impl Armor {
    /// Neutral descriptor for armor with no reference data.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            armor_class: 0,
            dex_bonus: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shield {
    pub name: String,
}

impl Shield {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The four equipment slots of a character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub main_hand: Option<Weapon>,
    #[serde(default)]
    pub off_hand: Option<Weapon>,
    #[serde(default)]
    pub armor: Option<Armor>,
    #[serde(default)]
    pub shield: Option<Shield>,
}

impl Equipment {
    /// Name of the item in `slot`, if any.
    pub fn occupant(&self, slot: EquipmentSlot) -> Option<&str> {
        match slot {
            EquipmentSlot::MainHand => self.main_hand.as_ref().map(|w| w.name.as_str()),
            EquipmentSlot::OffHand => self.off_hand.as_ref().map(|w| w.name.as_str()),
            EquipmentSlot::Armor => self.armor.as_ref().map(|a| a.name.as_str()),
            EquipmentSlot::Shield => self.shield.as_ref().map(|s| s.name.as_str()),
        }
    }

    pub fn is_empty(&self) -> bool {
        EquipmentSlot::all()
            .iter()
            .all(|slot| self.occupant(*slot).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_parsing_and_display() {
        assert_eq!("main hand".parse::<EquipmentSlot>().unwrap(), EquipmentSlot::MainHand);
        assert_eq!("off-hand".parse::<EquipmentSlot>().unwrap(), EquipmentSlot::OffHand);
        assert_eq!("Main_Hand".parse::<EquipmentSlot>().unwrap(), EquipmentSlot::MainHand);
        assert!("belt".parse::<EquipmentSlot>().is_err());
        assert_eq!(EquipmentSlot::OffHand.to_string(), "off hand");
    }

    #[test]
    fn occupant_reports_item_names() {
        let mut equipment = Equipment::default();
        assert!(equipment.is_empty());

        equipment.main_hand = Some(Weapon::unknown("Longsword"));
        equipment.shield = Some(Shield::new("Shield"));

        assert_eq!(equipment.occupant(EquipmentSlot::MainHand), Some("Longsword"));
        assert_eq!(equipment.occupant(EquipmentSlot::Shield), Some("Shield"));
        assert_eq!(equipment.occupant(EquipmentSlot::Armor), None);
        assert!(!equipment.is_empty());
    }

    #[test]
    fn unknown_descriptors_are_neutral() {
        let weapon = Weapon::unknown("Spork");
        assert_eq!(weapon.category, "unknown");
        assert_eq!(weapon.range, "0");
        assert!(!weapon.two_handed);

        let armor = Armor::unknown("Cardboard");
        assert_eq!(armor.armor_class, 0);
        assert!(!armor.dex_bonus);
    }
}
