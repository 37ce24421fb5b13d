//! Reference cache: weapon, armor and spell descriptors from JSON files.
//!
//! Both files are optional. A missing or empty file means an empty cache; a
//! malformed one is logged and treated the same way.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use charsheet_domain::{name_key, Armor, SpellDetail, Weapon, UNKNOWN_CATEGORY};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::fs;

#[derive(Debug, Default, Deserialize)]
struct EquipmentCache {
    #[serde(default)]
    weapons: Vec<WeaponRecord>,
    #[serde(default)]
    armors: Vec<ArmorRecord>,
}

#[derive(Debug, Deserialize)]
struct WeaponRecord {
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    range: String,
    #[serde(default)]
    two_handed: bool,
}

impl From<WeaponRecord> for Weapon {
    fn from(record: WeaponRecord) -> Self {
        let category = if record.category.trim().is_empty() {
            UNKNOWN_CATEGORY.to_string()
        } else {
            record.category
        };
        let range = if record.range.trim().is_empty() {
            "0".to_string()
        } else {
            record.range
        };
        Weapon {
            name: record.name,
            category,
            range,
            two_handed: record.two_handed,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ArmorRecord {
    name: String,
    #[serde(default)]
    armor_class: i32,
    #[serde(default)]
    dex_bonus: bool,
}

impl From<ArmorRecord> for Armor {
    fn from(record: ArmorRecord) -> Self {
        Armor {
            name: record.name,
            armor_class: record.armor_class,
            dex_bonus: record.dex_bonus,
        }
    }
}

/// Case-insensitive descriptor lookup. Misses return the neutral
/// "unknown" descriptor under the requested name.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    weapons: HashMap<String, Weapon>,
    armors: HashMap<String, Armor>,
    spell_details: Vec<SpellDetail>,
}

impl ReferenceData {
    pub fn new(
        weapons: impl IntoIterator<Item = Weapon>,
        armors: impl IntoIterator<Item = Armor>,
        spell_details: Vec<SpellDetail>,
    ) -> Self {
        Self {
            weapons: weapons
                .into_iter()
                .map(|w| (name_key(&w.name), w))
                .collect(),
            armors: armors.into_iter().map(|a| (name_key(&a.name), a)).collect(),
            spell_details,
        }
    }

    /// Read the equipment cache and the spell details file.
    pub async fn load(equipment_path: &Path, spell_details_path: &Path) -> Self {
        let equipment: EquipmentCache = read_optional_json(equipment_path).await;
        let spell_details: Vec<SpellDetail> = read_optional_json(spell_details_path).await;

        let data = Self::new(
            equipment.weapons.into_iter().map(Weapon::from),
            equipment.armors.into_iter().map(Armor::from),
            spell_details,
        );
        tracing::debug!(
            weapons = data.weapons.len(),
            armors = data.armors.len(),
            spells = data.spell_details.len(),
            "Loaded reference cache"
        );
        data
    }

    pub fn weapon(&self, name: &str) -> Weapon {
        self.weapons
            .get(&name_key(name))
            .cloned()
            .unwrap_or_else(|| Weapon::unknown(name.trim()))
    }

    pub fn armor(&self, name: &str) -> Armor {
        self.armors
            .get(&name_key(name))
            .cloned()
            .unwrap_or_else(|| Armor::unknown(name.trim()))
    }

    pub fn spell_details(&self) -> &[SpellDetail] {
        &self.spell_details
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty() && self.armors.is_empty() && self.spell_details.is_empty()
    }
}

async fn read_optional_json<T: DeserializeOwned + Default>(path: &Path) -> T {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read reference cache");
            return T::default();
        }
    };
    if content.trim().is_empty() {
        return T::default();
    }

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Ignoring malformed reference cache"
            );
            T::default()
        }
    }
}
