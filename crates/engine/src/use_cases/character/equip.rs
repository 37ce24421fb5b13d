//! Equip item use case.
//!
//! Item descriptors come from the reference cache; unknown items are
//! equipped with a neutral descriptor rather than rejected.

use std::sync::Arc;

use charsheet_domain::{Character, CharacterEngine, EquipmentSlot, Shield};

use crate::infrastructure::content::ReferenceData;
use crate::infrastructure::locks::CharacterLocks;
use crate::infrastructure::ports::CharacterStore;

use super::error::CharacterOpError;
use super::load_character;

/// What to put on, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipRequest {
    Weapon { name: String, slot: EquipmentSlot },
    Armor(String),
    Shield(String),
}

impl EquipRequest {
    pub fn item_name(&self) -> &str {
        match self {
            Self::Weapon { name, .. } | Self::Armor(name) | Self::Shield(name) => name.trim(),
        }
    }
}

pub struct EquipItem {
    store: Arc<dyn CharacterStore>,
    engine: Arc<CharacterEngine>,
    reference: Arc<ReferenceData>,
    locks: Arc<CharacterLocks>,
}

impl EquipItem {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        engine: Arc<CharacterEngine>,
        reference: Arc<ReferenceData>,
        locks: Arc<CharacterLocks>,
    ) -> Self {
        Self {
            store,
            engine,
            reference,
            locks,
        }
    }

    /// Equip the item and save. The character is left untouched in the
    /// store when the slot is occupied or invalid.
    pub async fn execute(
        &self,
        name: &str,
        request: EquipRequest,
    ) -> Result<Character, CharacterOpError> {
        let _guard = self.locks.lock(name).await;
        let mut character = load_character(self.store.as_ref(), name).await?;

        match &request {
            EquipRequest::Weapon { name: item, slot } => {
                let weapon = self.reference.weapon(item);
                self.engine.equip_weapon(&mut character, weapon, *slot)?;
            }
            EquipRequest::Armor(item) => {
                let armor = self.reference.armor(item);
                self.engine.equip_armor(&mut character, armor)?;
            }
            EquipRequest::Shield(item) => {
                self.engine
                    .equip_shield(&mut character, Shield::new(item.trim()))?;
            }
        }

        self.store.save(&character).await?;
        tracing::info!(
            character = %character.name(),
            item = %request.item_name(),
            armor_class = character.armor_class(),
            "Equipped item"
        );
        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryCharacterStore;
    use crate::infrastructure::ports::MockCharacterStore;
    use crate::use_cases::character::test_support::{character, engine};
    use charsheet_domain::{Armor, CharacterClass, CharacterError, Race, Weapon};

    fn reference() -> Arc<ReferenceData> {
        Arc::new(ReferenceData::new(
            [Weapon {
                name: "Longsword".into(),
                category: "Martial".into(),
                range: "Melee".into(),
                two_handed: false,
            }],
            [Armor {
                name: "Chain Mail".into(),
                armor_class: 16,
                dex_bonus: false,
            }],
            Vec::new(),
        ))
    }

    fn use_case(store: Arc<dyn CharacterStore>) -> EquipItem {
        EquipItem::new(store, engine(), reference(), Arc::new(CharacterLocks::new()))
    }

    #[tokio::test]
    async fn armor_and_shield_update_armor_class() {
        let store = Arc::new(InMemoryCharacterStore::with_characters([character(
            "Conan",
            Race::Human,
            CharacterClass::Fighter,
        )]));
        let equip = use_case(store.clone());

        equip
            .execute("Conan", EquipRequest::Armor("chain mail".into()))
            .await
            .unwrap();
        let conan = equip
            .execute("conan", EquipRequest::Shield("Shield".into()))
            .await
            .unwrap();

        assert_eq!(conan.armor_class(), 18);
        let stored = store.get_by_name("Conan").await.unwrap().unwrap();
        assert_eq!(stored.armor_class(), 18);
        assert_eq!(stored.equipment().armor.as_ref().map(|a| a.armor_class), Some(16));
    }

    #[tokio::test]
    async fn weapon_uses_reference_descriptor() {
        let store = Arc::new(InMemoryCharacterStore::with_characters([character(
            "Conan",
            Race::Human,
            CharacterClass::Fighter,
        )]));

        let conan = use_case(store)
            .execute(
                "Conan",
                EquipRequest::Weapon {
                    name: "longsword".into(),
                    slot: EquipmentSlot::MainHand,
                },
            )
            .await
            .unwrap();

        let sword = conan.equipment().main_hand.as_ref().unwrap();
        assert_eq!(sword.name, "Longsword");
        assert_eq!(sword.category, "Martial");
    }

    #[tokio::test]
    async fn occupied_slot_saves_nothing() {
        let store = Arc::new(InMemoryCharacterStore::with_characters([character(
            "Conan",
            Race::Human,
            CharacterClass::Fighter,
        )]));
        let equip = use_case(store.clone());
        equip
            .execute(
                "Conan",
                EquipRequest::Weapon {
                    name: "Longsword".into(),
                    slot: EquipmentSlot::MainHand,
                },
            )
            .await
            .unwrap();

        let err = equip
            .execute(
                "Conan",
                EquipRequest::Weapon {
                    name: "Dagger".into(),
                    slot: EquipmentSlot::MainHand,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err.rule(), Some(CharacterError::SlotOccupied { .. })));
        let stored = store.get_by_name("Conan").await.unwrap().unwrap();
        assert_eq!(
            stored.equipment().main_hand.as_ref().map(|w| w.name.as_str()),
            Some("Longsword")
        );
    }

    #[tokio::test]
    async fn weapon_in_armor_slot_is_invalid() {
        let conan = character("Conan", Race::Human, CharacterClass::Fighter);
        let mut store = MockCharacterStore::new();
        store
            .expect_get_by_name()
            .returning(move |_| Ok(Some(conan.clone())));
        store.expect_save().times(0);

        let err = use_case(Arc::new(store))
            .execute(
                "Conan",
                EquipRequest::Weapon {
                    name: "Longsword".into(),
                    slot: EquipmentSlot::Armor,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err.rule(), Some(CharacterError::InvalidSlot(EquipmentSlot::Armor))));
    }

    #[tokio::test]
    async fn unknown_character_is_not_found() {
        let mut store = MockCharacterStore::new();
        store.expect_get_by_name().returning(|_| Ok(None));

        let err = use_case(Arc::new(store))
            .execute("Nobody", EquipRequest::Shield("Shield".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, CharacterOpError::NotFound(_)));
    }
}
