//! Character use cases.
//!
//! Every mutating operation takes the per-character lock, loads the
//! character, applies one engine operation and saves the result. A rejected
//! operation saves nothing.

mod create;
mod delete;
mod equip;
mod error;
mod sheet;
mod spells;
mod view;

use std::sync::Arc;

use charsheet_domain::{Character, CharacterEngine};

use crate::infrastructure::content::ReferenceData;
use crate::infrastructure::locks::CharacterLocks;
use crate::infrastructure::ports::{CharacterStore, ClockPort};

pub use create::CreateCharacter;
pub use delete::DeleteCharacter;
pub use equip::{EquipItem, EquipRequest};
pub use error::CharacterOpError;
pub use sheet::{render_markdown, CharacterSheet, SheetFormat};
pub use spells::{LearnSpell, PrepareSpell};
pub use view::{ListCharacters, ViewCharacter};

/// Container for character use cases.
pub struct CharacterUseCases {
    pub create: Arc<CreateCharacter>,
    pub view: Arc<ViewCharacter>,
    pub list: Arc<ListCharacters>,
    pub delete: Arc<DeleteCharacter>,
    pub equip: Arc<EquipItem>,
    pub learn_spell: Arc<LearnSpell>,
    pub prepare_spell: Arc<PrepareSpell>,
    pub sheet: Arc<CharacterSheet>,
}

impl CharacterUseCases {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        engine: Arc<CharacterEngine>,
        reference: Arc<ReferenceData>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let locks = Arc::new(CharacterLocks::new());

        Self {
            create: Arc::new(CreateCharacter::new(
                store.clone(),
                engine.clone(),
                locks.clone(),
                clock,
            )),
            view: Arc::new(ViewCharacter::new(store.clone(), engine.clone())),
            list: Arc::new(ListCharacters::new(store.clone(), engine.clone())),
            delete: Arc::new(DeleteCharacter::new(store.clone(), locks.clone())),
            equip: Arc::new(EquipItem::new(
                store.clone(),
                engine.clone(),
                reference,
                locks.clone(),
            )),
            learn_spell: Arc::new(LearnSpell::new(store.clone(), engine.clone(), locks.clone())),
            prepare_spell: Arc::new(PrepareSpell::new(store.clone(), engine.clone(), locks)),
            sheet: Arc::new(CharacterSheet::new(store, engine)),
        }
    }
}

/// Fetch by name or fail with `NotFound`.
async fn load_character(
    store: &dyn CharacterStore,
    name: &str,
) -> Result<Character, CharacterOpError> {
    store
        .get_by_name(name)
        .await?
        .ok_or_else(|| CharacterOpError::NotFound(name.trim().to_string()))
}
