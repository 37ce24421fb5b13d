//! Unified error types for the domain layer
//!
//! `DomainError` covers value-object construction and boundary parsing.
//! `CharacterError` covers the rules enforced by the character engine; every
//! variant is a local, synchronous rejection that leaves the character
//! untouched.

use thiserror::Error;

use crate::entities::EquipmentSlot;
use crate::value_objects::{CharacterClass, PreparationMode};

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Character name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Rule violations reported by [`crate::CharacterEngine`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CharacterError {
    /// Creation input rejected (empty name, level below 1).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The target equipment slot already holds an item.
    #[error("{slot} slot already occupied by {occupant}")]
    SlotOccupied {
        slot: EquipmentSlot,
        occupant: String,
    },

    /// A weapon was aimed at a slot that cannot hold weapons.
    #[error("invalid weapon slot: {0}")]
    InvalidSlot(EquipmentSlot),

    /// Spell operation on a class without spellcasting.
    #[error("{class} can't cast spells")]
    NotCastable { class: CharacterClass },

    /// Learn on a prepare-mode class, or prepare on a learn-mode class.
    #[error("{class} {} spells and can't {}", .mode.verb(), .mode.other().verb_infinitive())]
    WrongPreparationMode {
        class: CharacterClass,
        mode: PreparationMode,
    },

    /// No spell by that name exists in the catalog.
    #[error("spell not found: {0}")]
    SpellNotFound(String),

    /// The spell exists but is not on the class's list.
    #[error("spell \"{spell}\" not found for class {class}")]
    NotInClassList {
        spell: String,
        class: CharacterClass,
    },

    /// The spell is already in the character's list.
    #[error("spell already known: {0}")]
    DuplicateSpell(String),

    /// No usable slot exists for the spell's level.
    #[error("no spell slots available for {spell} (level {level})")]
    InsufficientSlot { spell: String, level: u8 },
}

impl CharacterError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Stable identifier for the variant, used in logs and tests.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "CHARACTER_VALIDATION",
            Self::SlotOccupied { .. } => "CHARACTER_SLOT_OCCUPIED",
            Self::InvalidSlot(_) => "CHARACTER_INVALID_SLOT",
            Self::NotCastable { .. } => "CHARACTER_NOT_CASTABLE",
            Self::WrongPreparationMode { .. } => "CHARACTER_WRONG_PREPARATION_MODE",
            Self::SpellNotFound(_) => "CHARACTER_SPELL_NOT_FOUND",
            Self::NotInClassList { .. } => "CHARACTER_NOT_IN_CLASS_LIST",
            Self::DuplicateSpell(_) => "CHARACTER_DUPLICATE_SPELL",
            Self::InsufficientSlot { .. } => "CHARACTER_INSUFFICIENT_SLOT",
        }
    }
}

impl From<DomainError> for CharacterError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}
