//! Use cases: orchestration of store, rules engine and reference data.

pub mod character;

pub use character::{CharacterOpError, CharacterUseCases};
