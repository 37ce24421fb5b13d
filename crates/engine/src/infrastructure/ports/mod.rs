//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Character storage (JSON file today, anything else tomorrow)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::CharacterStore;
pub use testing::ClockPort;

#[cfg(test)]
pub use repos::MockCharacterStore;
#[cfg(test)]
pub use testing::MockClockPort;
