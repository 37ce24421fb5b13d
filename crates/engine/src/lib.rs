//! Charsheet Engine library.
//!
//! Everything around the pure rules in `charsheet-domain`: storage, content
//! loading, orchestration and the command line.
//!
//! ## Structure
//!
//! - `use_cases/` - Load, apply one rule operation, save
//! - `infrastructure/` - Ports, store adapters, content loaders, config, locks
//! - `api/` - Command-line parsing and text rendering
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
