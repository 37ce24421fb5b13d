//! Infrastructure: ports, adapters and process-level plumbing.

pub mod clock;
pub mod config;
pub mod content;
pub mod locks;
pub mod persistence;
pub mod ports;
