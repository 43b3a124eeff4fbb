//! Domain models for flock.
//!
//! These are the core types shared across all crates.

pub mod actor;
pub mod group;
pub mod user;
