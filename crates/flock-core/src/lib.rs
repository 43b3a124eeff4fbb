//! Flock Core — domain models, persistence gateway traits and the
//! error taxonomy shared by every flock crate.

pub mod error;
pub mod models;
pub mod repository;
