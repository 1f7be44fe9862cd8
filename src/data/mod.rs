//! Configuration and the fixture-backed universe that stands in for the game database.

pub mod config;
pub mod universe;
pub mod validate;
