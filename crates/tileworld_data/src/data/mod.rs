//! Core data structures for the tileworld simulation.

pub mod entity;
pub mod events;
pub mod terrain;
