//! # Tileworld
//!
//! A procedurally generated tile world with fish, grazing herbivores and
//! pack-hunting wolves. The [`model::world::World`] type owns one complete
//! simulation instance; several can coexist in a process.

pub mod model;
