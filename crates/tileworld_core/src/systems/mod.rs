//! Per-tick agent behaviour.
//!
//! A tick is a spawn phase followed by species update phases in the fixed
//! order Fish, Pig/Cow, Wolf. Within a phase agents run in ascending id
//! order. Ids are snapshotted when a phase starts, so an agent removed
//! earlier in the phase is skipped by the existence check in its update.

use crate::config::AppConfig;
use crate::entity_store::EntityStore;
use crate::terrain::WorldMap;
use rand::Rng;
use tileworld_data::{Species, WorldEvent};

pub mod fish;
pub mod herbivore;
pub mod movement;
pub mod pack;
pub mod spawn;
pub mod wolf;

/// Read-only simulation context handed to every update.
#[derive(Clone, Copy)]
pub struct SystemContext<'a> {
    pub map: &'a WorldMap,
    pub config: &'a AppConfig,
}

impl<'a> SystemContext<'a> {
    pub fn new(map: &'a WorldMap, config: &'a AppConfig) -> Self {
        Self { map, config }
    }
}

/// Runs one full tick and returns what happened.
pub fn run_tick<R: Rng>(ctx: SystemContext, store: &mut EntityStore, rng: &mut R) -> Vec<WorldEvent> {
    let mut events = Vec::new();
    spawn::spawn_phase(ctx, store, rng, &mut events);
    update_phase(ctx, store, rng, &mut events);
    events
}

/// Updates every live agent once, without spawning.
pub fn update_phase<R: Rng>(
    ctx: SystemContext,
    store: &mut EntityStore,
    rng: &mut R,
    events: &mut Vec<WorldEvent>,
) {
    for id in store.ids_of_species(&[Species::Fish]) {
        fish::update_fish(ctx, store, id, rng);
    }
    for id in store.ids_of_species(&Species::SKITTISH) {
        herbivore::update_herbivore(ctx, store, id, rng);
    }
    for id in store.ids_of_species(&[Species::Wolf]) {
        wolf::update_wolf(ctx, store, id, rng, events);
    }
}
