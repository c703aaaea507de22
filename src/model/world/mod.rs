use crate::model::clock::SimulationClock;
use crate::model::config::AppConfig;
use crate::model::entity_store::EntityStore;
use crate::model::metrics::Metrics;
use crate::model::terrain::WorldMap;
use rand_chacha::ChaCha8Rng;
use tileworld_data::AgentId;

pub mod init;
pub mod state;
pub mod update;

/// Salt mixed into the terrain seed for the behaviour RNG, so agent
/// randomness does not replay the feature-placement stream.
pub const RNG_SALT: u64 = 0x5EED;

/// One frame of player input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerInput {
    pub direction: (f64, f64),
    pub sprinting: bool,
}

/// A complete simulation instance: terrain, agents, clock and randomness.
pub struct World {
    config: AppConfig,
    map: WorldMap,
    entities: EntityStore,
    pub clock: SimulationClock,
    player: Option<AgentId>,
    rng: ChaCha8Rng,
    pub metrics: Metrics,
}
