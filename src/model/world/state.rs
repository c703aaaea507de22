use crate::model::config::AppConfig;
use crate::model::entity_store::EntityStore;
use crate::model::snapshot::{AgentSnapshot, PopulationStats, WorldSnapshot};
use crate::model::terrain::{FeatureKind, Tile, WorldMap};
use crate::model::world::World;
use tileworld_data::{AgentId, AgentKind, Species};

impl World {
    /// Validated configuration in effect. Change it with
    /// [`World::set_config`].
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// Direct store access for scripted scenarios and tools.
    pub fn entities_mut(&mut self) -> &mut EntityStore {
        &mut self.entities
    }

    pub fn player_id(&self) -> Option<AgentId> {
        self.player
    }

    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    pub fn get_tile(&self, x: f64, y: f64) -> Option<Tile> {
        self.map.get_tile(x, y)
    }

    pub fn feature_at(&self, kind: FeatureKind, x: f64, y: f64) -> Option<u8> {
        self.map.feature_at(kind, x, y)
    }

    /// Places an agent outside the spawn phase. Wolves created this way do
    /// not want a pack; use [`World::spawn_wolf`] to choose.
    pub fn spawn(&mut self, species: Species, x: f64, y: f64) -> Option<AgentId> {
        if species == Species::Player {
            return None;
        }
        self.entities.create(species, x, y, &self.map)
    }

    pub fn spawn_wolf(&mut self, x: f64, y: f64, wants_pack: bool) -> Option<AgentId> {
        self.entities
            .create_with(AgentKind::new(Species::Wolf, wants_pack), x, y, &self.map)
    }

    /// Drawing view of every live agent, in id order.
    pub fn agents(&self) -> impl Iterator<Item = AgentSnapshot> + '_ {
        self.entities.iter().map(AgentSnapshot::from)
    }

    pub fn stats(&self) -> PopulationStats {
        PopulationStats::collect(&self.entities)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.clock.tick(),
            size: self.config.world.size,
            seed: self.config.terrain.seed,
            paused: self.clock.is_paused(),
            time_scale: self.clock.time_scale(),
            stats: self.stats(),
            agents: self.agents().collect(),
        }
    }
}
