use crate::model::clock::SimulationClock;
use crate::model::config::{validate_size, AppConfig, TerrainSettings};
use crate::model::entity_store::EntityStore;
use crate::model::metrics::Metrics;
use crate::model::terrain::{TerrainGenerator, WorldMap};
use crate::model::world::{World, RNG_SALT};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tileworld_core::ConfigError;
use tileworld_data::{Position, Species, WorldEvent};

impl World {
    /// Generates terrain from `config` and places the player.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let map = generate_map(&config);
        Ok(Self::with_map(config, map)?)
    }

    /// Builds a world around an existing map, skipping generation.
    ///
    /// Scripted scenarios rely on this to run on hand-made terrain. The
    /// configuration is still validated.
    pub fn with_map(config: AppConfig, map: WorldMap) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.terrain.seed.wrapping_add(RNG_SALT));
        let clock = SimulationClock::new(config.clock.time_scale);
        let mut world = Self {
            config,
            map,
            entities: EntityStore::new(),
            clock,
            player: None,
            rng,
            metrics: Metrics::new(),
        };
        world.place_player();
        Ok(world)
    }

    /// Replaces the configuration.
    ///
    /// Invalid configurations are rejected before anything changes. When the
    /// grid size, terrain or features differ, the world is rebuilt and the
    /// reset event returned; otherwise agents carry on under the new tunables.
    pub fn set_config(&mut self, config: AppConfig) -> Result<Option<WorldEvent>, ConfigError> {
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "Rejected configuration");
            return Err(e);
        }
        let regenerate = config.world != self.config.world
            || config.terrain != self.config.terrain
            || config.features != self.config.features;
        self.clock.set_time_scale(config.clock.time_scale);
        self.config = config;
        Ok(regenerate.then(|| self.rebuild()))
    }

    /// Rebuilds the terrain from new settings.
    ///
    /// Every agent except the player is removed and the player moves to the
    /// new spawn point. Invalid settings are rejected before anything
    /// changes.
    pub fn regenerate(&mut self, settings: TerrainSettings) -> Result<WorldEvent, ConfigError> {
        if let Err(e) = settings.validate() {
            tracing::warn!(error = %e, "Rejected terrain settings");
            return Err(e);
        }
        self.config.terrain = settings;
        Ok(self.rebuild())
    }

    /// Regenerates with a new grid side, keeping the terrain settings.
    pub fn resize(&mut self, size: u32) -> Result<WorldEvent, ConfigError> {
        if let Err(e) = validate_size(size) {
            tracing::warn!(error = %e, "Rejected world size");
            return Err(e);
        }
        self.config.world.size = size;
        Ok(self.rebuild())
    }

    fn rebuild(&mut self) -> WorldEvent {
        self.map = generate_map(&self.config);
        let cleared = self.entities.retain_only(self.player);
        self.rng = ChaCha8Rng::seed_from_u64(self.config.terrain.seed.wrapping_add(RNG_SALT));
        self.clock.reset();
        let spawn = self.place_player();
        tracing::info!(
            size = self.config.world.size,
            seed = self.config.terrain.seed,
            cleared,
            spawn_x = spawn.x,
            spawn_y = spawn.y,
            "World regenerated"
        );
        WorldEvent::WorldReset {
            spawn,
            size: self.config.world.size,
        }
    }

    /// Moves the player to the spawn point, creating it on first use.
    fn place_player(&mut self) -> Position {
        let tile = self.map.find_spawn_point();
        let (x, y) = tile.center();
        let spawn = Position::new(x, y);
        match self.player.and_then(|id| self.entities.get_mut(id)) {
            Some(player) => {
                player.position = spawn;
                player.heading = 0.0;
            }
            None => {
                self.player = self.entities.create(Species::Player, x, y, &self.map);
            }
        }
        spawn
    }
}

fn generate_map(config: &AppConfig) -> WorldMap {
    let size = config.world.size;
    TerrainGenerator::new(config.terrain.clone(), config.features.clone()).generate(size, size)
}
