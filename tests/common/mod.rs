pub mod macros;

use tileworld_lib::model::config::AppConfig;
use tileworld_lib::model::state::{AgentId, PackRole, Species};
use tileworld_lib::model::terrain::{Tile, WorldMap};
use tileworld_lib::model::world::World;

type WorldMod = Box<dyn FnOnce(&mut World)>;

/// Scripted world: uniform terrain, spawning disabled, explicit agents.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    size: u32,
    terrain: Tile,
    tiles: Vec<(u32, u32, Tile)>,
    mods: Vec<WorldMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.size = 64;
        config.spawning.disable_all();
        Self {
            config,
            size: 64,
            terrain: Tile::Grass,
            tiles: Vec::new(),
            mods: Vec::new(),
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self.config.world.size = size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.terrain.seed = seed;
        self
    }

    pub fn with_terrain(mut self, tile: Tile) -> Self {
        self.terrain = tile;
        self
    }

    pub fn with_tile(mut self, x: u32, y: u32, tile: Tile) -> Self {
        self.tiles.push((x, y, tile));
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_setup<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut World) + 'static,
    {
        self.mods.push(Box::new(setup));
        self
    }

    pub fn build(self) -> World {
        let side = self.size as usize;
        let mut tiles = vec![self.terrain; side * side];
        for (x, y, tile) in self.tiles {
            tiles[y as usize * side + x as usize] = tile;
        }
        let map = WorldMap::from_tiles(self.size, self.size, tiles);
        let mut world = World::with_map(self.config, map).expect("valid config");
        for setup in self.mods {
            setup(&mut world);
        }
        world
    }
}

#[allow(dead_code)]
pub fn set_hunger(world: &mut World, id: AgentId, hunger: f32) {
    world
        .entities_mut()
        .get_mut(id)
        .and_then(|a| a.wolf_mut())
        .expect("wolf")
        .hunger = hunger;
}

#[allow(dead_code)]
pub fn hunger(world: &World, id: AgentId) -> f32 {
    world
        .entities()
        .get(id)
        .and_then(|a| a.wolf())
        .expect("wolf")
        .hunger
}

#[allow(dead_code)]
pub fn pack_role(world: &World, id: AgentId) -> PackRole {
    world
        .entities()
        .get(id)
        .and_then(|a| a.wolf())
        .expect("wolf")
        .pack
        .clone()
}

/// Checks both sides of every pack link plus the size and leader caps.
#[allow(dead_code)]
pub fn check_pack_invariants(world: &World) {
    let pack = &world.config().behavior.pack;
    let store = world.entities();
    let mut leaders = 0;
    for agent in store.iter() {
        let Some(wolf) = agent.wolf() else {
            continue;
        };
        match &wolf.pack {
            PackRole::Leader { members } => {
                leaders += 1;
                assert!(members.len() <= pack.max_pack_size, "pack of {} too large", agent.id);
                for member in members {
                    let role = store.get(*member).and_then(|a| a.wolf()).map(|w| w.pack.clone());
                    assert_eq!(
                        role,
                        Some(PackRole::Member { leader: agent.id }),
                        "member {member} of {} disagrees",
                        agent.id
                    );
                }
            }
            PackRole::Member { leader } => {
                let listed = store
                    .get(*leader)
                    .and_then(|a| a.wolf())
                    .is_some_and(|l| l.pack.members().contains(&agent.id));
                assert!(listed, "{} names {leader} but is not listed", agent.id);
            }
            PackRole::Free => {}
        }
        if let Some(target) = wolf.hunt_target {
            assert_ne!(store.species_of(target), Some(Species::Wolf));
        }
    }
    assert!(leaders <= pack.max_pack_leaders, "{leaders} leaders");
}
