//! Read-only views of the world for renderers and the CLI.

use crate::entity_store::EntityStore;
use serde::{Deserialize, Serialize};
use tileworld_data::{Agent, AgentId, Position, Species};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub species: Species,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub hunger: Option<f32>,
    pub health: Option<f32>,
    pub is_hunting: bool,
    pub is_pack_leader: bool,
    pub pack_leader: Option<AgentId>,
    pub pack_size: usize,
    pub fleeing: bool,
}

impl AgentSnapshot {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

impl From<&Agent> for AgentSnapshot {
    fn from(agent: &Agent) -> Self {
        let wolf = agent.wolf();
        Self {
            id: agent.id,
            species: agent.species(),
            x: agent.position.x,
            y: agent.position.y,
            heading: agent.heading,
            hunger: wolf.map(|w| w.hunger),
            health: agent.health(),
            is_hunting: wolf.is_some_and(|w| w.is_hunting),
            is_pack_leader: wolf.is_some_and(|w| w.pack.is_leader()),
            pack_leader: wolf.and_then(|w| w.pack.leader()),
            pack_size: wolf.map_or(0, |w| w.pack.members().len()),
            fleeing: agent.prey().is_some_and(|p| p.flee_target.is_some()),
        }
    }
}

/// Head count per species.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PopulationStats {
    pub players: usize,
    pub fish: usize,
    pub pigs: usize,
    pub cows: usize,
    pub wolves: usize,
    pub pack_leaders: usize,
}

impl PopulationStats {
    pub fn collect(store: &EntityStore) -> Self {
        let mut stats = Self::default();
        for agent in store.iter() {
            match agent.species() {
                Species::Player => stats.players += 1,
                Species::Fish => stats.fish += 1,
                Species::Pig => stats.pigs += 1,
                Species::Cow => stats.cows += 1,
                Species::Wolf => stats.wolves += 1,
            }
            if agent.wolf().is_some_and(|w| w.pack.is_leader()) {
                stats.pack_leaders += 1;
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.players + self.fish + self.pigs + self.cows + self.wolves
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub size: u32,
    pub seed: u64,
    pub paused: bool,
    pub time_scale: u32,
    pub stats: PopulationStats,
    pub agents: Vec<AgentSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::WorldMap;
    use tileworld_data::Tile;

    #[test]
    fn test_population_stats() {
        let map = WorldMap::filled(16, 16, Tile::Grass);
        let mut store = EntityStore::new();
        store.create(Species::Player, 1.0, 1.0, &map);
        store.create(Species::Pig, 2.0, 1.0, &map);
        store.create(Species::Wolf, 3.0, 1.0, &map);
        store.create(Species::Wolf, 4.0, 1.0, &map);

        let stats = PopulationStats::collect(&store);
        assert_eq!(stats.wolves, 2);
        assert_eq!(stats.pigs, 1);
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.pack_leaders, 0);
    }

    #[test]
    fn test_agent_snapshot_fields() {
        let map = WorldMap::filled(16, 16, Tile::Grass);
        let mut store = EntityStore::new();
        let id = store.create(Species::Wolf, 3.5, 4.5, &map).expect("spawn");
        let snap = AgentSnapshot::from(store.get(id).expect("wolf"));
        assert_eq!(snap.species, Species::Wolf);
        assert_eq!(snap.hunger, Some(0.0));
        assert_eq!(snap.health, None);
        assert_eq!(snap.position(), Position::new(3.5, 4.5));

        let json = serde_json::to_string(&snap).expect("serialize");
        assert!(json.contains("\"species\":\"Wolf\""));
    }
}
