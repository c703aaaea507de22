//! Central agent storage.
//!
//! Agents reference each other only by [`AgentId`]; every lookup goes through
//! the store and may come back empty. Iteration is in ascending id order,
//! which makes nearest-agent tie-breaking and update order deterministic.

use crate::terrain::WorldMap;
use std::collections::BTreeMap;
use tileworld_data::{Agent, AgentId, AgentKind, Position, Species};

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    agents: BTreeMap<AgentId, Agent>,
    next_id: u64,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a fresh agent of `species` at `(x, y)`.
    ///
    /// Returns `None` when the position is off the map. Wolves start
    /// without a pack preference; see [`EntityStore::create_with`].
    pub fn create(&mut self, species: Species, x: f64, y: f64, map: &WorldMap) -> Option<AgentId> {
        self.create_with(AgentKind::new(species, false), x, y, map)
    }

    pub fn create_with(
        &mut self,
        kind: AgentKind,
        x: f64,
        y: f64,
        map: &WorldMap,
    ) -> Option<AgentId> {
        let position = Position::new(x, y);
        if !map.in_bounds(position) {
            return None;
        }
        self.next_id += 1;
        let id = AgentId(self.next_id);
        self.agents.insert(
            id,
            Agent {
                id,
                position,
                heading: 0.0,
                kind,
            },
        );
        Some(id)
    }

    /// Removes an agent. Returns whether it existed.
    ///
    /// References other agents hold to `id` are left in place and go stale;
    /// pack bookkeeping is the caller's job.
    pub fn remove(&mut self, id: AgentId) -> bool {
        self.agents.remove(&id).is_some()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    pub fn position(&self, id: AgentId) -> Option<Position> {
        self.get(id).map(|a| a.position)
    }

    pub fn species_of(&self, id: AgentId) -> Option<Species> {
        self.get(id).map(Agent::species)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn count_of_species(&self, species: Species) -> usize {
        self.iter().filter(|a| a.species() == species).count()
    }

    /// Ids of one species in ascending order, taken as a snapshot so the
    /// caller may mutate the store while walking it.
    pub fn ids_of_species(&self, species: &[Species]) -> Vec<AgentId> {
        self.iter()
            .filter(|a| species.contains(&a.species()))
            .map(|a| a.id)
            .collect()
    }

    /// Closest agent of one of `species` strictly within `max_radius`.
    ///
    /// Ties go to the lowest id. `exclude` is skipped, so an agent can search
    /// around its own position without finding itself.
    pub fn nearest_of_species(
        &self,
        origin: Position,
        species: &[Species],
        max_radius: f64,
        exclude: Option<AgentId>,
    ) -> Option<AgentId> {
        self.nearest_matching(origin, max_radius, |a| {
            Some(a.id) != exclude && species.contains(&a.species())
        })
    }

    /// Closest agent satisfying `filter` strictly within `max_radius`.
    pub fn nearest_matching<F>(&self, origin: Position, max_radius: f64, filter: F) -> Option<AgentId>
    where
        F: Fn(&Agent) -> bool,
    {
        let limit = max_radius * max_radius;
        let mut best: Option<(f64, AgentId)> = None;
        for agent in self.iter() {
            if !filter(agent) {
                continue;
            }
            let d = origin.distance_sq(agent.position);
            if d >= limit {
                continue;
            }
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, agent.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Agents whose position floors to tile `(x, y)`.
    pub fn entities_at_tile(&self, x: i64, y: i64) -> Vec<AgentId> {
        self.iter()
            .filter(|a| a.position.x.floor() as i64 == x && a.position.y.floor() as i64 == y)
            .map(|a| a.id)
            .collect()
    }

    /// Drops every agent except `keep`.
    pub fn retain_only(&mut self, keep: Option<AgentId>) -> usize {
        let before = self.agents.len();
        self.agents.retain(|id, _| Some(*id) == keep);
        before - self.agents.len()
    }
}
