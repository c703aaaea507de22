//! Wolf behaviour: hunger economy, threat alerts, hunting and wandering.
//!
//! Each update runs, in order: hunger and starvation, reference cleanup,
//! alert broadcast, hunt start, pack step, hunting, and finally either
//! formation keeping (members) or wandering when the wolf has not moved.

use super::movement::{advance_wander, land_step, repick_wander, terrain_factor, Cadence};
use super::{pack, SystemContext};
use crate::entity_store::EntityStore;
use rand::Rng;
use tileworld_data::{Agent, AgentId, AgentKind, PackRole, Position, Species, Tile, WorldEvent};

/// Result of the hunting step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntOutcome {
    /// No target reachable; the wolf did not move.
    Idle,
    Moved,
    Killed,
}

pub fn update_wolf<R: Rng>(
    ctx: SystemContext,
    store: &mut EntityStore,
    id: AgentId,
    rng: &mut R,
    events: &mut Vec<WorldEvent>,
) {
    let cfg = &ctx.config.behavior.wolf;

    let Some(hunger) = store.get_mut(id).and_then(|a| a.wolf_mut()).map(|w| {
        w.hunger += cfg.hunger_rate;
        w.hunger
    }) else {
        return;
    };
    if hunger >= cfg.starvation_threshold {
        starve(ctx, store, id, rng, events);
        return;
    }

    drop_stale_references(store, id);

    if hunger > cfg.alert_hunger {
        alert_prey(ctx, store, id);
    }

    if hunger > cfg.hunt_hunger {
        if let Some(wolf) = store.get_mut(id).and_then(|a| a.wolf_mut()) {
            if !wolf.is_hunting {
                wolf.is_hunting = true;
                wolf.hunt_target = None;
            }
        }
    }

    let mut moved = pack::update_pack(ctx, store, id, rng, events);

    let hunting = store
        .get(id)
        .and_then(|a| a.wolf())
        .is_some_and(|w| w.is_hunting);
    if hunting && !moved {
        match hunt(ctx, store, id, rng, events) {
            HuntOutcome::Killed => return,
            HuntOutcome::Moved => moved = true,
            HuntOutcome::Idle => {}
        }
    }
    if moved {
        return;
    }

    let is_member = store
        .get(id)
        .and_then(|a| a.wolf())
        .is_some_and(|w| w.pack.leader().is_some());
    if is_member {
        pack::keep_formation(ctx, store, id);
    } else {
        wander(ctx, store, id, rng);
    }
}

/// Removes a wolf that reached the starvation bound, cleaning up its pack
/// first so no later agent sees a dangling membership.
pub fn starve<R: Rng>(
    ctx: SystemContext,
    store: &mut EntityStore,
    id: AgentId,
    rng: &mut R,
    events: &mut Vec<WorldEvent>,
) {
    pack::release_on_death(ctx, store, id, rng, events);
    if store.remove(id) {
        tracing::debug!(wolf = %id, "Wolf starved");
        events.push(WorldEvent::Starved { id });
    }
}

/// Clears references to agents that no longer exist, or that no longer
/// hold the role the reference assumes.
fn drop_stale_references(store: &mut EntityStore, id: AgentId) {
    let Some(wolf) = store.get(id).and_then(|a| a.wolf()) else {
        return;
    };
    let is_prey = |target: Option<AgentId>| {
        target.filter(|t| store.species_of(*t).is_some_and(Species::is_prey))
    };
    let hunt_target = is_prey(wolf.hunt_target);
    let spotted_prey = is_prey(wolf.spotted_prey);
    let alerted_prey = is_prey(wolf.alerted_prey);
    let pack = match &wolf.pack {
        PackRole::Member { leader } => {
            let still_listed = store
                .get(*leader)
                .and_then(|a| a.wolf())
                .is_some_and(|l| l.pack.members().contains(&id));
            if still_listed {
                wolf.pack.clone()
            } else {
                PackRole::Free
            }
        }
        PackRole::Leader { members } => PackRole::Leader {
            members: members
                .iter()
                .copied()
                .filter(|m| store.contains(*m))
                .collect(),
        },
        PackRole::Free => PackRole::Free,
    };

    if let Some(wolf) = store.get_mut(id).and_then(|a| a.wolf_mut()) {
        wolf.hunt_target = hunt_target;
        wolf.spotted_prey = spotted_prey;
        wolf.alerted_prey = alerted_prey;
        wolf.pack = pack;
    }
}

/// Points every pig and cow within the alert radius at this wolf.
fn alert_prey(ctx: SystemContext, store: &mut EntityStore, id: AgentId) {
    let radius = ctx.config.behavior.wolf.alert_radius;
    let Some(origin) = store.position(id) else {
        return;
    };
    let limit = radius * radius;
    for prey_id in store.ids_of_species(&Species::SKITTISH) {
        let Some(agent) = store.get_mut(prey_id) else {
            continue;
        };
        if origin.distance_sq(agent.position) >= limit {
            continue;
        }
        if let Some(prey) = agent.prey_mut() {
            prey.flee_target = Some(id);
        }
    }
}

/// Target selection, kill resolution and pursuit.
pub fn hunt<R: Rng>(
    ctx: SystemContext,
    store: &mut EntityStore,
    id: AgentId,
    rng: &mut R,
    events: &mut Vec<WorldEvent>,
) -> HuntOutcome {
    let cfg = &ctx.config.behavior.wolf;
    let Some(agent) = store.get(id) else {
        return HuntOutcome::Idle;
    };
    let Some(wolf) = agent.wolf() else {
        return HuntOutcome::Idle;
    };
    let position = agent.position;
    let hunger = wolf.hunger;
    let is_leader = wolf.pack.is_leader();
    let mut target = wolf.hunt_target;
    let mut alerted = wolf.alerted_prey;

    if target.is_none() || rng.gen_bool(cfg.retarget_chance) {
        let reported = if is_leader { alerted.take() } else { None };
        let found = reported.filter(|t| store.contains(*t)).or_else(|| {
            let radius = if hunger > cfg.desperate_hunger {
                cfg.wide_search_radius
            } else {
                cfg.search_radius
            };
            store.nearest_of_species(position, &Species::PREY, radius, None)
        });
        if found.is_some() {
            target = found;
        }
    }

    if let Some(current) = target {
        let far = store
            .position(current)
            .map_or(true, |p| position.distance(p) > cfg.switch_distance);
        if far {
            let closer =
                store.nearest_of_species(position, &Species::PREY, cfg.search_radius, None);
            if closer.is_some() {
                target = closer;
            }
        }
    }

    if let Some(wolf) = store.get_mut(id).and_then(|a| a.wolf_mut()) {
        wolf.hunt_target = target;
        wolf.alerted_prey = alerted;
    }

    let Some(target) = target else {
        return HuntOutcome::Idle;
    };
    let Some((target_pos, target_species)) = store.get(target).map(|a| (a.position, a.species()))
    else {
        return HuntOutcome::Idle;
    };

    let distance = position.distance(target_pos);
    if distance <= cfg.kill_distance {
        kill(store, id, target, target_species, events);
        return HuntOutcome::Killed;
    }

    let moved = chase(ctx, store, id, target_pos, target_species, distance);
    if let Some(prey) = store.get_mut(target).and_then(|a| a.prey_mut()) {
        prey.flee_target = Some(id);
    }
    if moved {
        HuntOutcome::Moved
    } else {
        HuntOutcome::Idle
    }
}

/// Removes the prey and feeds the whole pack.
fn kill(
    store: &mut EntityStore,
    id: AgentId,
    prey: AgentId,
    species: Species,
    events: &mut Vec<WorldEvent>,
) {
    store.remove(prey);
    tracing::debug!(wolf = %id, prey = %prey, %species, "Prey killed");
    events.push(WorldEvent::PreyKilled {
        predator: id,
        prey,
        species,
    });

    for wolf_id in pack::pack_of(store, id) {
        if let Some(wolf) = store.get_mut(wolf_id).and_then(|a| a.wolf_mut()) {
            wolf.hunger = 0.0;
            wolf.clear_hunt();
        }
    }
}

/// One step toward the target, with water avoidance. Returns whether the
/// wolf moved.
fn chase(
    ctx: SystemContext,
    store: &mut EntityStore,
    id: AgentId,
    target_pos: Position,
    target_species: Species,
    distance: f64,
) -> bool {
    let cfg = &ctx.config.behavior.wolf;
    let map = ctx.map;
    let Some(agent) = store.get_mut(id) else {
        return false;
    };
    let Some(hunger) = agent.wolf().map(|w| w.hunger) else {
        return false;
    };

    let urgency = f64::from(hunger / cfg.starvation_threshold);
    let speed = (cfg.chase_speed + cfg.chase_hunger_bonus * urgency)
        * terrain_factor(map, agent.position);
    let heading = agent.position.heading_to(target_pos);
    let dest = agent.position.step(heading, speed);
    if !map.in_bounds(dest) {
        return false;
    }

    if map.tile_at(dest) == Some(Tile::Water) {
        let near_shore = map
            .nearest_land(dest, cfg.land_margin.ceil() as i32)
            .is_some_and(|land| land.distance(dest) <= cfg.land_margin);
        let allowed = target_species.is_aquatic()
            || near_shore
            || (hunger > cfg.water_hunger && distance < cfg.water_target_distance);
        if !allowed {
            return match map.nearest_land(agent.position, cfg.land_search_radius) {
                Some(land) => {
                    let to_land = agent.position.heading_to(land);
                    let step = agent.position.step(to_land, speed);
                    if !map.in_bounds(step) {
                        return false;
                    }
                    agent.position = step;
                    agent.heading = to_land;
                    true
                }
                None => {
                    if let Some(wolf) = agent.wolf_mut() {
                        wolf.hunt_target = None;
                    }
                    false
                }
            };
        }
    }

    agent.position = dest;
    agent.heading = heading;
    true
}

/// Free roaming. A wolf standing in water heads for the nearest shore.
fn wander<R: Rng>(ctx: SystemContext, store: &mut EntityStore, id: AgentId, rng: &mut R) {
    let cfg = &ctx.config.behavior.wolf;
    let map = ctx.map;
    let Some(agent) = store.get_mut(id) else {
        return;
    };
    let speed = cfg.wander_speed * terrain_factor(map, agent.position);

    if map.is_water(agent.position) {
        if let Some(land) = map.nearest_land(agent.position, cfg.land_search_radius) {
            let heading = agent.position.heading_to(land);
            let dest = agent.position.step(heading, speed);
            if map.in_bounds(dest) {
                agent.position = dest;
                agent.heading = heading;
            }
            return;
        }
    }

    let cadence = Cadence {
        min: cfg.wander_min,
        max: cfg.wander_max,
        move_chance: 1.0,
    };
    let Agent {
        position,
        heading,
        kind: AgentKind::Wolf(wolf),
        ..
    } = agent
    else {
        return;
    };
    if advance_wander(&mut wolf.wander, heading, cadence, rng) {
        match land_step(map, *position, *heading, speed) {
            Some(dest) => *position = dest,
            None => repick_wander(&mut wolf.wander, heading, cadence, rng),
        }
    }
}
