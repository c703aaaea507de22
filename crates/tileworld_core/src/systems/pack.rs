//! Wolf pack lifecycle: joining, founding, recruitment, scouting, formation
//! and dissolution.
//!
//! Membership is stored on both sides: a member's [`PackRole::Member`] names
//! its leader, and the leader's [`PackRole::Leader`] lists the member. Every
//! transition here updates both sides within the same call.

use super::movement::terrain_factor;
use super::SystemContext;
use crate::entity_store::EntityStore;
use rand::Rng;
use std::f64::consts::PI;
use tileworld_data::{Agent, AgentId, PackRole, Position, Species, WorldEvent};

fn is_leader_with_room(agent: &Agent, max_members: usize) -> bool {
    agent
        .wolf()
        .is_some_and(|w| w.pack.is_leader() && w.pack.members().len() < max_members)
}

fn is_free_recruit(agent: &Agent) -> bool {
    agent.wolf().is_some_and(|w| w.pack.is_free() && w.wants_pack)
}

pub fn leader_count(store: &EntityStore) -> usize {
    store
        .iter()
        .filter(|a| a.wolf().is_some_and(|w| w.pack.is_leader()))
        .count()
}

/// Every wolf sharing a pack with `id`, `id` included.
pub fn pack_of(store: &EntityStore, id: AgentId) -> Vec<AgentId> {
    let Some(wolf) = store.get(id).and_then(Agent::wolf) else {
        return Vec::new();
    };
    let leader = match &wolf.pack {
        PackRole::Free => return vec![id],
        PackRole::Leader { .. } => id,
        PackRole::Member { leader } => *leader,
    };
    let mut pack = vec![leader];
    if let Some(leader_wolf) = store.get(leader).and_then(Agent::wolf) {
        pack.extend(leader_wolf.pack.members().iter().copied());
    }
    if !pack.contains(&id) {
        pack.push(id);
    }
    pack.retain(|m| store.contains(*m));
    pack
}

/// Pack step of a wolf's update. Returns whether the wolf moved.
pub fn update_pack<R: Rng>(
    ctx: SystemContext,
    store: &mut EntityStore,
    id: AgentId,
    rng: &mut R,
    events: &mut Vec<WorldEvent>,
) -> bool {
    let Some((role, wants_pack)) = store
        .get(id)
        .and_then(Agent::wolf)
        .map(|w| (w.pack.clone(), w.wants_pack))
    else {
        return false;
    };
    match role {
        PackRole::Free if wants_pack => {
            join_or_found(ctx, store, id, rng, events);
            false
        }
        PackRole::Free => false,
        PackRole::Leader { .. } => recruit(ctx, store, id, events),
        PackRole::Member { leader } => {
            scout(ctx, store, id, leader);
            inherit_hunt(store, id, leader);
            false
        }
    }
}

fn join_or_found<R: Rng>(
    ctx: SystemContext,
    store: &mut EntityStore,
    id: AgentId,
    rng: &mut R,
    events: &mut Vec<WorldEvent>,
) {
    let cfg = &ctx.config.behavior.pack;
    let Some(origin) = store.position(id) else {
        return;
    };

    let leader = store.nearest_matching(origin, cfg.join_range, |a| {
        a.id != id && is_leader_with_room(a, cfg.max_pack_size)
    });
    if let Some(leader) = leader {
        enlist(store, leader, id);
        tracing::debug!(%leader, member = %id, "Wolf joined pack");
        events.push(WorldEvent::PackJoined { leader, member: id });
        return;
    }

    let leaders = leader_count(store);
    if leaders >= cfg.max_pack_leaders {
        return;
    }
    let chance = cfg.leader_chance * (1.0 - leaders as f64 / cfg.max_pack_leaders as f64);
    if rng.gen_bool(chance.clamp(0.0, 1.0)) {
        if let Some(wolf) = store.get_mut(id).and_then(Agent::wolf_mut) {
            wolf.pack = PackRole::Leader {
                members: Vec::new(),
            };
            wolf.wants_pack = false;
        }
        tracing::debug!(leader = %id, "Pack founded");
        events.push(WorldEvent::PackFounded { leader: id });
    }
}

/// Links `member` under `leader` on both sides.
fn enlist(store: &mut EntityStore, leader: AgentId, member: AgentId) {
    if let Some(w) = store.get_mut(leader).and_then(Agent::wolf_mut) {
        if let PackRole::Leader { members } = &mut w.pack {
            members.push(member);
        }
    }
    if let Some(w) = store.get_mut(member).and_then(Agent::wolf_mut) {
        w.pack = PackRole::Member { leader };
        w.wants_pack = false;
    }
}

/// A sated leader with room walks to the nearest free wolf that wants a
/// pack, and takes it on once close enough. At most one recruit per tick.
fn recruit(
    ctx: SystemContext,
    store: &mut EntityStore,
    id: AgentId,
    events: &mut Vec<WorldEvent>,
) -> bool {
    let cfg = &ctx.config.behavior.pack;
    let Some(agent) = store.get(id) else {
        return false;
    };
    let Some(wolf) = agent.wolf() else {
        return false;
    };
    if wolf.hunger >= cfg.recruit_hunger || wolf.pack.members().len() >= cfg.max_pack_size {
        return false;
    }
    let origin = agent.position;

    let Some(candidate) = store.nearest_matching(origin, cfg.recruit_radius, |a| {
        a.id != id && is_free_recruit(a)
    }) else {
        return false;
    };
    let Some(target) = store.position(candidate) else {
        return false;
    };

    let distance = origin.distance(target);
    if distance <= cfg.recruit_distance {
        enlist(store, id, candidate);
        tracing::debug!(leader = %id, member = %candidate, "Wolf recruited");
        events.push(WorldEvent::Recruited {
            leader: id,
            member: candidate,
        });
        return false;
    }

    let speed = ctx.config.behavior.wolf.wander_speed * terrain_factor(ctx.map, origin);
    step_toward(ctx, store, id, target, speed)
}

/// A member that is not hunting looks for prey and reports it to its
/// leader when it beats whatever the leader is already chasing.
fn scout(ctx: SystemContext, store: &mut EntityStore, id: AgentId, leader: AgentId) {
    let cfg = &ctx.config.behavior.pack;
    let Some(agent) = store.get(id) else {
        return;
    };
    if agent.wolf().map_or(true, |w| w.is_hunting) {
        return;
    }
    let spotted =
        store.nearest_of_species(agent.position, &Species::PREY, cfg.spotting_radius, None);
    if let Some(wolf) = store.get_mut(id).and_then(Agent::wolf_mut) {
        wolf.spotted_prey = spotted;
    }
    let Some(spotted) = spotted else {
        return;
    };

    let Some((leader_pos, leader_target)) = store
        .get(leader)
        .and_then(|a| a.wolf().map(|w| (a.position, w.hunt_target)))
    else {
        return;
    };
    let Some(spotted_pos) = store.position(spotted) else {
        return;
    };
    let current = leader_target.and_then(|t| store.position(t));
    let better = current.map_or(true, |cur| {
        leader_pos.distance(spotted_pos) < leader_pos.distance(cur)
    });
    if better {
        if let Some(w) = store.get_mut(leader).and_then(Agent::wolf_mut) {
            w.alerted_prey = Some(spotted);
        }
    }
}

/// Members follow their leader into the hunt regardless of their own hunger.
fn inherit_hunt(store: &mut EntityStore, id: AgentId, leader: AgentId) {
    let Some(target) = store
        .get(leader)
        .and_then(Agent::wolf)
        .map(|w| w.hunt_target.filter(|t| store.contains(*t)))
    else {
        return;
    };
    if let Some(wolf) = store.get_mut(id).and_then(Agent::wolf_mut) {
        wolf.hunt_target = target;
        wolf.is_hunting = true;
    }
}

/// Slot of member number `index` in the V trailing behind the leader.
pub fn formation_slot(
    leader: Position,
    leader_heading: f64,
    index: usize,
    spacing: f64,
    angle: f64,
) -> Position {
    let side = if index % 2 == 0 { 1.0 } else { -1.0 };
    let rank = (index / 2 + 1) as f64;
    leader.step(leader_heading + PI + side * angle, spacing * rank)
}

/// Walks a member that strayed from its leader back toward its slot, or
/// aligns it with the leader once it is close.
pub fn keep_formation(ctx: SystemContext, store: &mut EntityStore, id: AgentId) {
    let cfg = &ctx.config.behavior.pack;
    let Some(leader) = store.get(id).and_then(Agent::wolf).and_then(|w| w.pack.leader()) else {
        return;
    };
    let Some((leader_pos, leader_heading, index)) = store.get(leader).and_then(|a| {
        let index = a.wolf()?.pack.members().iter().position(|m| *m == id)?;
        Some((a.position, a.heading, index))
    }) else {
        return;
    };
    let Some(position) = store.position(id) else {
        return;
    };

    let slot = formation_slot(
        leader_pos,
        leader_heading,
        index,
        cfg.formation_spacing,
        cfg.formation_angle,
    );
    if position.distance(leader_pos) > cfg.formation_threshold {
        let speed = ctx.config.behavior.wolf.chase_speed * terrain_factor(ctx.map, position);
        step_toward(ctx, store, id, slot, speed);
    } else if let Some(agent) = store.get_mut(id) {
        agent.heading = leader_heading;
    }
}

fn step_toward(
    ctx: SystemContext,
    store: &mut EntityStore,
    id: AgentId,
    target: Position,
    speed: f64,
) -> bool {
    let Some(agent) = store.get_mut(id) else {
        return false;
    };
    let heading = agent.position.heading_to(target);
    let dest = agent.position.step(heading, speed);
    if !ctx.map.is_land(dest) {
        return false;
    }
    agent.position = dest;
    agent.heading = heading;
    true
}

/// Pack cleanup for a wolf about to be removed.
///
/// A dying leader frees every member, each re-rolling whether it wants a
/// pack. A dying member is spliced out of its leader's list.
pub fn release_on_death<R: Rng>(
    ctx: SystemContext,
    store: &mut EntityStore,
    id: AgentId,
    rng: &mut R,
    events: &mut Vec<WorldEvent>,
) {
    let Some(role) = store.get(id).and_then(Agent::wolf).map(|w| w.pack.clone()) else {
        return;
    };
    match role {
        PackRole::Free => {}
        PackRole::Member { leader } => {
            if let Some(w) = store.get_mut(leader).and_then(Agent::wolf_mut) {
                if let PackRole::Leader { members } = &mut w.pack {
                    members.retain(|m| *m != id);
                }
            }
        }
        PackRole::Leader { members } => {
            let chance = ctx.config.spawning.wants_pack_chance;
            let mut released = 0;
            for member in members {
                if let Some(w) = store.get_mut(member).and_then(Agent::wolf_mut) {
                    w.pack = PackRole::Free;
                    w.wants_pack = rng.gen_bool(chance);
                    released += 1;
                }
            }
            tracing::debug!(leader = %id, released, "Pack dissolved");
            events.push(WorldEvent::PackDissolved {
                leader: id,
                released,
            });
        }
    }
    if let Some(w) = store.get_mut(id).and_then(Agent::wolf_mut) {
        w.pack = PackRole::Free;
    }
}
