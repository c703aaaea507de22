use super::SystemContext;
use crate::entity_store::EntityStore;
use crate::terrain::{TerrainLogic, WorldMap};
use rand::Rng;
use std::f64::consts::TAU;
use tileworld_data::{AgentId, AgentKind, Position, WanderState};

/// Timer range and move probability of one species' random walk.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    pub min: u32,
    pub max: u32,
    pub move_chance: f64,
}

/// Picks a new heading, cadence length and walk decision.
pub fn repick_wander<R: Rng>(
    state: &mut WanderState,
    heading: &mut f64,
    cadence: Cadence,
    rng: &mut R,
) {
    *heading = rng.gen_range(0.0..TAU);
    state.timer = rng.gen_range(cadence.min..=cadence.max.max(cadence.min));
    state.moving = rng.gen_bool(cadence.move_chance.clamp(0.0, 1.0));
}

/// Counts the wander timer down, re-picking on expiry. Returns whether the
/// agent walks this tick.
pub fn advance_wander<R: Rng>(
    state: &mut WanderState,
    heading: &mut f64,
    cadence: Cadence,
    rng: &mut R,
) -> bool {
    if state.timer == 0 {
        repick_wander(state, heading, cadence, rng);
    }
    state.timer = state.timer.saturating_sub(1);
    state.moving
}

/// Speed multiplier of the tile under `pos`; zero off the map.
pub fn terrain_factor(map: &WorldMap, pos: Position) -> f64 {
    map.tile_at(pos).map_or(0.0, |t| t.movement_modifier())
}

/// Land destination one step along `heading`, if it exists.
pub fn land_step(map: &WorldMap, from: Position, heading: f64, distance: f64) -> Option<Position> {
    let dest = from.step(heading, distance);
    map.is_land(dest).then_some(dest)
}

/// Applies one frame of player input.
///
/// `direction` is normalised; a zero or non-finite vector is rejected.
/// Returns `false` without touching state when `id` is not the player or the
/// destination leaves the map.
pub fn move_player(
    ctx: SystemContext,
    store: &mut EntityStore,
    id: AgentId,
    direction: (f64, f64),
    sprinting: bool,
) -> bool {
    let cfg = &ctx.config.behavior.player;
    let Some(agent) = store.get_mut(id) else {
        return false;
    };
    let AgentKind::Player(player) = &mut agent.kind else {
        return false;
    };

    let (dx, dy) = direction;
    let len = dx.hypot(dy);
    if !len.is_finite() || len <= 0.0 {
        return false;
    }

    let mut speed = cfg.speed * terrain_factor(ctx.map, agent.position);
    if sprinting {
        speed *= cfg.sprint_multiplier;
    }
    let dest = Position::new(
        agent.position.x + dx / len * speed,
        agent.position.y + dy / len * speed,
    );
    if !ctx.map.in_bounds(dest) {
        return false;
    }

    agent.position = dest;
    agent.heading = dy.atan2(dx);
    player.sprinting = sprinting;
    true
}
