use super::movement::{advance_wander, repick_wander, Cadence};
use super::SystemContext;
use crate::entity_store::EntityStore;
use rand::Rng;
use tileworld_data::{Agent, AgentId, AgentKind, Tile};

/// Random walk confined to water.
pub fn update_fish<R: Rng>(ctx: SystemContext, store: &mut EntityStore, id: AgentId, rng: &mut R) {
    let cfg = &ctx.config.behavior.fish;
    let Some(Agent {
        position,
        heading,
        kind: AgentKind::Fish(fish),
        ..
    }) = store.get_mut(id)
    else {
        return;
    };
    let cadence = Cadence {
        min: cfg.wander_min,
        max: cfg.wander_max,
        move_chance: 1.0,
    };

    if !advance_wander(&mut fish.wander, heading, cadence, rng) {
        return;
    }
    let dest = position.step(*heading, cfg.speed);
    if ctx.map.tile_at(dest) == Some(Tile::Water) {
        *position = dest;
    } else {
        repick_wander(&mut fish.wander, heading, cadence, rng);
    }
}
