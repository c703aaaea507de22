//! Pig and cow behaviour: flee from an alerting wolf, otherwise graze.

use super::movement::{advance_wander, land_step, repick_wander, terrain_factor, Cadence};
use super::SystemContext;
use crate::entity_store::EntityStore;
use rand::Rng;
use tileworld_data::{Agent, AgentId, AgentKind, Position};

/// Alternative headings, in degrees off the direct flee heading, tried in
/// order when the direct path is blocked.
pub const FLEE_LADDER: [f64; 9] = [0.0, 30.0, -30.0, 45.0, -45.0, 60.0, -60.0, 90.0, -90.0];

/// Snapshot of the threat a herbivore is running from.
struct Threat {
    position: Position,
    hunting: bool,
    hunger: f32,
}

pub fn update_herbivore<R: Rng>(
    ctx: SystemContext,
    store: &mut EntityStore,
    id: AgentId,
    rng: &mut R,
) {
    let Some(agent) = store.get(id) else {
        return;
    };
    let Some(flee_target) = agent.prey().map(|p| p.flee_target) else {
        return;
    };
    let position = agent.position;

    if let Some(threat_id) = flee_target {
        let threat = store.get(threat_id).map(|t| Threat {
            position: t.position,
            hunting: t.wolf().is_some_and(|w| w.is_hunting),
            hunger: t.wolf().map_or(0.0, |w| w.hunger),
        });
        if let Some(threat) = threat {
            let cfg = &ctx.config.behavior.herbivore;
            let distance = position.distance(threat.position);
            let calm = distance > cfg.calm_distance
                && !threat.hunting
                && threat.hunger < cfg.calm_hunger;
            if !calm {
                flee(ctx, store, id, threat.position);
                return;
            }
        }
        if let Some(prey) = store.get_mut(id).and_then(|a| a.prey_mut()) {
            prey.flee_target = None;
        }
    }

    wander(ctx, store, id, rng);
}

fn flee(ctx: SystemContext, store: &mut EntityStore, id: AgentId, threat: Position) {
    let cfg = &ctx.config.behavior.herbivore;
    let Some(agent) = store.get_mut(id) else {
        return;
    };
    let distance = agent.position.distance(threat);
    let bonus = (cfg.flee_bonus_scale / distance).min(cfg.flee_bonus_cap);
    let speed = (cfg.flee_speed + bonus) * terrain_factor(ctx.map, agent.position);
    let away = threat.heading_to(agent.position);

    agent.heading = away;
    for offset in FLEE_LADDER {
        let heading = away + offset.to_radians();
        if let Some(dest) = land_step(ctx.map, agent.position, heading, speed) {
            agent.position = dest;
            agent.heading = heading;
            return;
        }
    }
}

fn wander<R: Rng>(ctx: SystemContext, store: &mut EntityStore, id: AgentId, rng: &mut R) {
    let cfg = &ctx.config.behavior.herbivore;
    let Some(Agent {
        position,
        heading,
        kind: AgentKind::Pig(prey) | AgentKind::Cow(prey),
        ..
    }) = store.get_mut(id)
    else {
        return;
    };
    let cadence = Cadence {
        min: cfg.wander_min,
        max: cfg.wander_max,
        move_chance: cfg.move_chance,
    };

    if !advance_wander(&mut prey.wander, heading, cadence, rng) {
        return;
    }
    let speed = cfg.wander_speed * terrain_factor(ctx.map, *position);
    match land_step(ctx.map, *position, *heading, speed) {
        Some(dest) => *position = dest,
        None => repick_wander(&mut prey.wander, heading, cadence, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::terrain::WorldMap;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tileworld_data::{Species, Tile};

    fn setup(map: &WorldMap) -> (EntityStore, AgentId, AgentId) {
        let mut store = EntityStore::new();
        let pig = store.create(Species::Pig, 10.5, 10.5, map).expect("spawn");
        let wolf = store.create(Species::Wolf, 8.5, 10.5, map).expect("spawn");
        store
            .get_mut(pig)
            .and_then(|a| a.prey_mut())
            .expect("pig")
            .flee_target = Some(wolf);
        (store, pig, wolf)
    }

    #[test]
    fn test_flees_directly_away() {
        let map = WorldMap::filled(32, 32, Tile::Grass);
        let config = AppConfig::default();
        let ctx = SystemContext::new(&map, &config);
        let (mut store, pig, _) = setup(&map);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        update_herbivore(ctx, &mut store, pig, &mut rng);
        let pos = store.position(pig).expect("pig");
        let cfg = &config.behavior.herbivore;
        let expected = cfg.flee_speed + (cfg.flee_bonus_scale / 2.0).min(cfg.flee_bonus_cap);
        assert!((pos.x - (10.5 + expected)).abs() < 1e-9);
        assert!((pos.y - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_blocked_flee_takes_ladder() {
        // Water directly east of the pig, land everywhere else.
        let mut tiles = vec![Tile::Grass; 32 * 32];
        for y in 0..32 {
            tiles[y * 32 + 11] = Tile::Water;
        }
        let map = WorldMap::from_tiles(32, 32, tiles);
        let config = AppConfig::default();
        let ctx = SystemContext::new(&map, &config);
        let (mut store, pig, _) = setup(&map);
        store.get_mut(pig).expect("pig").position = Position::new(10.95, 10.5);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        update_herbivore(ctx, &mut store, pig, &mut rng);
        let agent = store.get(pig).expect("pig");
        assert!(map.is_land(agent.position));
        assert!(agent.position.y > 10.5);
        assert!((agent.heading - 90f64.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn test_calms_down_when_threat_is_gone() {
        let map = WorldMap::filled(32, 32, Tile::Grass);
        let config = AppConfig::default();
        let ctx = SystemContext::new(&map, &config);
        let (mut store, pig, wolf) = setup(&map);
        store.remove(wolf);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        update_herbivore(ctx, &mut store, pig, &mut rng);
        let prey = store.get(pig).and_then(|a| a.prey()).expect("pig");
        assert_eq!(prey.flee_target, None);
    }

    #[test]
    fn test_keeps_fleeing_from_hungry_wolf_far_away() {
        let map = WorldMap::filled(64, 64, Tile::Grass);
        let config = AppConfig::default();
        let ctx = SystemContext::new(&map, &config);
        let (mut store, pig, wolf) = setup(&map);
        store.get_mut(wolf).expect("wolf").position = Position::new(40.5, 10.5);
        store.get_mut(wolf).and_then(|a| a.wolf_mut()).expect("wolf").hunger = 65.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        update_herbivore(ctx, &mut store, pig, &mut rng);
        let prey = store.get(pig).and_then(|a| a.prey()).expect("pig");
        assert_eq!(prey.flee_target, Some(wolf));

        store.get_mut(wolf).and_then(|a| a.wolf_mut()).expect("wolf").hunger = 10.0;
        update_herbivore(ctx, &mut store, pig, &mut rng);
        let prey = store.get(pig).and_then(|a| a.prey()).expect("pig");
        assert_eq!(prey.flee_target, None);
    }
}
