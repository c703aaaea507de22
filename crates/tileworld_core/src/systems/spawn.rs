use super::SystemContext;
use crate::entity_store::EntityStore;
use rand::Rng;
use tileworld_data::{AgentKind, Position, Species, Tile, WorldEvent};

/// Whether `species` may be placed on `tile`.
pub fn habitat_allows(species: Species, tile: Tile) -> bool {
    if species.is_aquatic() {
        tile == Tile::Water
    } else {
        tile.is_land()
    }
}

/// One capped, probability-gated spawn attempt per wild species.
pub fn spawn_phase<R: Rng>(
    ctx: SystemContext,
    store: &mut EntityStore,
    rng: &mut R,
    events: &mut Vec<WorldEvent>,
) {
    let spawning = &ctx.config.spawning;
    for species in Species::WILD {
        let Some(rule) = spawning.for_species(species) else {
            continue;
        };
        if store.count_of_species(species) >= rule.cap || !rng.gen_bool(rule.rate) {
            continue;
        }
        let Some(pos) = find_spawn_position(ctx, species, rng) else {
            tracing::trace!(%species, "Spawn attempts exhausted");
            continue;
        };
        let wants_pack = species == Species::Wolf && rng.gen_bool(spawning.wants_pack_chance);
        let kind = AgentKind::new(species, wants_pack);
        if let Some(id) = store.create_with(kind, pos.x, pos.y, ctx.map) {
            if let Some(agent) = store.get_mut(id) {
                agent.heading = rng.gen_range(0.0..std::f64::consts::TAU);
            }
            events.push(WorldEvent::AgentSpawned { id, species });
        }
    }
}

/// Random tile center matching the species' habitat.
///
/// Tries `max_attempts` uniform tiles, then the map center for land
/// animals. `None` means the spawn is skipped this tick.
pub fn find_spawn_position<R: Rng>(
    ctx: SystemContext,
    species: Species,
    rng: &mut R,
) -> Option<Position> {
    let map = ctx.map;
    if map.width() == 0 || map.height() == 0 {
        return None;
    }
    for _ in 0..ctx.config.spawning.max_attempts {
        let x = rng.gen_range(0..map.width());
        let y = rng.gen_range(0..map.height());
        if map
            .get_cell(i64::from(x), i64::from(y))
            .is_some_and(|t| habitat_allows(species, t))
        {
            return Some(Position::new(f64::from(x) + 0.5, f64::from(y) + 0.5));
        }
    }

    if species.is_aquatic() {
        return None;
    }
    let (cx, cy) = (map.width() / 2, map.height() / 2);
    map.get_cell(i64::from(cx), i64::from(cy))
        .filter(|t| t.is_land())
        .map(|_| Position::new(f64::from(cx) + 0.5, f64::from(cy) + 0.5))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::terrain::WorldMap;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_fish_need_water() {
        let map = WorldMap::filled(16, 16, Tile::Grass);
        let config = AppConfig::default();
        let ctx = SystemContext::new(&map, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(find_spawn_position(ctx, Species::Fish, &mut rng), None);
        let pig = find_spawn_position(ctx, Species::Pig, &mut rng).expect("land");
        assert!(map.is_land(pig));
    }

    #[test]
    fn test_land_fallback_to_center() {
        let mut config = AppConfig::default();
        config.spawning.max_attempts = 0;
        let map = WorldMap::filled(16, 16, Tile::Sand);
        let ctx = SystemContext::new(&map, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(
            find_spawn_position(ctx, Species::Wolf, &mut rng),
            Some(Position::new(8.5, 8.5))
        );

        let water = WorldMap::filled(16, 16, Tile::Water);
        let ctx = SystemContext::new(&water, &config);
        assert_eq!(find_spawn_position(ctx, Species::Cow, &mut rng), None);
    }

    #[test]
    fn test_spawn_phase_respects_caps() {
        let map = WorldMap::filled(32, 32, Tile::Grass);
        let mut config = AppConfig::default();
        config.spawning.pig.rate = 1.0;
        config.spawning.pig.cap = 2;
        config.spawning.cow.rate = 0.0;
        config.spawning.wolf.rate = 0.0;
        let ctx = SystemContext::new(&map, &config);
        let mut store = EntityStore::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut events = Vec::new();
        for _ in 0..10 {
            spawn_phase(ctx, &mut store, &mut rng, &mut events);
        }
        assert_eq!(store.count_of_species(Species::Pig), 2);
        assert_eq!(store.count_of_species(Species::Fish), 0);
        assert_eq!(events.len(), 2);
    }
}
