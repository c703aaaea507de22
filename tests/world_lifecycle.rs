mod common;

use common::WorldBuilder;
use tileworld_lib::model::config::{AppConfig, TerrainSettings};
use tileworld_lib::model::state::{Position, Species, WorldEvent};
use tileworld_lib::model::terrain::{Tile, WorldMap};
use tileworld_lib::model::world::{PlayerInput, World};

#[test]
fn test_regenerate_resets_world() {
    let mut config = AppConfig::default();
    config.world.size = 64;
    let mut world = World::new(config).expect("world");
    let player = world.player_id().expect("player");
    world.spawn(Species::Pig, 10.5, 10.5);
    for _ in 0..100 {
        world.advance(1.0 / 60.0);
    }
    assert!(world.entities().len() > 1);

    let settings = TerrainSettings {
        seed: 4242,
        ..world.config().terrain.clone()
    };
    let event = world.regenerate(settings).expect("valid settings");

    assert!(matches!(event, WorldEvent::WorldReset { size: 64, .. }));
    assert_eq!(world.entities().len(), 1);
    assert_alive!(world, player);
    assert_eq!(world.tick(), 0);
    assert_eq!(world.config().terrain.seed, 4242);
    let pos = world.entities().position(player).expect("player");
    assert!(matches!(
        world.get_tile(pos.x, pos.y),
        Some(Tile::Grass | Tile::Sand)
    ));
}

#[test]
fn test_invalid_settings_leave_world_untouched() {
    let mut config = AppConfig::default();
    config.world.size = 64;
    let mut world = World::new(config).expect("world");
    let pig = world.spawn(Species::Pig, 10.5, 10.5).expect("pig");
    let before = world.map().clone();

    let bad = TerrainSettings {
        water_level: 0.5,
        sand_level: 0.1,
        ..world.config().terrain.clone()
    };
    assert!(world.regenerate(bad).is_err());
    assert!(world
        .regenerate(TerrainSettings {
            scale: 0.0,
            ..world.config().terrain.clone()
        })
        .is_err());
    assert!(world.resize(100).is_err());

    assert_eq!(world.map(), &before);
    assert_alive!(world, pig);
    assert_eq!(world.config().world.size, 64);
}

#[test]
fn test_resize_changes_grid() {
    let mut config = AppConfig::default();
    config.world.size = 64;
    let mut world = World::new(config).expect("world");

    world.resize(128).expect("allowed size");

    assert_eq!(world.map().width(), 128);
    assert_eq!(world.map().height(), 128);
    assert_eq!(world.snapshot().size, 128);
    assert!(world.get_tile(127.5, 127.5).is_some());
}

#[test]
fn test_player_cannot_leave_map() {
    let mut world = WorldBuilder::new().build();
    let player = world.player_id().expect("player");
    world
        .entities_mut()
        .get_mut(player)
        .expect("player")
        .position = Position::new(0.05, 30.5);

    assert!(!world.move_entity(player, (-1.0, 0.0), false));
    assert_eq!(
        world.entities().position(player),
        Some(Position::new(0.05, 30.5))
    );
    assert!(!world.move_entity(player, (0.0, 0.0), false));
    assert!(world.move_entity(player, (1.0, 0.0), true));
}

#[test]
fn test_only_player_accepts_input() {
    let mut world = WorldBuilder::new().build();
    let pig = world.spawn(Species::Pig, 10.5, 10.5).expect("pig");
    assert!(!world.move_entity(pig, (1.0, 0.0), false));
    assert!(world.spawn(Species::Player, 5.5, 5.5).is_none());
}

#[test]
fn test_sprint_covers_more_ground() {
    let mut world = WorldBuilder::new().build();
    let player = world.player_id().expect("player");
    let start = world.entities().position(player).expect("player");

    world.move_entity(player, (0.0, 1.0), false);
    let walked = world.entities().position(player).expect("player");
    world.move_entity(player, (0.0, 1.0), true);
    let sprinted = world.entities().position(player).expect("player");

    assert!(sprinted.distance(walked) > walked.distance(start));
}

#[test]
fn test_pause_and_time_scale() {
    let mut world = WorldBuilder::new().build();
    world.spawn_wolf(10.5, 10.5, false).expect("wolf");

    world.clock.pause();
    for _ in 0..10 {
        world.advance_frame(1.0 / 60.0, None);
    }
    assert_eq!(world.tick(), 0);

    world.clock.resume();
    world.clock.set_time_scale(3);
    world.advance_frame(1.0 / 60.0, None);
    assert_eq!(world.tick(), 3);

    let input = PlayerInput {
        direction: (1.0, 1.0),
        sprinting: false,
    };
    world.clock.set_time_scale(1);
    world.advance_frame(1.0 / 60.0, Some(input));
    assert_eq!(world.tick(), 4);
}

#[test]
fn test_spawning_honours_caps() {
    let mut config = AppConfig::default();
    config.world.size = 64;
    config.spawning.fish.rate = 1.0;
    config.spawning.fish.cap = 5;
    config.spawning.pig.rate = 1.0;
    config.spawning.pig.cap = 3;
    let mut world = World::new(config).expect("world");

    for _ in 0..50 {
        world.advance(1.0 / 60.0);
        let stats = world.stats();
        assert!(stats.fish <= 5);
        assert!(stats.pigs <= 3);
    }
    for agent in world.agents() {
        let tile = world.get_tile(agent.x, agent.y).expect("in bounds");
        if agent.species == Species::Fish {
            assert_eq!(tile, Tile::Water);
        }
    }
}

#[test]
fn test_out_of_range_rates_never_reach_the_tick() {
    let mut config = AppConfig::default();
    config.world.size = 64;
    config.spawning.pig.rate = 1.5;
    assert!(World::with_map(config.clone(), WorldMap::filled(64, 64, Tile::Grass)).is_err());
    assert!(World::new(config).is_err());

    let mut world = WorldBuilder::new().build();
    let pig = world.spawn(Species::Pig, 10.5, 10.5).expect("pig");
    let before = world.config().clone();
    let mut bad = before.clone();
    bad.behavior.pack.leader_chance = f64::NAN;
    assert!(world.set_config(bad).is_err());
    let mut bad = before.clone();
    bad.spawning.wants_pack_chance = 2.0;
    assert!(world.set_config(bad).is_err());

    assert_eq!(world.config(), &before);
    for _ in 0..20 {
        world.advance(1.0 / 60.0);
    }
    assert_alive!(world, pig);
}
