use proptest::prelude::*;
use tileworld_core::noise::NoiseField;
use tileworld_core::terrain::generation::classify;
use tileworld_lib::model::config::{FeatureConfig, TerrainSettings};
use tileworld_lib::model::terrain::{FeatureKind, TerrainGenerator, Tile};

fn rank(tile: Tile) -> u8 {
    match tile {
        Tile::Water => 0,
        Tile::Sand => 1,
        Tile::Grass | Tile::DarkGrass => 2,
    }
}

prop_compose! {
    fn arb_levels()(
        water in -0.5f64..0.3,
        gap in 0.0f64..0.3
    ) -> (f64, f64) {
        (water, water + gap)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_noise_stays_bounded(
        seed in any::<u64>(),
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0
    ) {
        let field = NoiseField::new(seed);
        let v = field.sample(x, y);
        prop_assert!(v.is_finite());
        prop_assert!((-1.0..=1.0).contains(&v), "sample {} out of range", v);
    }

    #[test]
    fn test_noise_is_continuous(
        seed in any::<u64>(),
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
        dx in -1e-4f64..1e-4,
        dy in -1e-4f64..1e-4
    ) {
        let field = NoiseField::new(seed);
        let a = field.sample(x, y);
        let b = field.sample(x + dx, y + dy);
        prop_assert!((a - b).abs() < 1e-2, "jump {} between close points", (a - b).abs());
    }

    #[test]
    fn test_noise_is_pure(seed in any::<u64>(), x in -100.0f64..100.0, y in -100.0f64..100.0) {
        prop_assert_eq!(NoiseField::new(seed).sample(x, y), NoiseField::new(seed).sample(x, y));
    }

    #[test]
    fn test_classification_is_monotonic(
        (water, sand) in arb_levels(),
        a in -1.0f64..1.0,
        b in -1.0f64..1.0
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(classify(lo, water, sand)) <= rank(classify(hi, water, sand)));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_level_changes_move_counts_one_way(
        seed in any::<u64>(),
        (water, sand) in arb_levels(),
        lower in 0.0f64..0.2,
        raise in 0.0f64..0.2
    ) {
        let settings = TerrainSettings { seed, ..Default::default() };
        let generator = TerrainGenerator::new(settings, FeatureConfig::default());
        let elevations: Vec<f64> = (0..32u32)
            .flat_map(|y| (0..32u32).map(move |x| (x, y)))
            .map(|(x, y)| generator.elevation(x, y))
            .collect();
        let count = |w: f64, s: f64, pred: fn(Tile) -> bool| {
            elevations.iter().filter(|&&v| pred(classify(v, w, s))).count()
        };
        let is_water = |t: Tile| t == Tile::Water;
        let is_low = |t: Tile| matches!(t, Tile::Water | Tile::Sand);

        prop_assert!(count(water - lower, sand, is_water) <= count(water, sand, is_water));
        prop_assert!(count(water, sand + raise, is_low) >= count(water, sand, is_low));
    }

    #[test]
    fn test_features_respect_spacing_and_terrain(seed in any::<u64>()) {
        let settings = TerrainSettings { seed, ..Default::default() };
        let features = FeatureConfig::default();
        let map = TerrainGenerator::new(settings, features.clone()).generate(64, 64);

        for kind in FeatureKind::PLACEMENT_ORDER {
            let rule = features.rule(kind);
            let placed: Vec<_> = map.features(kind).iter().collect();
            for (i, (a, variant)) in placed.iter().enumerate() {
                prop_assert!(*variant < rule.variants);
                let tile = map.get_cell(i64::from(a.x), i64::from(a.y)).expect("in bounds");
                prop_assert!(kind.allowed_on(tile), "{:?} on {:?}", kind, tile);
                for (b, _) in &placed[i + 1..] {
                    let dx = i64::from(a.x) - i64::from(b.x);
                    let dy = i64::from(a.y) - i64::from(b.y);
                    let spacing = i64::from(rule.spacing);
                    prop_assert!(dx * dx + dy * dy >= spacing * spacing,
                        "{:?} features at {:?} and {:?} too close", kind, a, b);
                }
            }
        }
    }
}

#[test]
fn test_default_seed_fixture() {
    let map = TerrainGenerator::new(TerrainSettings::default(), FeatureConfig::default())
        .generate(128, 128);
    assert_eq!(map.get_tile(100.5, 20.5), Some(Tile::Water));
    assert_eq!(map.get_tile(20.5, 100.5), Some(Tile::Water));
    assert_eq!(map.get_tile(64.5, 64.5), Some(Tile::DarkGrass));
    assert!(map.get_tile(10.5, 10.5).is_some_and(Tile::is_land));
    assert_eq!(map.get_tile(128.0, 3.0), None);
    assert_eq!(map.get_tile(-0.5, 3.0), None);
}
