use super::{FeatureKind, Tile, TileCoord, WorldMap};
use crate::config::{FeatureConfig, TerrainSettings};
use crate::noise::NoiseField;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Frequency of the biome-speckle noise used for dark grass.
const DARK_GRASS_SCALE: f64 = 0.15;

/// Builds a [`WorldMap`] from terrain settings. Pure: equal inputs give
/// equal maps, features included.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    settings: TerrainSettings,
    features: FeatureConfig,
    elevation: NoiseField,
    biome: NoiseField,
}

impl TerrainGenerator {
    pub fn new(settings: TerrainSettings, features: FeatureConfig) -> Self {
        let elevation = NoiseField::new(settings.seed);
        let biome = NoiseField::new(settings.seed.wrapping_add(1));
        Self {
            settings,
            features,
            elevation,
            biome,
        }
    }

    pub fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    /// Normalized multi-octave elevation at a tile.
    pub fn elevation(&self, x: u32, y: u32) -> f64 {
        let s = &self.settings;
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = s.scale;
        let mut total = 0.0;
        for _ in 0..s.octaves {
            value += self
                .elevation
                .sample(f64::from(x) * frequency, f64::from(y) * frequency)
                * amplitude;
            total += amplitude;
            amplitude *= s.persistence;
            frequency *= s.lacunarity;
        }
        if total > 0.0 {
            value / total
        } else {
            0.0
        }
    }

    pub fn generate(&self, width: u32, height: u32) -> WorldMap {
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(classify(
                    self.elevation(x, y),
                    self.settings.water_level,
                    self.settings.sand_level,
                ));
            }
        }
        let mut map = WorldMap::from_tiles(width, height, tiles);

        self.speckle_dark_grass(&mut map);
        self.place_features(&mut map);

        tracing::info!(
            width,
            height,
            seed = self.settings.seed,
            water = map.count(Tile::Water),
            sand = map.count(Tile::Sand),
            dark_grass = map.count(Tile::DarkGrass),
            grass_features = map.grass.len(),
            rocks = map.rocks.len(),
            trees = map.trees.len(),
            "Terrain generated"
        );
        map
    }

    fn speckle_dark_grass(&self, map: &mut WorldMap) {
        let threshold = 0.4 - self.settings.dark_grass_chance * 0.4;
        let mut promote = Vec::new();
        for y in 0..map.height() {
            for x in 0..map.width() {
                let coord = TileCoord::new(x, y);
                if map.get_cell(i64::from(x), i64::from(y)) != Some(Tile::Grass)
                    || map.has_neighbor_type(coord, Tile::Sand)
                {
                    continue;
                }
                let n = self.biome.sample(
                    f64::from(x) * DARK_GRASS_SCALE,
                    f64::from(y) * DARK_GRASS_SCALE,
                );
                if n > threshold {
                    promote.push(coord);
                }
            }
        }
        for coord in promote {
            let idx = map.index(coord.x, coord.y);
            map.tiles[idx] = Tile::DarkGrass;
        }
    }

    fn place_features(&self, map: &mut WorldMap) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.settings.seed);
        for kind in FeatureKind::PLACEMENT_ORDER {
            let rule = *self.features.rule(kind);
            for y in 0..map.height() {
                for x in 0..map.width() {
                    let Some(tile) = map.get_cell(i64::from(x), i64::from(y)) else {
                        continue;
                    };
                    if !kind.allowed_on(tile) || !rng.gen_bool(rule.chance) {
                        continue;
                    }
                    let coord = TileCoord::new(x, y);
                    if map.features(kind).has_neighbor_within(coord, rule.spacing) {
                        continue;
                    }
                    let variant = rng.gen_range(0..rule.variants.max(1));
                    map.features_mut(kind).insert(coord, variant);
                }
            }
        }
    }
}

/// Threshold classification of an elevation value.
pub fn classify(value: f64, water_level: f64, sand_level: f64) -> Tile {
    if value < water_level {
        Tile::Water
    } else if value < sand_level {
        Tile::Sand
    } else {
        Tile::Grass
    }
}
