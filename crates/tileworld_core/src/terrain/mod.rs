pub use tileworld_data::{FeatureKind, Tile, TileCoord};

use std::collections::HashMap;
use tileworld_data::Position;

pub mod generation;
pub mod spawn;

pub use generation::TerrainGenerator;

pub trait TerrainLogic {
    fn movement_modifier(&self) -> f64;
    fn symbol(&self) -> char;
}

impl TerrainLogic for Tile {
    fn movement_modifier(&self) -> f64 {
        match self {
            Tile::Water => 0.5,
            Tile::Sand => 0.8,
            Tile::Grass => 1.0,
            Tile::DarkGrass => 0.9,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Tile::Water => '≈',
            Tile::Sand => '░',
            Tile::Grass => '.',
            Tile::DarkGrass => '"',
        }
    }
}

/// Sparse per-category feature storage: tile coordinate -> variant index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureMap {
    entries: HashMap<TileCoord, u8>,
}

impl FeatureMap {
    pub fn get(&self, coord: TileCoord) -> Option<u8> {
        self.entries.get(&coord).copied()
    }

    pub fn insert(&mut self, coord: TileCoord, variant: u8) {
        self.entries.insert(coord, variant);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, u8)> + '_ {
        self.entries.iter().map(|(c, v)| (*c, *v))
    }

    /// True if some feature lies strictly closer than `spacing` to `coord`.
    ///
    /// Scans the square window around `coord` instead of the whole map.
    pub fn has_neighbor_within(&self, coord: TileCoord, spacing: u32) -> bool {
        if spacing == 0 || self.entries.is_empty() {
            return false;
        }
        let r = spacing as i64;
        let limit = r * r;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy >= limit {
                    continue;
                }
                let nx = i64::from(coord.x) + dx;
                let ny = i64::from(coord.y) + dy;
                if nx < 0 || ny < 0 || nx > i64::from(u32::MAX) || ny > i64::from(u32::MAX) {
                    continue;
                }
                if self
                    .entries
                    .contains_key(&TileCoord::new(nx as u32, ny as u32))
                {
                    return true;
                }
            }
        }
        false
    }
}

/// The generated world: a square tile grid plus decorative features.
///
/// Replaced wholesale on regeneration; tiles are never edited in place.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldMap {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    pub grass: FeatureMap,
    pub rocks: FeatureMap,
    pub trees: FeatureMap,
}

impl WorldMap {
    /// A featureless map covered by a single tile type.
    pub fn filled(width: u32, height: u32, tile: Tile) -> Self {
        Self::from_tiles(width, height, vec![tile; width as usize * height as usize])
    }

    /// Wraps a row-major tile grid. A short or long `tiles` is padded with
    /// water or truncated to fit.
    pub fn from_tiles(width: u32, height: u32, mut tiles: Vec<Tile>) -> Self {
        tiles.resize(width as usize * height as usize, Tile::Water);
        Self {
            width,
            height,
            tiles,
            grass: FeatureMap::default(),
            rocks: FeatureMap::default(),
            trees: FeatureMap::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline(always)]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Tile under a continuous position, or `None` outside the grid.
    pub fn get_tile(&self, x: f64, y: f64) -> Option<Tile> {
        self.tile_coord(x, y).map(|c| self.tiles[self.index(c.x, c.y)])
    }

    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        self.get_tile(pos.x, pos.y)
    }

    /// Floors a continuous position to its tile, if in bounds.
    pub fn tile_coord(&self, x: f64, y: f64) -> Option<TileCoord> {
        let fx = x.floor();
        let fy = y.floor();
        if !(fx >= 0.0 && fy >= 0.0 && fx < f64::from(self.width) && fy < f64::from(self.height)) {
            return None;
        }
        Some(TileCoord::new(fx as u32, fy as u32))
    }

    pub fn get_cell(&self, x: i64, y: i64) -> Option<Tile> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(self.tiles[self.index(x as u32, y as u32)])
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        self.tile_coord(pos.x, pos.y).is_some()
    }

    pub fn is_land(&self, pos: Position) -> bool {
        self.tile_at(pos).is_some_and(Tile::is_land)
    }

    pub fn is_water(&self, pos: Position) -> bool {
        self.tile_at(pos) == Some(Tile::Water)
    }

    pub fn features(&self, kind: FeatureKind) -> &FeatureMap {
        match kind {
            FeatureKind::Grass => &self.grass,
            FeatureKind::Rock => &self.rocks,
            FeatureKind::Tree => &self.trees,
        }
    }

    pub(crate) fn features_mut(&mut self, kind: FeatureKind) -> &mut FeatureMap {
        match kind {
            FeatureKind::Grass => &mut self.grass,
            FeatureKind::Rock => &mut self.rocks,
            FeatureKind::Tree => &mut self.trees,
        }
    }

    /// Variant index of the feature of `kind` on the tile under `(x, y)`.
    pub fn feature_at(&self, kind: FeatureKind, x: f64, y: f64) -> Option<u8> {
        self.tile_coord(x, y)
            .and_then(|c| self.features(kind).get(c))
    }

    pub fn has_neighbor_type(&self, coord: TileCoord, tile: Tile) -> bool {
        let ix = i64::from(coord.x);
        let iy = i64::from(coord.y);
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.get_cell(ix + dx, iy + dy) == Some(tile) {
                    return true;
                }
            }
        }
        false
    }

    /// Center of the nearest land tile within `radius` tiles of `pos`.
    pub fn nearest_land(&self, pos: Position, radius: i32) -> Option<Position> {
        let cx = pos.x.floor() as i64;
        let cy = pos.y.floor() as i64;
        let mut best: Option<(f64, Position)> = None;
        for dy in -i64::from(radius)..=i64::from(radius) {
            for dx in -i64::from(radius)..=i64::from(radius) {
                let Some(tile) = self.get_cell(cx + dx, cy + dy) else {
                    continue;
                };
                if !tile.is_land() {
                    continue;
                }
                let center = Position::new((cx + dx) as f64 + 0.5, (cy + dy) as f64 + 0.5);
                let d = pos.distance_sq(center);
                if best.map_or(true, |(bd, _)| d < bd) {
                    best = Some((d, center));
                }
            }
        }
        best.map(|(_, p)| p)
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// One character per tile, rows separated by newlines.
    pub fn render_text(&self) -> String {
        if self.width == 0 {
            return String::new();
        }
        let mut out = String::with_capacity(self.tiles.len() * 2);
        for row in self.tiles.chunks(self.width as usize) {
            out.extend(row.iter().map(TerrainLogic::symbol));
            out.push('\n');
        }
        out
    }
}
