use serde::{Deserialize, Serialize};

/// Terrain classification of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    /// Open water. Traversable, but only fish live here.
    #[default]
    Water,
    /// Beach band between water and grass.
    Sand,
    /// Ordinary grassland.
    Grass,
    /// Denser grass speckled in by the biome pass.
    DarkGrass,
}

impl Tile {
    /// Anything that is not water.
    #[inline]
    pub fn is_land(self) -> bool {
        !matches!(self, Tile::Water)
    }

    /// Either grass variant.
    #[inline]
    pub fn is_grass(self) -> bool {
        matches!(self, Tile::Grass | Tile::DarkGrass)
    }
}

/// Decorative feature categories placed after classification.
///
/// Placement order is fixed: grass decoration, then rocks, then trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    Grass,
    Rock,
    Tree,
}

impl FeatureKind {
    pub const PLACEMENT_ORDER: [FeatureKind; 3] =
        [FeatureKind::Grass, FeatureKind::Rock, FeatureKind::Tree];

    /// Whether a feature of this kind may sit on `tile`.
    pub fn allowed_on(self, tile: Tile) -> bool {
        match self {
            FeatureKind::Grass => tile == Tile::DarkGrass,
            FeatureKind::Rock => tile.is_land(),
            FeatureKind::Tree => tile.is_grass(),
        }
    }
}

/// Integer tile coordinate, used as the key of sparse feature maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Center of the tile in continuous world space.
    pub fn center(self) -> (f64, f64) {
        (f64::from(self.x) + 0.5, f64::from(self.y) + 0.5)
    }
}
