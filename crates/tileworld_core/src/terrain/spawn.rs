use super::{Tile, TileCoord, WorldMap};

/// Rings scanned around the map center before falling back to a full scan.
pub const SPAWN_SEARCH_RADIUS: u32 = 64;

fn is_spawnable(tile: Tile) -> bool {
    matches!(tile, Tile::Grass | Tile::Sand)
}

impl WorldMap {
    /// Tile the player (re)enters on.
    ///
    /// Expanding square rings from the center, then a row-major scan of the
    /// whole grid, then `(1, 1)`. Always terminates, even on an all-water map.
    pub fn find_spawn_point(&self) -> TileCoord {
        let cx = i64::from(self.width() / 2);
        let cy = i64::from(self.height() / 2);

        for r in 0..=i64::from(SPAWN_SEARCH_RADIUS) {
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx.abs() != r && dy.abs() != r {
                        continue;
                    }
                    let (x, y) = (cx + dx, cy + dy);
                    if self.get_cell(x, y).is_some_and(is_spawnable) {
                        return TileCoord::new(x as u32, y as u32);
                    }
                }
            }
        }

        for (idx, &tile) in self.tiles().iter().enumerate() {
            if is_spawnable(tile) {
                let w = self.width() as usize;
                return TileCoord::new((idx % w) as u32, (idx / w) as u32);
            }
        }

        tracing::warn!("No grass or sand tile found; spawning at (1, 1)");
        TileCoord::new(1, 1)
    }
}
