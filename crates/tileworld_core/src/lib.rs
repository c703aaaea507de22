//! # Tileworld Core
//!
//! Deterministic simulation engine for a procedurally generated tile world.
//!
//! This crate contains:
//! - Seeded gradient noise and multi-octave terrain synthesis
//! - The tile grid with sparse decorative feature maps
//! - Agent storage with id-based, existence-checked references
//! - Per-species behaviour: fish, grazing herbivores, pack-hunting wolves
//! - Tick pacing, configuration, metrics and structured logging
//!
//! ## Example
//!
//! ```
//! use tileworld_core::config::{FeatureConfig, TerrainSettings};
//! use tileworld_core::terrain::{TerrainGenerator, Tile};
//!
//! let generator = TerrainGenerator::new(TerrainSettings::default(), FeatureConfig::default());
//! let map = generator.generate(64, 64);
//! assert_eq!(map.width(), 64);
//! assert!(map.get_tile(10.5, 10.5).is_some());
//! assert_eq!(map.get_tile(64.0, 0.0), None::<Tile>);
//! ```

/// Tick pacing with pause and time scale
pub mod clock;
/// Configuration management for simulation parameters
pub mod config;
/// Agent storage and spatial queries
pub mod entity_store;
/// Configuration error types
pub mod error;
/// Run counters and logging setup
pub mod metrics;
/// Seeded 2D gradient noise
pub mod noise;
/// Read-only world views
pub mod snapshot;
/// Per-tick agent behaviour
pub mod systems;
/// Terrain generation and the tile grid
pub mod terrain;

pub use clock::SimulationClock;
pub use entity_store::EntityStore;
pub use error::ConfigError;
pub use metrics::{init_logging, Metrics};
pub use noise::NoiseField;
pub use terrain::{TerrainGenerator, TerrainLogic, WorldMap};
