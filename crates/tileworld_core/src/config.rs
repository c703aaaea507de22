//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! a `tileworld.toml` file. Every section carries defaults, so a file only
//! needs to name the values it overrides.
//!
//! ## Example `tileworld.toml`
//!
//! ```toml
//! [world]
//! size = 256
//!
//! [terrain]
//! seed = 7
//! water_level = -0.1
//!
//! [spawning.wolf]
//! cap = 12
//! rate = 0.02
//! ```

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tileworld_data::{FeatureKind, Species};

/// Grid sides a world may be generated with.
pub const ALLOWED_SIZES: [u32; 5] = [64, 128, 256, 512, 1024];

/// World-level configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of the square grid.
    pub size: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { size: 128 }
    }
}

/// Parameters of the multi-octave terrain noise and its classification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TerrainSettings {
    /// Base frequency applied to tile coordinates.
    pub scale: f64,
    /// Noise values below this become water.
    pub water_level: f64,
    /// Noise values below this (and above water) become sand.
    pub sand_level: f64,
    /// 0 disables dark grass, 1 makes it as common as the biome noise allows.
    pub dark_grass_chance: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub seed: u64,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            scale: 0.04,
            water_level: -0.08,
            sand_level: -0.04,
            dark_grass_chance: 0.5,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            seed: 42,
        }
    }
}

/// Placement rule for one decorative feature category.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FeatureRule {
    /// Probability that an eligible tile receives a feature.
    pub chance: f64,
    /// Minimum tile distance between two features of this category.
    pub spacing: u32,
    /// Number of sprite variants; a placed feature stores an index below this.
    pub variants: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FeatureConfig {
    pub grass: FeatureRule,
    pub rocks: FeatureRule,
    pub trees: FeatureRule,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            grass: FeatureRule {
                chance: 0.3,
                spacing: 2,
                variants: 4,
            },
            rocks: FeatureRule {
                chance: 0.02,
                spacing: 5,
                variants: 3,
            },
            trees: FeatureRule {
                chance: 0.08,
                spacing: 3,
                variants: 3,
            },
        }
    }
}

impl FeatureConfig {
    pub fn rule(&self, kind: FeatureKind) -> &FeatureRule {
        match kind {
            FeatureKind::Grass => &self.grass,
            FeatureKind::Rock => &self.rocks,
            FeatureKind::Tree => &self.trees,
        }
    }
}

/// Population cap and per-tick spawn probability of one species.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SpeciesSpawn {
    pub cap: usize,
    pub rate: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub fish: SpeciesSpawn,
    pub pig: SpeciesSpawn,
    pub cow: SpeciesSpawn,
    pub wolf: SpeciesSpawn,
    /// Random tiles tried before a spawn gives up for this tick.
    pub max_attempts: u32,
    /// Probability that a new (or released) wolf wants to join a pack.
    pub wants_pack_chance: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            fish: SpeciesSpawn { cap: 30, rate: 0.05 },
            pig: SpeciesSpawn { cap: 12, rate: 0.02 },
            cow: SpeciesSpawn { cap: 12, rate: 0.02 },
            wolf: SpeciesSpawn { cap: 8, rate: 0.01 },
            max_attempts: 100,
            wants_pack_chance: 0.5,
        }
    }
}

impl SpawnConfig {
    pub fn for_species(&self, species: Species) -> Option<&SpeciesSpawn> {
        match species {
            Species::Fish => Some(&self.fish),
            Species::Pig => Some(&self.pig),
            Species::Cow => Some(&self.cow),
            Species::Wolf => Some(&self.wolf),
            Species::Player => None,
        }
    }

    /// Turns every spawn rate to zero. Handy for scripted scenarios.
    pub fn disable_all(&mut self) {
        self.fish.rate = 0.0;
        self.pig.rate = 0.0;
        self.cow.rate = 0.0;
        self.wolf.rate = 0.0;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Tiles per frame on a speed-1.0 tile.
    pub speed: f64,
    pub sprint_multiplier: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 0.12,
            sprint_multiplier: 1.8,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FishConfig {
    pub speed: f64,
    pub wander_min: u32,
    pub wander_max: u32,
}

impl Default for FishConfig {
    fn default() -> Self {
        Self {
            speed: 0.03,
            wander_min: 50,
            wander_max: 150,
        }
    }
}

/// Pig and cow tunables.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HerbivoreConfig {
    pub wander_speed: f64,
    pub wander_min: u32,
    pub wander_max: u32,
    /// Chance of walking at all during a wander cadence.
    pub move_chance: f64,
    pub flee_speed: f64,
    /// Flee bonus is `flee_bonus_scale / distance`, capped at `flee_bonus_cap`.
    pub flee_bonus_scale: f64,
    pub flee_bonus_cap: f64,
    /// Fleeing stops once the threat is farther than this...
    pub calm_distance: f64,
    /// ...and is not hunting and its hunger is below this.
    pub calm_hunger: f32,
}

impl Default for HerbivoreConfig {
    fn default() -> Self {
        Self {
            wander_speed: 0.02,
            wander_min: 50,
            wander_max: 150,
            move_chance: 0.7,
            flee_speed: 0.06,
            flee_bonus_scale: 0.3,
            flee_bonus_cap: 0.06,
            calm_distance: 15.0,
            calm_hunger: 60.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WolfConfig {
    pub hunger_rate: f32,
    pub starvation_threshold: f32,
    pub alert_hunger: f32,
    pub alert_radius: f64,
    pub hunt_hunger: f32,
    /// Above this the search radius widens to `wide_search_radius`.
    pub desperate_hunger: f32,
    pub search_radius: f64,
    pub wide_search_radius: f64,
    /// Targets farther than this trigger an opportunistic local search.
    pub switch_distance: f64,
    pub retarget_chance: f64,
    pub kill_distance: f64,
    pub wander_speed: f64,
    pub wander_min: u32,
    pub wander_max: u32,
    pub chase_speed: f64,
    /// Extra chase speed at full hunger, scaled linearly.
    pub chase_hunger_bonus: f64,
    /// A wolf this close to land may step into water while chasing.
    pub land_margin: f64,
    pub water_hunger: f32,
    pub water_target_distance: f64,
    pub land_search_radius: i32,
}

impl Default for WolfConfig {
    fn default() -> Self {
        Self {
            hunger_rate: 0.05,
            starvation_threshold: 100.0,
            alert_hunger: 60.0,
            alert_radius: 8.0,
            hunt_hunger: 70.0,
            desperate_hunger: 85.0,
            search_radius: 10.0,
            wide_search_radius: 20.0,
            switch_distance: 15.0,
            retarget_chance: 0.01,
            kill_distance: 0.5,
            wander_speed: 0.03,
            wander_min: 30,
            wander_max: 90,
            chase_speed: 0.05,
            chase_hunger_bonus: 0.05,
            land_margin: 3.0,
            water_hunger: 80.0,
            water_target_distance: 5.0,
            land_search_radius: 6,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PackConfig {
    pub max_pack_size: usize,
    pub max_pack_leaders: usize,
    pub join_range: f64,
    /// Chance per tick of a free wolf founding a pack when no leader exists.
    pub leader_chance: f64,
    /// Leaders only recruit while hunger is below this.
    pub recruit_hunger: f32,
    pub recruit_radius: f64,
    pub recruit_distance: f64,
    /// Members farther than this from their slot walk back into formation.
    pub formation_threshold: f64,
    pub formation_spacing: f64,
    /// Half-angle of the V, radians.
    pub formation_angle: f64,
    pub spotting_radius: f64,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            max_pack_size: 4,
            max_pack_leaders: 3,
            join_range: 10.0,
            leader_chance: 0.005,
            recruit_hunger: 40.0,
            recruit_radius: 15.0,
            recruit_distance: 1.5,
            formation_threshold: 3.0,
            formation_spacing: 1.5,
            formation_angle: 0.5,
            spotting_radius: 25.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct BehaviorConfig {
    pub player: PlayerConfig,
    pub fish: FishConfig,
    pub herbivore: HerbivoreConfig,
    pub wolf: WolfConfig,
    pub pack: PackConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    /// Update passes per rendered frame.
    pub time_scale: u32,
    pub target_fps: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            time_scale: 1,
            target_fps: 60,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub terrain: TerrainSettings,
    pub features: FeatureConfig,
    pub spawning: SpawnConfig,
    pub behavior: BehaviorConfig,
    pub clock: ClockConfig,
}

impl AppConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_size(self.world.size)?;
        self.terrain.validate()?;

        for kind in FeatureKind::PLACEMENT_ORDER {
            let rule = self.features.rule(kind);
            probability("features.chance", rule.chance)?;
            if rule.variants == 0 {
                return Err(ConfigError::invalid(
                    "features.variants",
                    "at least one variant is required",
                ));
            }
        }

        for species in Species::WILD {
            if let Some(spawn) = self.spawning.for_species(species) {
                probability("spawning.rate", spawn.rate)?;
            }
        }
        probability("spawning.wants_pack_chance", self.spawning.wants_pack_chance)?;

        probability(
            "behavior.herbivore.move_chance",
            self.behavior.herbivore.move_chance,
        )?;
        probability(
            "behavior.wolf.retarget_chance",
            self.behavior.wolf.retarget_chance,
        )?;
        probability("behavior.pack.leader_chance", self.behavior.pack.leader_chance)?;

        let wolf = &self.behavior.wolf;
        if !wolf.starvation_threshold.is_finite() || wolf.starvation_threshold <= 0.0 {
            return Err(ConfigError::invalid(
                "behavior.wolf.starvation_threshold",
                "must be positive",
            ));
        }
        if !wolf.hunger_rate.is_finite() || wolf.hunger_rate < 0.0 {
            return Err(ConfigError::invalid(
                "behavior.wolf.hunger_rate",
                "must not be negative",
            ));
        }
        if self.behavior.pack.max_pack_leaders == 0 {
            return Err(ConfigError::invalid(
                "behavior.pack.max_pack_leaders",
                "must allow at least one leader",
            ));
        }

        if self.clock.time_scale == 0 {
            return Err(ConfigError::invalid("clock.time_scale", "must be at least 1"));
        }
        Ok(())
    }
}

impl TerrainSettings {
    pub fn validate(&self) -> Result<()> {
        positive("terrain.scale", self.scale)?;
        positive("terrain.persistence", self.persistence)?;
        positive("terrain.lacunarity", self.lacunarity)?;
        if self.octaves == 0 || self.octaves > 16 {
            return Err(ConfigError::invalid(
                "terrain.octaves",
                format!("{} is outside 1..=16", self.octaves),
            ));
        }
        if !self.water_level.is_finite() || !self.sand_level.is_finite() {
            return Err(ConfigError::invalid(
                "terrain.water_level",
                "levels must be finite",
            ));
        }
        if self.water_level > self.sand_level {
            return Err(ConfigError::invalid(
                "terrain.water_level",
                format!(
                    "water level {} is above sand level {}",
                    self.water_level, self.sand_level
                ),
            ));
        }
        probability("terrain.dark_grass_chance", self.dark_grass_chance)
    }
}

pub fn validate_size(size: u32) -> Result<()> {
    if ALLOWED_SIZES.contains(&size) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            "world.size",
            format!("{size} is not one of {ALLOWED_SIZES:?}"),
        ))
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be positive")))
    }
}

fn probability(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is outside [0, 1]")))
    }
}
