//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of columns
    pub width: i32,
    /// Number of rows
    pub height: i32,
    /// Weight applied to the ant draw in `select_entity`
    pub ant_rate: f64,
    /// Weight applied to the fruit draw in `select_entity`
    pub fruit_rate: f64,
    /// Weight applied to the empty-space draw in `select_entity`
    pub space_rate: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            ant_rate: 0.15,
            fruit_rate: 0.2,
            space_rate: 0.6,
        }
    }
}

/// Fruit spawn bounds.
///
/// A new fruit appears only when `spawn_floor < count < max_fruit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FruitConfig {
    /// Exclusive lower bound on the fruit count; the stricter variant uses 4
    pub spawn_floor: usize,
    /// Exclusive upper bound on the fruit count
    pub max_fruit: usize,
}

impl FruitConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_fruit <= self.spawn_floor {
            return Err(Error::Validation(format!(
                "max_fruit ({}) must exceed spawn_floor ({})",
                self.max_fruit, self.spawn_floor
            )));
        }
        Ok(())
    }

    pub fn allows_spawn(&self, count: usize) -> bool {
        self.spawn_floor < count && count < self.max_fruit
    }
}

/// Both sides at least 1 and `width * height` representable as `i32`
pub fn validate_grid_size(width: i32, height: i32) -> Result<()> {
    if width < 1 || height < 1 {
        return Err(Error::Validation(format!(
            "grid must be at least 1x1, got {}x{}",
            width, height
        )));
    }
    if width.checked_mul(height).is_none() {
        return Err(Error::Validation(format!(
            "grid {}x{} has too many cells",
            width, height
        )));
    }
    Ok(())
}

impl Default for FruitConfig {
    fn default() -> Self {
        Self {
            spawn_floor: 1,
            max_fruit: 9,
        }
    }
}

/// Everything needed to construct a simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub fruit: FruitConfig,
    /// Seed for reproducible runs; entropy is used when absent
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        validate_grid_size(world.width, world.height)?;

        for (name, rate) in [
            ("ant_rate", world.ant_rate),
            ("fruit_rate", world.fruit_rate),
            ("space_rate", world.space_rate),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(Error::Validation(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, rate
                )));
            }
        }

        self.fruit.validate()
    }
}

/// Driver configuration for the `colony` binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub simulation: SimulationConfig,
    /// Delay between ticks (milliseconds)
    pub tick_interval_ms: u64,
    /// Stop after this many ticks; run until interrupted when absent
    pub max_ticks: Option<u64>,
    /// How many times construction is re-attempted with fresh randomness
    pub construction_attempts: u32,
}

impl DriverConfig {
    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: DriverConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            tick_interval_ms: 1000,
            max_ticks: None,
            construction_attempts: 10,
        }
    }
}
