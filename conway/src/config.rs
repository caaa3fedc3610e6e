// config.rs - Simulation settings

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::ConfigError;
use crate::grid::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::patterns;
use crate::surface::HexGrid;
use crate::world::World;

pub const DEFAULT_TICK: Duration = Duration::from_millis(100);
pub const DEFAULT_AUTO_SHUTDOWN: Duration = Duration::from_secs(10);
/// Smallest hex overlay radius; the number of hexagons grows with 1/radius².
pub const MIN_HEX_RADIUS: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    /// Random placements made when seeding; duplicates land on live cells.
    pub initial_live_cells: usize,
    /// Period of the update timer.
    pub tick: Duration,
    /// `None` runs until the window is closed.
    pub auto_shutdown: Option<Duration>,
    pub hex_grid: HexGrid,
    pub seed: Option<u64>,
    /// Named pattern stamped in the centre instead of random seeding.
    pub pattern: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            initial_live_cells: SCREEN_WIDTH * SCREEN_HEIGHT / 10,
            tick: DEFAULT_TICK,
            auto_shutdown: Some(DEFAULT_AUTO_SHUTDOWN),
            hex_grid: HexGrid::default(),
            seed: None,
            pattern: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid { width: self.width, height: self.height });
        }
        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        if !(self.hex_grid.radius >= MIN_HEX_RADIUS) {
            return Err(ConfigError::HexRadius(self.hex_grid.radius));
        }
        if let Some(name) = &self.pattern {
            if patterns::find(name).is_none() {
                return Err(ConfigError::UnknownPattern(name.clone()));
            }
        }
        Ok(())
    }

    /// Builds the initial world: a centred pattern if one is named, random
    /// placements otherwise.
    pub fn seed_world(&self) -> Result<World, ConfigError> {
        self.validate()?;

        if let Some(name) = &self.pattern {
            let pattern = patterns::find(name).ok_or_else(|| ConfigError::UnknownPattern(name.clone()))?;
            let (rows, cols) = pattern.extent();
            let mut world = World::empty(self.width, self.height);
            world.stamp(
                pattern,
                self.width.saturating_sub(cols) / 2,
                self.height.saturating_sub(rows) / 2,
            );
            return Ok(world);
        }

        Ok(match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                World::with_rng(self.width, self.height, self.initial_live_cells, &mut rng)
            }
            None => World::new(self.width, self.height, self.initial_live_cells),
        })
    }
}
