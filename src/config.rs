use std::time::Duration;

use anyhow::ensure;

/// Window size in physical pixels
pub const WINDOW_WIDTH: u32 = 500;
pub const WINDOW_HEIGHT: u32 = 500;

/// Pixels per cell edge (25x25 grid at the default window size)
pub const CELL_SCALE: u32 = 20;

/// Chance that a cell starts alive; 0.0 gives a blank canvas to draw on
pub const INITIAL_LIVE_PROBABILITY: f64 = 0.0;

/// Time between simulation ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(150);

/// Borderless fullscreen instead of a fixed-size window
pub const FULLSCREEN: bool = false;

// ============================================
// Palette (sRGB, 0-255)
// ============================================

pub const BACKGROUND_COLOR: [u8; 3] = [230, 230, 250];
pub const ALIVE_COLOR: [u8; 3] = [20, 20, 20];
pub const DEAD_OUTLINE_COLOR: [u8; 3] = [145, 145, 145];

/// Run parameters, passed explicitly from `main` to the app
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub window_width: u32,
    pub window_height: u32,
    pub scale: u32,
    pub live_probability: f64,
    pub tick_interval: Duration,
    pub fullscreen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            scale: CELL_SCALE,
            live_probability: INITIAL_LIVE_PROBABILITY,
            tick_interval: TICK_INTERVAL,
            fullscreen: FULLSCREEN,
        }
    }
}

impl Config {
    /// Grid dimensions as (cols, rows)
    pub fn grid_dimensions(&self) -> (usize, usize) {
        (
            (self.window_width / self.scale) as usize,
            (self.window_height / self.scale) as usize,
        )
    }

    /// Reject values that would make the grid or the timer meaningless
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.scale > 0, "cell scale must be positive");
        ensure!(
            self.window_width >= self.scale && self.window_height >= self.scale,
            "window {}x{} cannot fit a single {}px cell",
            self.window_width,
            self.window_height,
            self.scale
        );
        ensure!(
            (0.0..1.0).contains(&self.live_probability),
            "live probability must be in [0, 1), got {}",
            self.live_probability
        );
        ensure!(!self.tick_interval.is_zero(), "tick interval must be non-zero");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_dimensions() {
        let config = Config::default();
        assert_eq!(config.grid_dimensions(), (25, 25));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dimensions_round_down() {
        let config = Config {
            window_width: 510,
            window_height: 275,
            ..Config::default()
        };
        assert_eq!(config.grid_dimensions(), (25, 13));
    }

    #[test]
    fn test_rejects_zero_scale() {
        let config = Config {
            scale: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_window_smaller_than_cell() {
        let config = Config {
            window_height: 10,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_probability_of_one() {
        let config = Config {
            live_probability: 1.0,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("live probability"));
    }
}
