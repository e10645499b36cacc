//! Gameplay settings.

use serde::{Deserialize, Serialize};

use crate::clock::DEFAULT_TICKS_PER_SECOND;

/// Slowest allowed speed.
pub const MIN_TICKS_PER_SECOND: f32 = 1.0;

/// Fastest allowed speed.
pub const MAX_TICKS_PER_SECOND: f32 = 60.0;

/// Settings consumed by the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Snake speed in cells per second
    pub ticks_per_second: f32,
    /// Seed for food placement (None = random)
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            seed: None,
        }
    }
}

impl GameSettings {
    /// Clamp values to playable ranges.
    pub fn validate(&mut self) {
        if !self.ticks_per_second.is_finite() {
            self.ticks_per_second = DEFAULT_TICKS_PER_SECOND;
        }
        self.ticks_per_second = self
            .ticks_per_second
            .clamp(MIN_TICKS_PER_SECOND, MAX_TICKS_PER_SECOND);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_speed() {
        let settings = GameSettings::default();
        assert!((settings.ticks_per_second - 7.5).abs() < f32::EPSILON);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_validate_clamps() {
        let mut settings = GameSettings {
            ticks_per_second: 500.0,
            seed: Some(1),
        };
        settings.validate();
        assert!((settings.ticks_per_second - MAX_TICKS_PER_SECOND).abs() < f32::EPSILON);

        settings.ticks_per_second = f32::NAN;
        settings.validate();
        assert!((settings.ticks_per_second - DEFAULT_TICKS_PER_SECOND).abs() < f32::EPSILON);
    }
}
