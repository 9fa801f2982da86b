use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Position;

/// Largest board the terminal renderer can show
pub const MAX_BOARD_SIZE: usize = 255;

/// Board side as a coordinate bound, saturating for unvalidated sizes
pub(crate) fn board_side(board_size: usize) -> i32 {
    i32::try_from(board_size).unwrap_or(i32::MAX)
}

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The board must contain at least one cell
    #[error("board size must be at least 1")]
    EmptyBoard,

    /// Coordinates and the renderer both need a bounded board
    #[error("board size {size} exceeds the maximum of {max}")]
    BoardTooLarge { size: usize, max: usize },

    /// A zero interval would never speed up
    #[error("speed-up interval must be at least 1 food")]
    ZeroSpeedupInterval,

    /// The tick interval floor must be positive
    #[error("minimum speed must be at least 1 ms")]
    ZeroMinSpeed,

    /// Starting slower than the floor is allowed, starting faster is not
    #[error("initial speed {initial_ms} ms is below the minimum of {min_ms} ms")]
    InitialBelowMin { initial_ms: u64, min_ms: u64 },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square board, in cells
    pub board_size: usize,
    /// Tick interval at the start of every game
    pub initial_speed_ms: u64,
    /// Tick interval never drops below this
    pub min_speed_ms: u64,
    /// How much the tick interval shrinks on each speed-up
    pub speed_step_ms: u64,
    /// Speed up whenever the score reaches a multiple of this
    pub speedup_every: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            initial_speed_ms: 200,
            min_speed_ms: 60,
            speed_step_ms: 20,
            speedup_every: 5,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Check the values the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge {
                size: self.board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        if self.speedup_every == 0 {
            return Err(ConfigError::ZeroSpeedupInterval);
        }
        if self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroMinSpeed);
        }
        if self.initial_speed_ms < self.min_speed_ms {
            return Err(ConfigError::InitialBelowMin {
                initial_ms: self.initial_speed_ms,
                min_ms: self.min_speed_ms,
            });
        }
        Ok(())
    }

    /// Cell the snake starts on: the board center
    pub fn start_position(&self) -> Position {
        let center = board_side(self.board_size) / 2;
        Position::new(center, center)
    }

    /// Speed after a speed-up, clamped to the floor
    pub fn sped_up(&self, speed_ms: u64) -> u64 {
        speed_ms
            .saturating_sub(self.speed_step_ms)
            .max(self.min_speed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 20);
        assert_eq!(config.initial_speed_ms, 200);
        assert_eq!(config.min_speed_ms, 60);
        assert_eq!(config.speed_step_ms, 20);
        assert_eq!(config.speedup_every, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.board_size, 15);
        assert_eq!(config.initial_speed_ms, 200);
    }

    #[test]
    fn test_start_position_is_center() {
        assert_eq!(GameConfig::default().start_position(), Position::new(10, 10));
        assert_eq!(GameConfig::new(7).start_position(), Position::new(3, 3));
        assert_eq!(GameConfig::new(1).start_position(), Position::new(0, 0));
    }

    #[test]
    fn test_sped_up_is_floored() {
        let config = GameConfig::default();
        assert_eq!(config.sped_up(200), 180);
        assert_eq!(config.sped_up(80), 60);
        assert_eq!(config.sped_up(70), 60);
        assert_eq!(config.sped_up(60), 60);
        assert_eq!(config.sped_up(10), 60);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(GameConfig::new(0).validate(), Err(ConfigError::EmptyBoard));
        assert!(GameConfig::new(MAX_BOARD_SIZE).validate().is_ok());

        let past_u32 = (u32::MAX as usize).saturating_add(3);
        for size in [MAX_BOARD_SIZE + 1, 100_000, past_u32, usize::MAX] {
            assert_eq!(
                GameConfig::new(size).validate(),
                Err(ConfigError::BoardTooLarge {
                    size,
                    max: MAX_BOARD_SIZE
                })
            );
        }

        let config = GameConfig {
            speedup_every: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpeedupInterval));

        let config = GameConfig {
            min_speed_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMinSpeed));

        let config = GameConfig {
            initial_speed_ms: 50,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialBelowMin {
                initial_ms: 50,
                min_ms: 60
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InitialBelowMin {
            initial_ms: 50,
            min_ms: 60,
        };
        assert_eq!(
            err.to_string(),
            "initial speed 50 ms is below the minimum of 60 ms"
        );
    }
}
