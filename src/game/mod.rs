//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A driver feeds it ticks and direction changes and reads the state back.

pub mod action;
pub mod config;
pub mod engine;
pub mod events;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, GameConfig, MAX_BOARD_SIZE};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use events::{GameEvent, GameEventListener};
pub use state::{CollisionType, GameState, Position, Snake};
