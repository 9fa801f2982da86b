//! Grid Snake - a terminal snake game
//!
//! This library provides:
//! - Core game logic (game module), free of any I/O
//! - Terminal bell notifications (audio module)
//! - Key mapping (input module) and TUI rendering (render module)
//! - Per-session statistics (metrics module)
//! - The interactive terminal driver (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
