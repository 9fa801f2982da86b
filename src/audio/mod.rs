//! Sound notifications for engine events
//!
//! The terminal has no audio device we can rely on, so "sound" is the
//! terminal bell.

pub mod bell;

pub use bell::{SoundGate, TerminalBell};
