use std::io::{self, Stderr, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::game::GameEventListener;

const BELL: &[u8] = b"\x07";

/// Shared on/off switch for sound.
///
/// Starts off; the driver flips it when the player presses start.
#[derive(Debug, Clone, Default)]
pub struct SoundGate {
    enabled: Arc<AtomicBool>,
}

impl SoundGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

/// Rings the terminal bell once per eaten food and twice on game over
pub struct TerminalBell<W = Stderr> {
    out: W,
    gate: SoundGate,
}

impl TerminalBell<Stderr> {
    pub fn stderr(gate: SoundGate) -> Self {
        Self::new(io::stderr(), gate)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, gate: SoundGate) -> Self {
        Self { out, gate }
    }

    fn ring(&mut self, times: usize) {
        if !self.gate.is_enabled() {
            return;
        }

        let result = (0..times)
            .try_for_each(|_| self.out.write_all(BELL))
            .and_then(|_| self.out.flush());

        // Playback failures never reach the game
        if let Err(err) = result {
            debug!(%err, "terminal bell failed");
        }
    }
}

impl<W: Write + Send> GameEventListener for TerminalBell<W> {
    fn on_eat(&mut self) {
        self.ring(1);
    }

    fn on_game_over(&mut self) {
        self.ring(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_silent_until_enabled() {
        let gate = SoundGate::new();
        let mut bell = TerminalBell::new(Vec::new(), gate.clone());

        bell.on_eat();
        bell.on_game_over();
        assert!(bell.out.is_empty());

        gate.enable();
        bell.on_eat();
        assert_eq!(bell.out, b"\x07");
    }

    #[test]
    fn test_game_over_rings_twice() {
        let gate = SoundGate::new();
        gate.enable();
        let mut bell = TerminalBell::new(Vec::new(), gate);

        bell.on_game_over();
        assert_eq!(bell.out, b"\x07\x07");
    }

    #[test]
    fn test_write_errors_are_swallowed() {
        let gate = SoundGate::new();
        gate.enable();
        let mut bell = TerminalBell::new(BrokenPipe, gate);

        bell.on_eat();
        bell.on_game_over();
    }

    #[test]
    fn test_gate_is_shared_between_clones() {
        let gate = SoundGate::new();
        let other = gate.clone();
        assert!(!other.is_enabled());

        gate.enable();
        assert!(other.is_enabled());
    }
}
