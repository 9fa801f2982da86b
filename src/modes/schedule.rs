use std::time::{Duration, Instant};

use crate::game::GameState;

/// Clock that decides when the next tick is due.
///
/// The period is never fixed: it is re-read from the game state after every
/// tick and restart, so speed-ups take effect on the very next interval.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    started: bool,
    period: Duration,
    next: Option<Instant>,
}

impl TickSchedule {
    /// A schedule that waits for [`TickSchedule::start`]
    pub fn new(state: &GameState) -> Self {
        Self {
            started: false,
            period: Duration::from_millis(state.speed_ms),
            next: None,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// One-shot start. Returns false if the schedule was already started.
    pub fn start(&mut self, now: Instant, state: &GameState) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.sync(now, state);
        true
    }

    /// Reschedule from the latest state; disarms on game over
    pub fn sync(&mut self, now: Instant, state: &GameState) {
        self.period = Duration::from_millis(state.speed_ms);
        self.next = (self.started && !state.game_over).then(|| now + self.period);
    }

    /// When the next tick is due, if one is scheduled at all
    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
