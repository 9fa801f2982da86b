//! Side-effect signals emitted by the engine
//!
//! The engine never plays sounds or draws anything itself. It notifies
//! subscribed listeners, which decide what an event means to them.

/// Something noteworthy happened during `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The snake ate the food
    Eat,
    /// The snake hit a wall or itself
    GameOver,
}

/// Subscriber to engine signals.
///
/// Listeners must not fail: anything that can go wrong on their side is
/// theirs to swallow.
pub trait GameEventListener: Send {
    fn on_eat(&mut self) {}

    fn on_game_over(&mut self) {}
}

/// Forward an event to the matching listener callback
pub(crate) fn dispatch(listener: &mut dyn GameEventListener, event: GameEvent) {
    match event {
        GameEvent::Eat => listener.on_eat(),
        GameEvent::GameOver => listener.on_game_over(),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Recorder;
    use super::*;

    #[test]
    fn test_dispatch_routes_events() {
        let mut recorder = Recorder::default();
        dispatch(&mut recorder, GameEvent::Eat);
        dispatch(&mut recorder, GameEvent::GameOver);
        dispatch(&mut recorder, GameEvent::Eat);

        assert_eq!(
            recorder.events(),
            vec![GameEvent::Eat, GameEvent::GameOver, GameEvent::Eat]
        );
    }

    #[test]
    fn test_default_callbacks_do_nothing() {
        struct Silent;
        impl GameEventListener for Silent {}

        let mut silent = Silent;
        dispatch(&mut silent, GameEvent::Eat);
        dispatch(&mut silent, GameEvent::GameOver);
    }
}
