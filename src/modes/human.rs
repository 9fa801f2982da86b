use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{info, warn};

use crate::audio::{SoundGate, TerminalBell};
use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

use super::schedule::TickSchedule;

/// Session options that live outside the game rules
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Seed for a reproducible food sequence
    pub seed: Option<u64>,
    /// Never ring the bell, even after start
    pub mute: bool,
}

pub struct HumanMode {
    engine: GameEngine,
    schedule: TickSchedule,
    sound: SoundGate,
    mute: bool,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, options: SessionOptions) -> Result<Self> {
        let mut engine = match options.seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        }
        .context("Invalid game configuration")?;

        let sound = SoundGate::new();
        engine.subscribe(Box::new(TerminalBell::stderr(sound.clone())));

        Ok(Self {
            schedule: TickSchedule::new(engine.state()),
            engine,
            sound,
            mute: options.mute,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        let cleanup = self.cleanup_terminal(&mut terminal);

        finish(result, cleanup)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            let deadline = self.schedule.deadline();

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, paced by the current speed
                _ = wait_until(deadline) => {
                    self.on_tick(Instant::now());
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let started = self.schedule.is_started();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.state(), &self.metrics, started);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(
                    games_played = self.metrics.games_played,
                    best_score = self.metrics.best_score,
                    "quitting"
                );
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => self.engine.set_direction(direction),
                KeyAction::Start => self.start(Instant::now()),
                KeyAction::Restart => self.restart(Instant::now()),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn start(&mut self, now: Instant) {
        if !self.schedule.start(now, self.engine.state()) {
            return;
        }
        if !self.mute {
            self.sound.enable();
        }
        self.metrics.on_game_start();
        info!(sound = !self.mute, "session started");
    }

    fn on_tick(&mut self, now: Instant) {
        let speed_before = self.engine.state().speed_ms;
        let result = self.engine.advance();
        let state = self.engine.state();

        if result.info.collision_type.is_some() {
            self.metrics.on_game_over(state.score);
        }
        if state.speed_ms != speed_before {
            info!(from = speed_before, to = state.speed_ms, "speed up");
        }

        self.schedule.sync(now, state);
    }

    fn restart(&mut self, now: Instant) {
        self.engine.restart();
        if self.schedule.is_started() {
            self.metrics.on_game_start();
        }
        self.schedule.sync(now, self.engine.state());
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// A game loop failure takes precedence over a cleanup failure
fn finish(result: Result<()>, cleanup: Result<()>) -> Result<()> {
    match (result, cleanup) {
        (Err(err), Err(cleanup_err)) => {
            warn!(error = %cleanup_err, "failed to restore terminal");
            Err(err)
        }
        (Ok(()), cleanup) => cleanup,
        (result, Ok(())) => result,
    }
}

/// Sleep until `deadline`, or forever when nothing is scheduled
async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}
