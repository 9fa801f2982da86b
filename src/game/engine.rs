use super::{
    action::Direction,
    config::{ConfigError, GameConfig, board_side},
    events::{self, GameEvent, GameEventListener},
    state::{CollisionType, GameState, Position},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game is over after this step
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle() -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food: false,
                collision_type: None,
            },
        }
    }
}

/// The game engine: owns the whole simulation state.
///
/// `advance`, `set_direction` and `restart` are the only ways to change the
/// state. Renderers read it through [`GameEngine::state`].
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
    state: GameState,
    listeners: Vec<Box<dyn GameEventListener>>,
}

impl GameEngine<StdRng> {
    /// Create a new engine seeded from OS entropy
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a new engine whose food sequence is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create a new engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let food = random_cell(&mut rng, config.board_size);
        let state = GameState::initial(&config, food);

        Ok(Self {
            config,
            rng,
            state,
            listeners: Vec::new(),
        })
    }

    /// Start from a hand-built position.
    ///
    /// The state's board size is replaced by the configured one.
    #[cfg(test)]
    pub(crate) fn from_state(
        config: GameConfig,
        mut state: GameState,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        state.board_size = config.board_size;

        Ok(Self {
            config,
            rng,
            state,
            listeners: Vec::new(),
        })
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Register a listener for eat and game-over signals
    pub fn subscribe(&mut self, listener: Box<dyn GameEventListener>) {
        self.listeners.push(listener);
    }

    /// Change heading for the next `advance`.
    ///
    /// Reversals are accepted as-is; with a body behind the head they end
    /// the game on the next tick.
    pub fn set_direction(&mut self, direction: Direction) {
        self.state.direction = direction;
    }

    /// Reset to the starting configuration with fresh food
    pub fn restart(&mut self) {
        let food = random_cell(&mut self.rng, self.config.board_size);
        self.state = GameState::initial(&self.config, food);
        info!(?food, "game restarted");
    }

    /// Execute one tick of the game
    pub fn advance(&mut self) -> StepResult {
        if self.state.game_over {
            return StepResult::idle();
        }

        // Calculate new head position
        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.direction);

        if let Some(collision_type) = self.check_collision(new_head) {
            self.state.game_over = true;
            info!(
                ?collision_type,
                score = self.state.score,
                length = self.state.snake.len(),
                "game over"
            );
            self.emit(GameEvent::GameOver);

            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        let ate_food = new_head == self.state.food;

        // Move snake (grow if ate food)
        self.state.snake.advance_to(new_head, ate_food);

        if ate_food {
            self.emit(GameEvent::Eat);
            self.state.food = random_cell(&mut self.rng, self.config.board_size);
            self.state.score += 1;

            if self.state.score % self.config.speedup_every == 0 {
                self.state.speed_ms = self.config.sped_up(self.state.speed_ms);
            }

            debug!(
                score = self.state.score,
                speed_ms = self.state.speed_ms,
                food = ?self.state.food,
                "food eaten"
            );
        }

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    /// Check if the new head position causes a collision.
    ///
    /// Walls are checked first. The body check runs against the pre-move
    /// snake, so the cell the tail is about to leave still counts.
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn emit(&mut self, event: GameEvent) {
        for listener in &mut self.listeners {
            events::dispatch(listener.as_mut(), event);
        }
    }
}

/// Uniform cell on the board; occupied cells are not excluded
fn random_cell<R: Rng>(rng: &mut R, board_size: usize) -> Position {
    let side = board_side(board_size);
    let x = rng.gen_range(0..side);
    let y = rng.gen_range(0..side);
    Position::new(x, y)
}
