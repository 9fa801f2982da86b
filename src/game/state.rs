use std::collections::VecDeque;

use super::action::Direction;
use super::config::{GameConfig, board_side};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake in the game.
///
/// Segments are stored head first. A snake always has at least one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from segments listed head first.
    ///
    /// Returns `None` for an empty list.
    pub fn from_segments<I>(segments: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<Position>,
    {
        let body: VecDeque<Position> = segments.into_iter().map(Into::into).collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Iterate over the segments, head first
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head, dropping the tail unless the snake grows
    pub fn advance_to(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake has no segments
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state, as handed out to renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub direction: Direction,
    pub board_size: usize,
    pub score: u32,
    /// Current tick interval in milliseconds
    pub speed_ms: u64,
    pub game_over: bool,
}

impl GameState {
    /// Starting state for a game: one segment at the center, heading right
    pub fn initial(config: &GameConfig, food: Position) -> Self {
        Self::new(
            Snake::new(config.start_position()),
            food,
            Direction::Right,
            config,
        )
    }

    /// Create a running state with zero score and the configured start speed
    pub fn new(snake: Snake, food: Position, direction: Direction, config: &GameConfig) -> Self {
        Self {
            snake,
            food,
            direction,
            board_size: config.board_size,
            score: 0,
            speed_ms: config.initial_speed_ms,
            game_over: false,
        }
    }

    /// Check if a position is within the board
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = board_side(self.board_size);
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_from_segments() {
        let snake = Snake::from_segments([(5, 5), (4, 5), (3, 5)]).unwrap();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));

        assert!(Snake::from_segments(Vec::<Position>::new()).is_none());
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::from_segments([(5, 5), (4, 5), (3, 5)]).unwrap();

        // Move without growing
        snake.advance_to(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));

        // Move with growing
        snake.advance_to(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn test_single_segment_snake() {
        let mut snake = Snake::new(Position::new(2, 2));
        assert_eq!(snake.head(), snake.tail());
        assert!(!snake.is_empty());

        snake.advance_to(Position::new(2, 3), false);
        assert_eq!(snake.segments().collect::<Vec<_>>(), vec![Position::new(2, 3)]);
    }

    #[test]
    fn test_occupies_includes_head_and_tail() {
        let snake = Snake::from_segments([(5, 5), (4, 5), (3, 5)]).unwrap();
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(4, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::initial(&GameConfig::default(), Position::new(1, 1));

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::initial(&GameConfig::default(), Position::new(3, 4));
        assert_eq!(state.snake.segments().collect::<Vec<_>>(), vec![Position::new(10, 10)]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_ms, 200);
        assert!(!state.game_over);
        assert!(state.is_occupied_by_snake(Position::new(10, 10)));
    }
}
