use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::config::board_side;
use crate::game::{GameState, Position};
use crate::metrics::GameMetrics;

/// What occupies a board cell, in drawing priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    SnakeHead,
    SnakeBody,
    Food,
    Empty,
}

impl CellKind {
    /// Snake segments hide food sitting underneath them
    pub fn at(state: &GameState, pos: Position) -> Self {
        if pos == state.snake.head() {
            CellKind::SnakeHead
        } else if state.is_occupied_by_snake(pos) {
            CellKind::SnakeBody
        } else if pos == state.food {
            CellKind::Food
        } else {
            CellKind::Empty
        }
    }

    fn span(self) -> Span<'static> {
        match self {
            CellKind::SnakeHead => Span::styled(
                "██",
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            ),
            CellKind::SnakeBody => Span::styled("██", Style::default().fg(Color::Green)),
            CellKind::Food => Span::styled(
                "● ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            CellKind::Empty => Span::styled("· ", Style::default().fg(Color::DarkGray)),
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame. `started` is false until the player presses start.
    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        started: bool,
    ) {
        let [header, status, board, footer] = Layout::vertical([
            Constraint::Length(2), // Stats
            Constraint::Length(2), // Status message
            Constraint::Min(0),    // Game area
            Constraint::Length(1), // Controls
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(state, metrics), header);
        frame.render_widget(self.render_status(state, started), status);

        // Two terminal columns per cell keep the board roughly square
        let side = u16::try_from(state.board_size).unwrap_or(u16::MAX);
        let width = side.saturating_mul(2).saturating_add(2);
        let [board] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(board);
        let [board] = Layout::vertical([Constraint::Length(side.saturating_add(2))])
            .flex(Flex::Start)
            .areas(board);
        frame.render_widget(self.render_grid(state), board);

        frame.render_widget(self.render_controls(), footer);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        let size = board_side(state.board_size);
        let lines: Vec<Line> = (0..size)
            .map(|y| {
                Line::from(
                    (0..size)
                        .map(|x| CellKind::at(state, Position::new(x, y)).span())
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let border = if state.game_over {
            Color::Red
        } else {
            Color::White
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{} ms", state.speed_ms), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_status(&self, state: &GameState, started: bool) -> Paragraph<'static> {
        let key = |k: &'static str, color: Color| {
            Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };
        let gray = Style::default().fg(Color::Gray);

        let line = if state.game_over {
            Line::from(vec![
                key("GAME OVER", Color::Red),
                Span::styled("  Press ", gray),
                key("R", Color::Green),
                Span::styled(" to restart or ", gray),
                key("Q", Color::Red),
                Span::styled(" to quit", gray),
            ])
        } else if !started {
            Line::from(vec![
                Span::styled("Press ", gray),
                key("Space", Color::Green),
                Span::styled(" to start with sound", gray),
            ])
        } else {
            Line::from("")
        };

        Paragraph::new(line).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
