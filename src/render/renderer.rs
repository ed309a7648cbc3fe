use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameConfig, Rect, TickResult};

/// What occupies one terminal cell of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Fruit,
    Body,
    Head,
    /// The segment the head ran into
    Eaten,
}

/// Rasterise a snapshot onto the board's cell grid, indexed `[row][column]`.
///
/// Later layers win: fruit, body, head, then the eaten segment. Anything off
/// the board (a head that crossed the wall) is dropped.
pub fn cell_grid(result: &TickResult, config: &GameConfig) -> Vec<Vec<Cell>> {
    let (columns, rows) = config.grid_size();
    let mut grid = vec![vec![Cell::Empty; columns as usize]; rows as usize];

    let mut paint = |rect: &Rect, cell: Cell| {
        let column = rect.x.div_euclid(config.cell_size);
        let row = rect.y.div_euclid(config.cell_size);
        if (0..columns as i32).contains(&column) && (0..rows as i32).contains(&row) {
            grid[row as usize][column as usize] = cell;
        }
    };

    paint(&result.fruit, Cell::Fruit);
    for segment in &result.body {
        paint(segment, Cell::Body);
    }
    paint(&result.head, Cell::Head);
    if let Some(segment) = result.eaten_segment.and_then(|index| result.body.get(index)) {
        paint(segment, Cell::Eaten);
    }

    grid
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, result: &TickResult, config: &GameConfig) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Score
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_score(result), chunks[0]);
        frame.render_widget(self.render_board(result, config), chunks[1]);
        frame.render_widget(self.render_controls(result), chunks[2]);
    }

    fn render_board(&self, result: &TickResult, config: &GameConfig) -> Paragraph<'static> {
        let lines: Vec<Line<'static>> = cell_grid(result, config)
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(cell_span).collect::<Vec<_>>()))
            .collect();

        let (title, border) = if result.game_over {
            (" GAME OVER ", Color::Red)
        } else {
            (" ColorSnake ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_score(&self, result: &TickResult) -> Paragraph<'static> {
        let line = Line::from(vec![Span::styled(
            result.score_text(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )]);

        Paragraph::new(line).alignment(Alignment::Center)
    }

    fn render_controls(&self, result: &TickResult) -> Paragraph<'static> {
        let line = if result.game_over {
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ])
        } else {
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        };

        Paragraph::new(line).alignment(Alignment::Center)
    }
}

fn cell_span(cell: Cell) -> Span<'static> {
    match cell {
        Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        Cell::Fruit => Span::styled(
            "● ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Cell::Body => Span::styled("□ ", Style::default().fg(Color::White)),
        Cell::Head => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Cell::Eaten => Span::styled(
            "■ ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, Direction, GameState, Position};
    use rand::{SeedableRng, rngs::StdRng};

    fn config() -> GameConfig {
        GameConfig::new(100, 60)
    }

    #[test]
    fn test_grid_layers() {
        let mut state = GameState::new(config(), Position::new(5, 47));
        state.body = vec![Position::new(40, 20), Position::new(20, 20)];

        let grid = cell_grid(&state.snapshot(false, false), &config());

        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0].len(), 5);
        assert_eq!(grid[1][2], Cell::Head);
        assert_eq!(grid[1][1], Cell::Body);
        assert_eq!(grid[1][2 - 2], Cell::Empty);
        assert_eq!(grid[2][0], Cell::Fruit);
    }

    #[test]
    fn test_eaten_segment_highlighted() {
        let mut state = GameState::new(config(), Position::new(80, 40));
        state.head = Position::new(20, 20);
        state.direction = Some(Direction::Left);
        state.body = vec![
            Position::new(40, 20),
            Position::new(20, 0),
            Position::new(0, 20),
            Position::new(0, 0),
        ];

        let result = state
            .advance(Action::Continue, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let grid = cell_grid(&result, &config());

        assert_eq!(result.eaten_segment, Some(3));
        assert_eq!(grid[1][0], Cell::Eaten);
        assert_eq!(grid[1][1], Cell::Body);
    }

    #[test]
    fn test_head_off_board_is_dropped() {
        let mut state = GameState::new(config(), Position::new(80, 40));
        state.head = Position::new(0, 20);

        let result = state
            .advance(Action::Move(Direction::Left), &mut StdRng::seed_from_u64(1))
            .unwrap();
        let grid = cell_grid(&result, &config());

        assert!(result.game_over);
        assert!(grid.iter().flatten().all(|cell| *cell != Cell::Head));
    }
}
