use rand::Rng;

use super::{
    action::{Action, Direction},
    config::GameConfig,
    error::GameError,
};

/// A position on the board, in board units
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

    /// Move position `step` units in a direction
    pub fn moved_in_direction(&self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * step, dy * step)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of `size` with its top-left corner at `pos`
    pub fn square(pos: Position, size: i32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Edge-inclusive overlap: rectangles that only touch count as overlapping
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.bottom() >= other.top()
            && self.top() <= other.bottom()
            && self.right() >= other.left()
            && self.left() <= other.right()
    }

    /// True if `inner` lies entirely within self
    pub fn contains(&self, inner: &Rect) -> bool {
        inner.left() >= self.left()
            && inner.right() <= self.right()
            && inner.top() >= self.top()
            && inner.bottom() <= self.bottom()
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Whole-game lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No heading yet, the snake waits for its first direction
    NotStarted,
    Running,
    /// Terminal
    Over,
}

/// Renderable snapshot of the game after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub head: Rect,
    /// Body segments in follow order, nearest to the head first
    pub body: Vec<Rect>,
    pub fruit: Rect,
    pub score: u32,
    pub game_over: bool,
    pub collision: Option<CollisionType>,
    /// Body index the head ran into, if the game ended on self collision
    pub eaten_segment: Option<usize>,
    /// The head moved this tick; the driver plays the move cue for it
    pub moved: bool,
    pub ate_fruit: bool,
}

impl TickResult {
    pub fn score_text(&self) -> String {
        format!("SCORE: {}", self.score)
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub head: Position,
    /// Body segments, index 0 trails the head directly
    pub body: Vec<Position>,
    pub fruit: Position,
    /// Current heading, `None` until the first direction is accepted
    pub direction: Option<Direction>,
    pub score: u32,
    pub steps: u32,
    pub game_over: bool,
    pub collision: Option<CollisionType>,
    pub eaten_segment: Option<usize>,
}

impl GameState {
    /// Create a new game state with the head centred and no body
    pub fn new(config: GameConfig, fruit: Position) -> Self {
        let head = Position::new(config.board_width / 2, config.board_height / 2);

        Self {
            config,
            head,
            body: Vec::new(),
            fruit,
            direction: None,
            score: 0,
            steps: 0,
            game_over: false,
            collision: None,
            eaten_segment: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::Over
        } else if self.direction.is_none() {
            Phase::NotStarted
        } else {
            Phase::Running
        }
    }

    pub fn tail_length(&self) -> usize {
        self.body.len()
    }

    pub fn head_rect(&self) -> Rect {
        Rect::square(self.head, self.config.cell_size)
    }

    pub fn fruit_rect(&self) -> Rect {
        Rect::square(self.fruit, self.config.fruit_size)
    }

    pub fn board_rect(&self) -> Rect {
        Rect::new(0, 0, self.config.board_width, self.config.board_height)
    }

    /// Run one tick: turn, move, follow, eat, then test for collisions.
    ///
    /// Once the game is over this only returns the final snapshot. The only
    /// error is growing past `max_segments`, which is fatal for the game.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        action: Action,
        rng: &mut R,
    ) -> Result<TickResult, GameError> {
        if self.game_over {
            return Ok(self.snapshot(false, false));
        }

        let direction = match action {
            Action::Move(requested) => self.turned(requested),
            Action::Continue => self.direction,
        };
        let cell = self.config.cell_size;
        let next_head = match direction {
            Some(direction) => self.head.moved_in_direction(direction, cell),
            None => self.head,
        };
        let moved = direction.is_some();

        // Capacity is checked before any field is written
        let ate_fruit = Rect::square(next_head, cell).overlaps(&self.fruit_rect());
        let capacity = self.config.max_segments;
        if ate_fruit && self.body.len() >= capacity {
            return Err(GameError::CapacityExceeded { capacity });
        }

        if direction != self.direction {
            log::debug!("Heading {:?} -> {:?}", self.direction, direction);
            self.direction = direction;
        }

        if moved {
            let previous_head = self.head;
            self.head = next_head;
            self.follow(previous_head);
        }

        if ate_fruit {
            self.grow();
            self.score += 1;
            self.fruit = random_fruit_position(&self.config, rng);
            log::debug!(
                "Fruit eaten, score {} length {}, respawned at ({}, {})",
                self.score,
                self.body.len(),
                self.fruit.x,
                self.fruit.y
            );
        }

        if !self.board_rect().contains(&self.head_rect()) {
            self.end(CollisionType::Wall);
        }

        // A snake that stood still cannot run into itself
        if moved {
            if let Some(index) = self.find_eaten_segment() {
                self.eaten_segment = Some(index);
                self.end(CollisionType::SelfCollision);
            }
        }

        self.steps += 1;

        Ok(self.snapshot(moved, ate_fruit))
    }

    pub fn snapshot(&self, moved: bool, ate_fruit: bool) -> TickResult {
        let cell = self.config.cell_size;

        TickResult {
            head: self.head_rect(),
            body: self.body.iter().map(|pos| Rect::square(*pos, cell)).collect(),
            fruit: self.fruit_rect(),
            score: self.score,
            game_over: self.game_over,
            collision: self.collision,
            eaten_segment: self.eaten_segment,
            moved,
            ate_fruit,
        }
    }

    /// Heading after a `requested` turn; reversing the current heading is ignored
    fn turned(&self, requested: Direction) -> Option<Direction> {
        match self.direction {
            Some(current) if current.is_opposite(requested) => Some(current),
            _ => Some(requested),
        }
    }

    /// Each segment takes the place its leader held before this tick
    fn follow(&mut self, previous_head: Position) {
        let length = self.body.len();
        self.body = std::iter::once(previous_head)
            .chain(self.body.iter().copied())
            .take(length)
            .collect();
    }

    /// Append one segment on top of the current tail end
    fn grow(&mut self) {
        let anchor = self.body.last().copied().unwrap_or(self.head);
        self.body.push(anchor);
    }

    /// First body index past the leading segment that sits on the head
    fn find_eaten_segment(&self) -> Option<usize> {
        self.body
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, pos)| **pos == self.head)
            .map(|(index, _)| index)
    }

    fn end(&mut self, collision: CollisionType) {
        if !self.game_over {
            self.game_over = true;
            self.collision = Some(collision);
        }
    }
}

/// Uniform over the whole board; the snake is not avoided
pub fn random_fruit_position<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Position {
    Position::new(
        rng.gen_range(0..config.board_width),
        rng.gen_range(0..config.board_height),
    )
}
