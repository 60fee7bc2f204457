use crate::config::{check_grid_size, GameSettings, SettingsError};
use crate::games::SessionRng;
use crate::{debug_log, log};
use super::snake::Snake;
use super::types::{DeathReason, Direction, Point, StepOutcome};

pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Single-player snake simulation on a square grid.
///
/// Driven from outside: zero or more `set_direction` calls followed by one
/// `step` per tick. Once the snake dies every call except `reset` is a no-op.
#[derive(Clone, Debug)]
pub struct GameState {
    grid_size: usize,
    snake: Snake,
    direction: Direction,
    pending_direction: Direction,
    food: Point,
    score: u32,
    ticks: u64,
    death_reason: Option<DeathReason>,
    rng: SessionRng,
}

impl GameState {
    pub fn new(grid_size: usize, rng: SessionRng) -> Result<Self, SettingsError> {
        check_grid_size(grid_size)?;

        let center = Self::center(grid_size);
        let mut state = Self {
            grid_size,
            snake: Snake::new(center),
            direction: INITIAL_DIRECTION,
            pending_direction: INITIAL_DIRECTION,
            food: center,
            score: 0,
            ticks: 0,
            death_reason: None,
            rng,
        };
        state.food = state.spawn_food();
        Ok(state)
    }

    pub fn from_settings(settings: &GameSettings) -> Result<Self, SettingsError> {
        let rng = settings
            .seed
            .map(SessionRng::new)
            .unwrap_or_else(SessionRng::from_random);
        Self::new(settings.grid_size, rng)
    }

    fn center(grid_size: usize) -> Point {
        let mid = (grid_size / 2) as i32;
        Point::new(mid, mid)
    }

    /// Back to the initial layout. The random stream carries on, it is not
    /// reseeded.
    pub fn reset(&mut self) {
        let center = Self::center(self.grid_size);
        self.snake = Snake::new(center);
        self.direction = INITIAL_DIRECTION;
        self.pending_direction = INITIAL_DIRECTION;
        self.score = 0;
        self.ticks = 0;
        self.death_reason = None;
        self.food = self.spawn_food();
    }

    /// Queues the heading for the next `step`. Reversals of the current
    /// heading and requests after death are ignored. Returns whether the
    /// request was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.is_game_over() || direction.is_opposite(&self.direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    pub fn step(&mut self) -> StepOutcome {
        if self.is_game_over() {
            return StepOutcome::Frozen;
        }

        self.direction = self.pending_direction;
        let new_head = self.snake.head().moved(self.direction);

        if let Some(reason) = self.collision_at(new_head) {
            self.death_reason = Some(reason);
            log!(
                "Snake died at ({}, {}): {:?}. Score: {}",
                new_head.x,
                new_head.y,
                reason,
                self.score
            );
            return StepOutcome::Died(reason);
        }

        self.snake.push_head(new_head);
        self.ticks += 1;

        if new_head == self.food {
            self.score += 1;
            self.food = self.spawn_food();
            debug_log!(
                "Ate food at ({}, {}). Score: {}",
                new_head.x,
                new_head.y,
                self.score
            );
            StepOutcome::AteFood
        } else {
            self.snake.pop_tail();
            StepOutcome::Moved
        }
    }

    /// Checked against the body before it moves, so the current tail cell is
    /// still occupied.
    fn collision_at(&self, pos: Point) -> Option<DeathReason> {
        if !self.is_in_bounds(pos) {
            return Some(DeathReason::WallCollision);
        }
        if self.snake.collides_with_body(pos) {
            return Some(DeathReason::SelfCollision);
        }
        None
    }

    /// Whether moving the head onto `pos` this tick would keep the snake alive.
    pub fn is_safe(&self, pos: Point) -> bool {
        self.collision_at(pos).is_none()
    }

    pub fn is_in_bounds(&self, pos: Point) -> bool {
        let size = self.grid_size as i32;
        (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
    }

    // Terminates while the grid has a free cell; grid size validation keeps
    // that true at construction and no win condition is modelled.
    fn spawn_food(&mut self) -> Point {
        let size = self.grid_size as i32;
        loop {
            let x = self.rng.random_range(0..size);
            let y = self.rng.random_range(0..size);
            let pos = Point::new(x, y);

            if !self.snake.occupies(pos) {
                debug_log!("Food spawned at ({}, {})", pos.x, pos.y);
                return pos;
            }
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_body(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.snake.body().iter().copied()
    }

    pub fn head(&self) -> Point {
        self.snake.head()
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn is_game_over(&self) -> bool {
        self.death_reason.is_some()
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[cfg(test)]
    pub(crate) fn with_snake(
        grid_size: usize,
        segments: &[Point],
        direction: Direction,
        food: Point,
        rng: SessionRng,
    ) -> Self {
        Self {
            grid_size,
            snake: Snake::from_segments(segments.iter().copied()),
            direction,
            pending_direction: direction,
            food,
            score: 0,
            ticks: 0,
            death_reason: None,
            rng,
        }
    }
}
