//! Per-frame orchestration of the simulation.
//!
//! [`GameLoop`] owns every piece of game state and is driven by the host once
//! per rendered frame. Input is sampled on every frame; the snake only moves
//! on frames where the [`SimulationClock`] fires.

use fastrand::Rng;
use snake_common::{Cell, GRID_HEIGHT, GRID_WIDTH};
use tracing::{debug, info};

use crate::clock::SimulationClock;
use crate::direction::{Direction, DirectionQueue};
use crate::food::place_food;
use crate::grid_mask::GridMask;
use crate::input::DirectionInput;
use crate::settings::GameSettings;
use crate::snake::SnakeBody;

/// Receives the occupancy grid once per frame.
pub trait RenderSink {
    /// Draws one cell per set bit. `rows[0]` is the bottom row.
    fn draw(&mut self, grid_width: u32, grid_height: u32, rows: &[u32; GRID_HEIGHT]);
}

/// Whether the game is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// The snake is alive
    #[default]
    Running,
    /// Terminal state; carries the final snake length
    GameOver {
        /// Final length
        score: usize,
        /// What ended the game
        cause: GameOverCause,
    },
}

impl GameState {
    /// Returns true once the game has ended.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self, Self::GameOver { .. })
    }

    /// Final score, if the game has ended.
    #[must_use]
    pub const fn score(&self) -> Option<usize> {
        match self {
            Self::GameOver { score, .. } => Some(*score),
            Self::Running => None,
        }
    }
}

/// Reason the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Head left the board
    OutOfBounds,
    /// Head ran into the body
    SelfCollision,
    /// No free cell left for food
    BoardFull,
}

/// Summary of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// State after the frame
    pub state: GameState,
    /// Whether the snake moved this frame
    pub ticked: bool,
    /// Whether food was eaten this frame
    pub ate: bool,
}

/// The game: body, turn queue, food and tick gate.
#[derive(Debug)]
pub struct GameLoop {
    body: SnakeBody,
    queue: DirectionQueue,
    mask: GridMask,
    clock: SimulationClock,
    food: Cell,
    state: GameState,
    rng: Rng,
    ticks: u64,
}

impl GameLoop {
    /// Starts a new game at time `start` (seconds).
    #[must_use]
    pub fn new(settings: &GameSettings, start: f64) -> Self {
        let mut rng = settings.seed.map_or_else(Rng::new, Rng::with_seed);
        let body = SnakeBody::new();

        let mut mask = GridMask::new();
        mask.rebuild(&body, body.head());
        // A fresh board always has room
        let food = place_food(&mut rng, &mask)
            .unwrap_or(Cell::new(GRID_WIDTH as i32 - 1, GRID_HEIGHT as i32 - 1));

        info!(
            "New game: {} ticks/s, food at ({}, {})",
            settings.ticks_per_second, food.x, food.y
        );

        Self::from_parts(body, food, Direction::Up, rng, settings.ticks_per_second, start)
    }

    /// Builds a game from explicit state.
    #[must_use]
    pub fn from_parts(
        body: SnakeBody,
        food: Cell,
        direction: Direction,
        rng: Rng,
        ticks_per_second: f32,
        start: f64,
    ) -> Self {
        let mut mask = GridMask::new();
        mask.rebuild(&body, food);

        Self {
            body,
            queue: DirectionQueue::new(direction),
            mask,
            clock: SimulationClock::new(start, ticks_per_second),
            food,
            state: GameState::Running,
            rng,
            ticks: 0,
        }
    }

    /// Runs one frame.
    ///
    /// Queues the pressed turns, renders the current board, then advances
    /// the snake if a tick is due. Does nothing once the game is over.
    pub fn frame<S: RenderSink + ?Sized>(
        &mut self,
        input: &DirectionInput,
        now: f64,
        sink: &mut S,
    ) -> FrameReport {
        if self.state.is_over() {
            return FrameReport {
                state: self.state,
                ticked: false,
                ate: false,
            };
        }

        for direction in input.directions() {
            self.queue.enqueue(direction);
        }

        self.mask.rebuild(&self.body, self.food);
        sink.draw(GRID_WIDTH as u32, GRID_HEIGHT as u32, self.mask.rows());

        let mut report = FrameReport {
            state: self.state,
            ticked: false,
            ate: false,
        };

        if self.clock.poll(now) {
            report.ticked = true;
            report.ate = self.tick();
            report.state = self.state;
        }

        report
    }

    /// Moves the snake one cell. Returns whether food was eaten.
    fn tick(&mut self) -> bool {
        let direction = self.queue.dequeue_if_due();
        self.body.advance(direction);
        self.ticks += 1;

        let head = self.body.head();
        let mut ate = false;

        if head == self.food {
            self.body.grow();
            ate = true;
            debug!("Ate food at ({}, {}), length {}", head.x, head.y, self.body.len());

            self.mask.rebuild(&self.body, self.food);
            match place_food(&mut self.rng, &self.mask) {
                Some(food) => self.food = food,
                None => {
                    self.finish(GameOverCause::BoardFull);
                    return ate;
                },
            }
        }

        if SnakeBody::out_of_bounds(head) {
            self.finish(GameOverCause::OutOfBounds);
        } else if self.body.self_collision(head) {
            self.finish(GameOverCause::SelfCollision);
        }

        ate
    }

    fn finish(&mut self, cause: GameOverCause) {
        let score = self.body.len();
        self.state = GameState::GameOver { score, cause };
        info!("Game over ({cause:?}) after {} ticks, score {score}", self.ticks);
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns true once the host should stop the loop.
    #[must_use]
    pub const fn should_terminate(&self) -> bool {
        self.state.is_over()
    }

    /// The snake.
    #[must_use]
    pub const fn body(&self) -> &SnakeBody {
        &self.body
    }

    /// Current food cell.
    #[must_use]
    pub const fn food(&self) -> Cell {
        self.food
    }

    /// Occupancy mask as of the last frame.
    #[must_use]
    pub const fn mask(&self) -> &GridMask {
        &self.mask
    }

    /// Pending turns.
    #[must_use]
    pub const fn queue(&self) -> &DirectionQueue {
        &self.queue
    }

    /// Current score (snake length).
    #[must_use]
    pub fn score(&self) -> usize {
        self.body.len()
    }
}
