use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::{
    BASE_TICK_DELAY, GridSize, INITIAL_SNAKE_LENGTH, MIN_SPEED_FACTOR, SPEED_DECAY,
};
use crate::error::{GameError, SpawnError};
use crate::food::Food;
use crate::input::Command;
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Playing,
    GameOverWaiting,
    Terminated,
}

/// Why the current life ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    Wall,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// Complete mutable game state for one process run.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    /// Best score seen since process start; survives restarts.
    pub high_score: u32,
    pub speed_factor: f64,
    pub phase: Phase,
    pub end_reason: Option<EndReason>,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a state whose food placement is seeded from OS entropy.
    pub fn new(bounds: GridSize) -> Result<Self, GameError> {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible runs.
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Result<Self, GameError> {
        if bounds.width < 4 || bounds.height == 0 || bounds.total_cells() <= INITIAL_SNAKE_LENGTH
        {
            return Err(GameError::BoardTooSmall {
                width: bounds.width,
                height: bounds.height,
            });
        }

        let snake = Snake::centered(bounds);
        let food = Food::spawn(&mut rng, bounds, &snake)?;

        Ok(Self {
            snake,
            food,
            score: 0,
            high_score: 0,
            speed_factor: 1.0,
            phase: Phase::Playing,
            end_reason: None,
            bounds,
            rng,
        })
    }

    /// Board dimensions this state was created with.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// False once a quit command has been seen.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase != Phase::Terminated
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOverWaiting
    }

    /// Sleep between two playing ticks; shrinks as the speed factor decays.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        BASE_TICK_DELAY.mul_f64(self.speed_factor)
    }

    /// Starts a new life. The high score is kept.
    pub fn restart(&mut self) {
        self.snake.reset(self.bounds);
        self.score = 0;
        self.speed_factor = 1.0;
        self.phase = Phase::Playing;
        self.end_reason = None;
        self.respawn_food();

        info!(high_score = self.high_score, "game restarted");
    }

    /// Handles one decoded command and, while playing, advances one tick.
    ///
    /// Quit and restart take effect immediately and skip this tick's
    /// movement.
    pub fn step(&mut self, command: Command) {
        let playing = self.phase == Phase::Playing;
        self.apply_command(command);

        if playing && matches!(command, Command::Idle | Command::Move(_)) {
            self.tick();
        }
    }

    /// Applies one command without advancing the simulation.
    ///
    /// After a game over only restart and quit are honoured.
    pub fn apply_command(&mut self, command: Command) {
        match (self.phase, command) {
            (Phase::Terminated, _) => {}
            (_, Command::Quit) => self.phase = Phase::Terminated,
            (_, Command::Restart) => self.restart(),
            (Phase::Playing, Command::Move(direction)) => self.snake.set_direction(direction),
            (_, Command::Move(_) | Command::Idle) => {}
        }
    }

    /// Advances the simulation by one cell.
    pub fn tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }

        let eats = self.snake.next_head_position() == self.food.position;
        self.snake.advance(eats);

        if !self.snake.head().is_within_bounds(self.bounds) {
            self.end_life(EndReason::Wall);
            return;
        }

        if self.snake.collides_with_self() {
            self.end_life(EndReason::SelfCollision);
            return;
        }

        if eats {
            self.eat_food();
        }
    }

    fn eat_food(&mut self) {
        self.score += 1;
        self.high_score = self.high_score.max(self.score);

        if self.speed_factor > MIN_SPEED_FACTOR {
            self.speed_factor = (self.speed_factor * SPEED_DECAY).max(MIN_SPEED_FACTOR);
        }

        debug!(
            score = self.score,
            length = self.snake.len(),
            speed_factor = self.speed_factor,
            "food eaten"
        );

        self.respawn_food();
    }

    fn respawn_food(&mut self) {
        match Food::spawn(&mut self.rng, self.bounds, &self.snake) {
            Ok(food) => self.food = food,
            Err(SpawnError::BoardFull) => self.end_life(EndReason::BoardFilled),
        }
    }

    fn end_life(&mut self, reason: EndReason) {
        self.phase = Phase::GameOverWaiting;
        self.end_reason = Some(reason);

        info!(
            score = self.score,
            high_score = self.high_score,
            ?reason,
            "game over"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::{BASE_TICK_DELAY, GridSize, INITIAL_SNAKE_LENGTH, MIN_SPEED_FACTOR};
    use crate::error::GameError;
    use crate::food::Food;
    use crate::input::{Command, Direction};
    use crate::snake::{Position, Snake};

    use super::{EndReason, GameState, Phase};

    fn board_state(seed: u64) -> GameState {
        GameState::new_with_seed(GridSize::BOARD, seed).unwrap()
    }

    /// Puts the food right in front of the head.
    fn feed(state: &mut GameState) {
        state.food = Food::new(state.snake.next_head_position());
    }

    #[test]
    fn new_state_starts_playing_with_centered_snake() {
        let state = board_state(1);

        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.snake, Snake::centered(GridSize::BOARD));
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_factor, 1.0);
        assert!(!state.snake.occupies(state.food.position));
        assert!(state.is_running());
        assert!(!state.is_game_over());
    }

    #[test]
    fn entropy_seeded_state_plays_on_the_fixed_board() {
        let state = GameState::new(GridSize::BOARD).unwrap();

        assert_eq!(state.bounds(), GridSize::BOARD);
        assert_eq!(state.snake, Snake::centered(GridSize::BOARD));
        assert!(state.food.position.is_within_bounds(GridSize::BOARD));
        assert!(!state.snake.occupies(state.food.position));
    }

    #[test]
    fn tiny_boards_are_rejected() {
        let result = GameState::new_with_seed(GridSize { width: 3, height: 5 }, 0);
        assert_eq!(
            result.unwrap_err(),
            GameError::BoardTooSmall {
                width: 3,
                height: 5
            }
        );
        assert!(GameState::new_with_seed(GridSize { width: 4, height: 1 }, 0).is_ok());
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut state = board_state(2);
        feed(&mut state);

        state.tick();

        assert_eq!(state.score, 1);
        assert_eq!(state.high_score, 1);
        assert_eq!(state.snake.len(), INITIAL_SNAKE_LENGTH + 1);
        assert!(!state.snake.occupies(state.food.position));
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn length_tracks_food_eaten() {
        let mut state = board_state(3);

        for eaten in 1..=5 {
            feed(&mut state);
            state.tick();
            assert_eq!(state.snake.len(), INITIAL_SNAKE_LENGTH + eaten);
        }
        assert_eq!(state.score, 5);
    }

    #[test]
    fn speed_factor_decays_to_floor_and_stays_there() {
        let mut state = board_state(4);
        let mut previous = state.speed_factor;

        for _ in 0..60 {
            state.eat_food();
            assert!(state.speed_factor <= previous);
            assert!(state.speed_factor >= MIN_SPEED_FACTOR);
            previous = state.speed_factor;
        }

        assert_eq!(state.speed_factor, MIN_SPEED_FACTOR);
        assert_eq!(state.score, 60);
    }

    #[test]
    fn speed_factor_never_crosses_floor() {
        let mut state = board_state(5);
        state.speed_factor = 0.31;

        feed(&mut state);
        state.tick();

        assert_eq!(state.speed_factor, MIN_SPEED_FACTOR);

        feed(&mut state);
        state.tick();
        assert_eq!(state.speed_factor, MIN_SPEED_FACTOR);
    }

    #[test]
    fn tick_interval_scales_with_speed_factor() {
        let mut state = board_state(6);
        let base = BASE_TICK_DELAY.as_secs_f64();
        assert!((state.tick_interval().as_secs_f64() - base).abs() < 1e-6);

        state.speed_factor = MIN_SPEED_FACTOR;
        assert!((state.tick_interval().as_secs_f64() - base * MIN_SPEED_FACTOR).abs() < 1e-6);
        assert!(state.tick_interval() > Duration::ZERO);
    }

    #[test]
    fn collision_with_wall_sets_game_over() {
        let mut state = board_state(7);
        state.snake = Snake::from_segments(
            Position::new(0, 3),
            [Position::new(1, 3), Position::new(2, 3)],
            Direction::Left,
        );
        state.food = Food::new(Position::new(5, 5));

        state.step(Command::Idle);

        assert_eq!(state.phase, Phase::GameOverWaiting);
        assert_eq!(state.end_reason, Some(EndReason::Wall));
        assert_eq!(state.snake.head(), Position::new(-1, 3));
    }

    #[test]
    fn collision_with_self_sets_game_over() {
        let mut state = board_state(8);
        state.snake = Snake::from_segments(
            Position::new(2, 2),
            [
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
                Position::new(3, 1),
            ],
            Direction::Up,
        );
        state.food = Food::new(Position::new(9, 9));

        state.step(Command::Move(Direction::Right));

        assert_eq!(state.phase, Phase::GameOverWaiting);
        assert_eq!(state.end_reason, Some(EndReason::SelfCollision));
    }

    #[test]
    fn moving_into_vacated_tail_cell_is_safe() {
        let mut state = board_state(9);
        state.snake = Snake::from_segments(
            Position::new(2, 2),
            [
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
            ],
            Direction::Up,
        );
        state.food = Food::new(Position::new(9, 9));

        state.step(Command::Move(Direction::Right));

        assert_eq!(state.snake.head(), Position::new(3, 2));
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn game_over_ignores_everything_but_restart_and_quit() {
        let mut state = board_state(10);
        state.phase = Phase::GameOverWaiting;
        let snake_before = state.snake.clone();

        state.step(Command::Move(Direction::Up));
        state.step(Command::Idle);

        assert_eq!(state.phase, Phase::GameOverWaiting);
        assert_eq!(state.snake, snake_before);

        state.step(Command::Quit);
        assert_eq!(state.phase, Phase::Terminated);
        assert!(!state.is_running());
    }

    #[test]
    fn quit_while_playing_terminates_without_moving() {
        let mut state = board_state(11);
        let head = state.snake.head();

        state.step(Command::Quit);

        assert_eq!(state.phase, Phase::Terminated);
        assert_eq!(state.snake.head(), head);

        state.step(Command::Restart);
        assert_eq!(state.phase, Phase::Terminated);
    }

    #[test]
    fn restart_restores_initial_shape_and_keeps_high_score() {
        let fresh = board_state(12);
        let mut state = board_state(12);

        for _ in 0..3 {
            feed(&mut state);
            state.tick();
        }
        state.speed_factor = 0.6;
        state.phase = Phase::GameOverWaiting;
        state.end_reason = Some(EndReason::Wall);

        state.step(Command::Restart);

        assert_eq!(state.snake, fresh.snake);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_factor, 1.0);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.end_reason, None);
        assert_eq!(state.high_score, 3);
        assert!(!state.snake.occupies(state.food.position));
    }

    #[test]
    fn high_score_never_decreases_across_restarts() {
        let mut state = board_state(13);
        let mut best = 0;

        for eaten in [2, 0, 4, 1] {
            for _ in 0..eaten {
                feed(&mut state);
                state.tick();
            }
            assert!(state.high_score >= best);
            best = state.high_score;
            state.restart();
            assert_eq!(state.high_score, best);
        }
        assert_eq!(best, 4);
    }

    #[test]
    fn filling_the_board_ends_the_life_as_board_filled() {
        let mut state = GameState::new_with_seed(GridSize { width: 4, height: 1 }, 14).unwrap();
        // Snake at (2,0),(1,0),(0,0) facing right; the only free cell is (3,0).
        assert_eq!(state.food.position, Position::new(3, 0));

        state.step(Command::Idle);

        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.phase, Phase::GameOverWaiting);
        assert_eq!(state.end_reason, Some(EndReason::BoardFilled));
    }
}
