use std::time::Duration;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::arena::{Arena, Blocker};
use crate::config::{GameConfig, HIGH_SCORE_KEY};
use crate::food::{self, Food, Placement};
use crate::input::{Direction, Key, KeyState};
use crate::score::SettingsStore;
use crate::snake::{Position, Snake};
use crate::ui::labels::HudLabels;

/// Cell the head starts every round on.
pub const SPAWN: Position = Position::new(0, 0);

/// Direction the snake heads at the start of every round.
pub const SPAWN_DIRECTION: Direction = Direction::Up;

pub const GAME_OVER_BANNER: &str = "GAME OVER\nPress R to restart";
pub const VICTORY_BANNER: &str = "YOU WIN!\nPress R to restart";

/// Current high-level round state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Victory,
}

/// What ended a lost round.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    ObstacleCollision,
    SelfCollision,
}

/// What ended a won round.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum VictoryReason {
    TimeSurvived,
    ScoreReached,
}

/// Complete mutable state for one game, driven once per frame by `update`.
#[derive(Debug)]
pub struct GameLoop<S> {
    config: GameConfig,
    pub snake: Snake,
    pub arena: Arena,
    pub food: Option<Food>,
    pub score: u32,
    high_score: u32,
    speed: f32,
    next_move_at: Duration,
    round_started_at: Duration,
    next_speed_up_at: Duration,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub victory_reason: Option<VictoryReason>,
    labels: HudLabels,
    store: S,
    rng: StdRng,
}

impl<S: SettingsStore> GameLoop<S> {
    /// Starts a round at time zero with an entropy-seeded RNG.
    #[must_use]
    pub fn new(config: GameConfig, store: S) -> Self {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, store: S, seed: u64) -> Self {
        Self::with_rng(config, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, store: S, mut rng: StdRng) -> Self {
        let arena = Arena::build(&mut rng, config.bounds, config.obstacles, SPAWN);
        let speed = config.initial_speed;

        let mut game = Self {
            snake: Snake::new(SPAWN, SPAWN_DIRECTION),
            arena,
            food: None,
            score: 0,
            high_score: 0,
            speed,
            next_move_at: Duration::ZERO,
            round_started_at: Duration::ZERO,
            next_speed_up_at: Duration::ZERO,
            status: GameStatus::Playing,
            death_reason: None,
            victory_reason: None,
            labels: HudLabels::attached(),
            store,
            rng,
            config,
        };
        game.begin_round(Duration::ZERO);
        game
    }

    /// Replaces the text handles the game writes into.
    #[must_use]
    pub fn with_labels(mut self, labels: HudLabels) -> Self {
        self.labels = labels;
        self.refresh_labels();
        self
    }

    /// Runs one frame at monotonic time `now`.
    pub fn update(&mut self, now: Duration, keys: &KeyState) {
        if self.status != GameStatus::Playing {
            if keys.just_pressed(Key::Restart) {
                self.restart(now);
            }
            return;
        }

        let elapsed = self.elapsed(now);
        if self.check_victory(elapsed) {
            return;
        }
        self.ramp_speed(elapsed);

        if let Some(direction) = keys.steering(self.snake.direction()) {
            self.snake.turn(direction);
        }

        self.advance(now);
        self.check_food();
        self.check_collisions();
    }

    /// Ends the round, persists the high score and starts a fresh round at `now`.
    pub fn restart(&mut self, now: Duration) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        self.persist_high_score();

        self.arena = Arena::build(
            &mut self.rng,
            self.config.bounds,
            self.config.obstacles,
            SPAWN,
        );
        self.begin_round(now);
    }

    fn begin_round(&mut self, now: Duration) {
        self.status = GameStatus::Playing;
        self.death_reason = None;
        self.victory_reason = None;
        self.score = 0;
        self.speed = self.config.initial_speed;
        self.snake = Snake::new(SPAWN, SPAWN_DIRECTION);
        self.round_started_at = now;
        self.next_move_at = now;
        self.next_speed_up_at = self
            .config
            .speed_ramp
            .map_or(Duration::ZERO, |ramp| ramp.interval);
        self.high_score = self.stored_high_score().max(self.high_score);

        self.food = None;
        self.spawn_food();
        self.refresh_labels();

        info!(
            "round started: {:?} rules, {} obstacles, high score {}",
            self.config.ruleset,
            self.arena.obstacles().len(),
            self.high_score
        );
    }

    fn check_victory(&mut self, elapsed: Duration) -> bool {
        let Some(win) = self.config.win else {
            return false;
        };

        let reason = if elapsed >= win.duration {
            VictoryReason::TimeSurvived
        } else if self.score >= win.score {
            VictoryReason::ScoreReached
        } else {
            return false;
        };

        self.status = GameStatus::Victory;
        self.victory_reason = Some(reason);
        self.labels.show_banner(VICTORY_BANNER);
        info!("round won ({reason:?}) with score {}", self.score);
        true
    }

    fn ramp_speed(&mut self, elapsed: Duration) {
        let Some(ramp) = self.config.speed_ramp else {
            return;
        };
        if ramp.interval.is_zero() {
            return;
        }

        while elapsed >= self.next_speed_up_at {
            self.speed = (self.speed + ramp.increment).min(ramp.max_speed);
            self.next_speed_up_at += ramp.interval;
        }
    }

    fn advance(&mut self, now: Duration) {
        if now <= self.next_move_at {
            return;
        }

        self.snake.step();
        self.next_move_at = now + self.cooldown();
    }

    fn check_food(&mut self) {
        let Some(current) = self.food else {
            return;
        };

        let cell = self.config.cell_size;
        if !self.snake.head().is_near(current.position, cell, cell / 2.0) {
            return;
        }

        self.food = None;
        self.snake.grow();
        self.add_point();
        self.spawn_food();
    }

    fn add_point(&mut self) {
        self.score += 1;
        self.labels.show_score(self.score);

        if self.score > self.high_score {
            self.high_score = self.score;
            self.labels.show_high_score(self.high_score);
            self.persist_high_score();
        }
    }

    /// Places food unless one is already live.
    fn spawn_food(&mut self) {
        if self.food.is_some() {
            return;
        }

        let placement = food::place(
            &mut self.rng,
            &self.arena,
            &self.snake,
            self.config.cell_size,
            self.config.food_spawn_attempts,
        );
        match placement {
            Placement::Sampled(_) => {}
            Placement::Scanned(position) => {
                info!("food sampling exhausted, scanned free cell {position:?}");
            }
            Placement::Fallback(position) => {
                warn!("no free cell for food, placing ahead of head at {position:?}");
            }
        }

        self.food = Some(Food::new(placement.position()));
    }

    fn check_collisions(&mut self) {
        let cell = self.config.cell_size;
        let threshold = cell / 2.0;
        let head = self.snake.head();

        let reason = match self.arena.blocker_near(head, cell, threshold) {
            Some(Blocker::Wall) => DeathReason::WallCollision,
            Some(Blocker::Obstacle) => DeathReason::ObstacleCollision,
            None if self.snake.head_touches_body(cell, threshold) => DeathReason::SelfCollision,
            None => return,
        };

        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        self.labels.show_banner(GAME_OVER_BANNER);
        info!("round lost ({reason:?}) with score {}", self.score);
    }

    fn stored_high_score(&self) -> u32 {
        self.store
            .get_int(HIGH_SCORE_KEY)
            .and_then(|value| u32::try_from(value).ok())
            .unwrap_or(0)
    }

    fn persist_high_score(&mut self) {
        if let Err(error) = self
            .store
            .set_int(HIGH_SCORE_KEY, i64::from(self.high_score))
        {
            warn!("failed to save high score: {error}");
        }
    }

    fn refresh_labels(&mut self) {
        self.labels.show_score(self.score);
        self.labels.show_high_score(self.high_score);
        match self.status {
            GameStatus::Playing => self.labels.hide_banner(),
            GameStatus::GameOver => self.labels.show_banner(GAME_OVER_BANNER),
            GameStatus::Victory => self.labels.show_banner(VICTORY_BANNER),
        }
    }

    /// Time between moves at the current speed.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.speed)
    }

    /// Time since the current round started.
    #[must_use]
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.round_started_at)
    }

    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn labels(&self) -> &HudLabels {
        &self.labels
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::{DEFAULT_BOUNDS, GameConfig, HIGH_SCORE_KEY};
    use crate::food::Food;
    use crate::input::{Direction, Key, KeySample, KeyState};
    use crate::score::{MemorySettingsStore, SettingsStore};
    use crate::snake::{Position, Snake};

    use super::{DeathReason, GameLoop, GameStatus, SPAWN, VictoryReason};

    const STEP: Duration = Duration::from_millis(200);

    fn classic() -> GameLoop<MemorySettingsStore> {
        GameLoop::new_with_seed(GameConfig::classic(), MemorySettingsStore::default(), 1)
    }

    fn at(step: u32) -> Duration {
        STEP * step
    }

    #[test]
    fn round_starts_at_spawn_with_food() {
        let game = classic();

        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.snake.head(), SPAWN);
        assert_eq!(game.snake.direction(), Direction::Up);
        assert!(game.snake.body().is_empty());
        assert!(game.food.is_some());
        assert!(game.arena.obstacles().is_empty());
    }

    #[test]
    fn nothing_moves_before_cooldown_elapses() {
        let mut game = classic();
        let keys = KeyState::default();

        game.update(at(1), &keys);
        let head = game.snake.head();
        assert_eq!(head, Position::new(0, 1));

        // 1 / 8 s cooldown has not passed yet.
        game.update(at(1) + Duration::from_millis(50), &keys);
        game.update(at(1) + Duration::from_millis(120), &keys);
        assert_eq!(game.snake.head(), head);

        game.update(at(2), &keys);
        assert_eq!(game.snake.head(), Position::new(0, 2));
    }

    #[test]
    fn eating_grows_scores_and_respawns() {
        let mut game = classic();
        game.food = Some(Food::new(Position::new(0, 1)));

        game.update(at(1), &KeyState::default());

        assert_eq!(game.score, 1);
        assert_eq!(game.snake.body(), &[SPAWN]);
        let food = game.food.expect("food should respawn immediately");
        assert_ne!(food.position, Position::new(0, 1));
        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.high_score(), 1);
        assert_eq!(game.store().get_int(HIGH_SCORE_KEY), Some(1));
    }

    #[test]
    fn reverse_input_is_ignored() {
        let mut game = classic();
        let mut keys = KeyState::default();
        keys.update(KeySample::from_keys(&[Key::ArrowDown]));

        game.update(at(1), &keys);

        assert_eq!(game.snake.direction(), Direction::Up);
        assert_eq!(game.snake.head(), Position::new(0, 1));
    }

    #[test]
    fn wall_collision_ends_round_and_freezes() {
        let mut game = classic();
        game.snake = Snake::new(Position::new(0, DEFAULT_BOUNDS.top - 1), Direction::Up);
        game.food = Some(Food::new(Position::new(5, 5)));

        game.update(at(1), &KeyState::default());
        assert_eq!(game.status, GameStatus::GameOver);
        assert_eq!(game.death_reason, Some(DeathReason::WallCollision));
        let banner = game.labels().banner.as_ref().expect("banner attached");
        assert!(banner.is_visible());

        let head = game.snake.head();
        game.update(at(5), &KeyState::default());
        assert_eq!(game.snake.head(), head);
    }

    #[test]
    fn obstacle_collision_ends_round() {
        let mut game = classic();
        game.arena = game.arena.clone().with_obstacles(vec![Position::new(0, 1)]);
        game.food = Some(Food::new(Position::new(5, 5)));

        game.update(at(1), &KeyState::default());

        assert_eq!(game.death_reason, Some(DeathReason::ObstacleCollision));
    }

    #[test]
    fn self_collision_ends_round() {
        let mut game = classic();
        game.snake = Snake::from_segments(
            Position::new(1, 1),
            vec![
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(0, 2),
            ],
            Direction::Up,
        );
        game.food = Some(Food::new(Position::new(10, 5)));

        game.update(at(1), &KeyState::default());

        assert_eq!(game.status, GameStatus::GameOver);
        assert_eq!(game.death_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn only_restart_key_leaves_terminal_state() {
        let mut game = classic();
        game.snake = Snake::new(Position::new(0, DEFAULT_BOUNDS.top - 1), Direction::Up);
        game.food = Some(Food::new(Position::new(5, 5)));
        game.update(at(1), &KeyState::default());
        assert!(game.is_over());

        let mut keys = KeyState::default();
        keys.update(KeySample::from_keys(&[Key::W, Key::D]));
        game.update(at(2), &keys);
        assert_eq!(game.status, GameStatus::GameOver);

        keys.update(KeySample::from_keys(&[Key::Restart]));
        game.update(at(3), &keys);
        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.snake.head(), SPAWN);
        assert_eq!(game.death_reason, None);
        assert!(!game.labels().banner.as_ref().is_some_and(|b| b.is_visible()));
    }

    #[test]
    fn speed_ramps_and_caps() {
        let mut game =
            GameLoop::new_with_seed(GameConfig::arena(), MemorySettingsStore::default(), 9);
        game.food = Some(Food::new(Position::new(-20, -10)));
        let keys = KeyState::default();

        assert_eq!(game.speed(), 8.0);

        game.update(Duration::from_millis(9_900), &keys);
        assert_eq!(game.speed(), 8.0);
        assert_eq!(game.status, GameStatus::Playing);

        game.update(Duration::from_secs(10), &keys);
        assert_eq!(game.speed(), 9.0);
        assert!(game.cooldown() < Duration::from_millis(125));
    }

    #[test]
    fn speed_never_exceeds_cap() {
        let mut config = GameConfig::arena();
        config.obstacles = None;
        config.win = None;
        let mut game = GameLoop::new_with_seed(config, MemorySettingsStore::default(), 9);

        // The ramp catches up on every missed interval in a single update.
        game.update(Duration::from_secs(600), &KeyState::default());

        assert_eq!(game.speed(), 20.0);
    }

    #[test]
    fn score_target_wins_before_moving() {
        let mut game =
            GameLoop::new_with_seed(GameConfig::arena(), MemorySettingsStore::default(), 2);
        game.score = 50;
        let head = game.snake.head();

        game.update(at(1), &KeyState::default());

        assert_eq!(game.status, GameStatus::Victory);
        assert_eq!(game.victory_reason, Some(VictoryReason::ScoreReached));
        assert_eq!(game.snake.head(), head);
    }

    #[test]
    fn classic_rules_never_win() {
        let mut game = classic();
        game.score = 1_000;
        game.food = Some(Food::new(Position::new(5, 5)));

        game.update(Duration::from_secs(1), &KeyState::default());

        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.victory_reason, None);
    }

    #[test]
    fn stored_high_score_is_loaded_at_round_start() {
        let store = MemorySettingsStore::with_value(HIGH_SCORE_KEY, 12);
        let game = GameLoop::new_with_seed(GameConfig::classic(), store, 4);

        assert_eq!(game.high_score(), 12);
        assert_eq!(
            game.labels().high_score.as_ref().map(|l| l.text()),
            Some("HIGH SCORE: 12")
        );
    }
}
