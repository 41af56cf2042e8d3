use crate::collision::{CollisionEngine, Events};
use crate::config::{Arena, Config};
use crate::entity::{Ball, Bounds, Entity, Paddle, Player};
use crate::input::Command;
use crate::score::ScoreBoard;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::info;

pub const SPLASH_MESSAGE: &str = "Pong Game - Press any key to start";
pub const PAUSE_MESSAGE: &str = "Game Paused - Press 'P' to continue";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver(Player),
}

pub struct Game {
    pub config: Config,
    pub arena: Arena,
    /// Player 1, near the bottom edge
    pub bottom_paddle: Paddle,
    /// Player 2, near the top edge
    pub top_paddle: Paddle,
    pub ball: Ball,
    pub scoreboard: ScoreBoard,
    pub state: GameState,
    pub message: Option<String>,
    engine: CollisionEngine,
    rng: StdRng,
}

impl Game {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic game for tests and replays of a fixed seed
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, mut rng: StdRng) -> Self {
        let arena = config.arena();
        let bounds = Bounds {
            min: arena.left,
            max: arena.right,
        };

        let paddle = |y: f32| {
            Paddle::new(
                Vec2::new(0.0, y),
                config.paddle_width,
                config.paddle_height,
                config.paddle_speed,
                bounds,
            )
        };
        let bottom_paddle = paddle(config.bottom_paddle_y());
        let top_paddle = paddle(config.top_paddle_y());

        let ball = Ball::centered(config.ball_radius, config.ball_base_speed, &mut rng);

        Self {
            engine: CollisionEngine::new(arena, config.ball_speed_factor),
            scoreboard: ScoreBoard::new(config.winning_score),
            arena,
            bottom_paddle,
            top_paddle,
            ball,
            state: GameState::Playing,
            message: None,
            rng,
            config,
        }
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        match player {
            Player::One => &self.bottom_paddle,
            Player::Two => &self.top_paddle,
        }
    }

    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        match player {
            Player::One => &mut self.bottom_paddle,
            Player::Two => &mut self.top_paddle,
        }
    }

    /// Everything a renderer draws, in draw order
    pub fn entities(&self) -> [&dyn Entity; 3] {
        [&self.bottom_paddle, &self.top_paddle, &self.ball]
    }

    /// Apply one queued command. `Quit` is left to the session loop.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft(player) => self.paddle_mut(player).step_left(),
            Command::MoveRight(player) => self.paddle_mut(player).step_right(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
            Command::Quit => {}
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            GameState::Playing => {
                self.state = GameState::Paused;
                self.show_message(PAUSE_MESSAGE);
                info!("game paused");
            }
            GameState::Paused => {
                self.state = GameState::Playing;
                self.clear_message();
                info!("game resumed");
            }
            // Only reset leaves the game-over screen
            GameState::GameOver(_) => {}
        }
    }

    pub fn reset(&mut self) {
        self.ball.reset_position(&mut self.rng);
        self.scoreboard.reset();
        self.state = GameState::Playing;
        self.clear_message();
        info!("game reset");
    }

    pub fn show_message(&mut self, text: impl Into<String>) {
        self.message = Some(text.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Advance one tick. Does nothing unless playing.
    pub fn update(&mut self) -> Events {
        if self.state != GameState::Playing {
            return Events::default();
        }

        self.ball.advance();

        let events = self.engine.resolve(
            &mut self.ball,
            &self.bottom_paddle,
            &self.top_paddle,
            &mut self.scoreboard,
            &mut self.rng,
        );

        if events.scored.is_some() {
            self.check_winner();
        }

        events
    }

    fn check_winner(&mut self) {
        if let Some(winner) = self.scoreboard.winner() {
            self.state = GameState::GameOver(winner);
            self.show_message(format!(
                "Player {} Wins! Press 'R' to restart",
                winner.number()
            ));
            info!(winner = winner.number(), score = %self.scoreboard, "game over");
        }
    }

    /// Delay before the next loop iteration
    pub fn tick_delay(&self) -> Duration {
        match self.state {
            GameState::Playing => self.config.active_tick,
            GameState::Paused | GameState::GameOver(_) => self.config.idle_tick,
        }
    }
}
