//! Game tuning and runtime configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Fixed tuning values for the arena, paddles and ball
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    pub const WALL_MARGIN: f32 = 10.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 20.0;
    pub const PADDLE_EDGE_OFFSET: f32 = 50.0;

    // Ball
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 0.5;
    pub const BALL_SPEED_FACTOR: f32 = 1.7;

    // Score
    pub const WINNING_SCORE: u32 = 7;

    // Pacing
    pub const ACTIVE_TICK: Duration = Duration::from_millis(5);
    pub const IDLE_TICK: Duration = Duration::from_millis(10);
    pub const SPLASH_DURATION: Duration = Duration::from_secs(2);
}

/// Coordinate limits derived from the arena size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            top: height / 2.0 - margin,
            bottom: -height / 2.0 + margin,
            left: -width / 2.0 + margin,
            right: width / 2.0 - margin,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub wall_margin: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_edge_offset: f32,
    pub ball_radius: f32,
    pub ball_base_speed: f32,
    pub ball_speed_factor: f32,
    pub winning_score: u32,
    pub active_tick: Duration,
    pub idle_tick: Duration,
    pub splash_duration: Duration,
    /// Log filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Log destination; stderr when unset
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            wall_margin: Params::WALL_MARGIN,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_speed: Params::PADDLE_SPEED,
            paddle_edge_offset: Params::PADDLE_EDGE_OFFSET,
            ball_radius: Params::BALL_RADIUS,
            ball_base_speed: Params::BALL_BASE_SPEED,
            ball_speed_factor: Params::BALL_SPEED_FACTOR,
            winning_score: Params::WINNING_SCORE,
            active_tick: Params::ACTIVE_TICK,
            idle_tick: Params::IDLE_TICK,
            splash_duration: Params::SPLASH_DURATION,
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("PONG_WINNING_SCORE") {
            let score = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::Invalid("PONG_WINNING_SCORE", raw.clone()))?;
            if score == 0 {
                return Err(ConfigError::Invalid("PONG_WINNING_SCORE", raw));
            }
            config.winning_score = score;
        }

        if let Some(level) = lookup("PONG_LOG_LEVEL") {
            if EnvFilter::try_new(&level).is_err() {
                return Err(ConfigError::Invalid("PONG_LOG_LEVEL", level));
            }
            config.log_level = level;
        }

        config.log_file = lookup("PONG_LOG_FILE")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height, self.wall_margin)
    }

    /// Y coordinate of the bottom (player 1) paddle
    pub fn bottom_paddle_y(&self) -> f32 {
        -self.arena_height / 2.0 + self.paddle_edge_offset
    }

    /// Y coordinate of the top (player 2) paddle
    pub fn top_paddle_y(&self) -> f32 {
        self.arena_height / 2.0 - self.paddle_edge_offset
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
