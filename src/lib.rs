pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod score;
pub mod session;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;

#[cfg(target_arch = "wasm32")]
pub mod web_renderer;
#[cfg(target_arch = "wasm32")]
mod web_main;

pub use collision::{CollisionEngine, Events};
pub use config::{Arena, Config, ConfigError, Params};
pub use entity::{Ball, Bounds, Color, Entity, EntityKind, Paddle, Player};
pub use error::PongError;
pub use game::{Game, GameState};
pub use input::{Command, CommandQueue, Key, KeyBindings};
pub use renderer::{Input, Renderer};
pub use score::ScoreBoard;
pub use session::{ExitReason, Session, SplashEvent};

#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;
#[cfg(target_arch = "wasm32")]
pub use web_renderer::WebRenderer;
