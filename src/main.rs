use pong::{CliRenderer, Config, Game, Session};
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config)?;

    let game = Game::new(config);
    let mut session = Session::new(game, CliRenderer::new());

    // Restore the terminal before anything is printed
    let outcome = session.run();
    let reason = session.finish(outcome)?;
    println!("{}", reason.message());
    println!("Final score: {}", session.game.scoreboard);
    Ok(())
}

/// Logs go to `PONG_LOG_FILE` when set, since the game owns the terminal
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)?,
    };

    match &config.log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
