use crate::error::PongError;
use crate::game::Game;
use crate::input::{Command, CommandQueue, KeyBindings};
use crate::renderer::{Input, Renderer};
use tracing::{info, warn};

#[cfg(not(target_arch = "wasm32"))]
use crate::game::SPLASH_MESSAGE;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use tracing::error;

/// Why the loop stopped. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    WindowClosed,
    Interrupted,
}

impl ExitReason {
    pub fn message(&self) -> &'static str {
        match self {
            ExitReason::Quit => "Thanks for playing!",
            ExitReason::WindowClosed => "Game window was closed.",
            ExitReason::Interrupted => "Game was interrupted by user.",
        }
    }
}

/// What one polled input means while the start message is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashEvent {
    Waiting,
    Dismissed,
    Exit(ExitReason),
}

/// Owns the game and its renderer and drives them one iteration at a time
pub struct Session<R: Renderer> {
    pub game: Game,
    renderer: R,
    bindings: KeyBindings,
    queue: CommandQueue,
}

impl<R: Renderer> Session<R> {
    pub fn new(game: Game, renderer: R) -> Self {
        Self::with_bindings(game, renderer, KeyBindings::default())
    }

    pub fn with_bindings(game: Game, renderer: R, bindings: KeyBindings) -> Self {
        Self {
            game,
            renderer,
            bindings,
            queue: CommandQueue::default(),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn start(&mut self) -> Result<(), PongError> {
        self.renderer.init().map_err(PongError::RendererInit)?;
        info!(
            width = self.game.arena.width,
            height = self.game.arena.height,
            winning_score = self.game.scoreboard.winning_score,
            "session started"
        );
        Ok(())
    }

    /// Present the current state without ticking
    pub fn render(&mut self) -> Result<(), PongError> {
        self.renderer
            .render(&self.game)
            .map_err(PongError::Render)
    }

    pub fn shutdown(&mut self) -> Result<(), PongError> {
        self.renderer.cleanup().map_err(PongError::Render)
    }

    /// Restore the renderer and settle the loop outcome. A loop error wins
    /// over a cleanup error, which is then only logged.
    pub fn finish(
        &mut self,
        outcome: Result<ExitReason, PongError>,
    ) -> Result<ExitReason, PongError> {
        let cleanup = self.shutdown();
        match outcome {
            Ok(reason) => cleanup.map(|()| reason),
            Err(err) => {
                if let Err(cleanup_err) = cleanup {
                    warn!(error = %cleanup_err, "renderer cleanup failed after loop error");
                }
                Err(err)
            }
        }
    }

    /// Poll a single input during the splash. Keys bound to quit end the
    /// session, any other key dismisses the message.
    pub fn poll_splash(&mut self) -> Result<SplashEvent, PongError> {
        let event = match self.renderer.poll_input().map_err(PongError::Input)? {
            None => SplashEvent::Waiting,
            Some(Input::Close) => SplashEvent::Exit(ExitReason::WindowClosed),
            Some(Input::Interrupt) => SplashEvent::Exit(ExitReason::Interrupted),
            Some(Input::Key(key)) => match self.bindings.lookup(key) {
                Some(Command::Quit) => SplashEvent::Exit(ExitReason::Quit),
                _ => SplashEvent::Dismissed,
            },
        };
        Ok(event)
    }

    /// One loop iteration: drain input, apply commands, tick, render.
    ///
    /// Returns an exit reason when a quit, close or interrupt was seen. In
    /// that case the tick and frame for this iteration are skipped.
    pub fn step(&mut self) -> Result<Option<ExitReason>, PongError> {
        if let Some(reason) = self.collect_input()? {
            self.queue.clear();
            return Ok(Some(reason));
        }

        while let Some(command) = self.queue.pop() {
            if command == Command::Quit {
                self.queue.clear();
                return Ok(Some(ExitReason::Quit));
            }
            self.game.apply(command);
        }

        self.game.update();
        self.render()?;

        Ok(None)
    }

    fn collect_input(&mut self) -> Result<Option<ExitReason>, PongError> {
        while let Some(input) = self.renderer.poll_input().map_err(PongError::Input)? {
            match input {
                Input::Close => return Ok(Some(ExitReason::WindowClosed)),
                Input::Interrupt => return Ok(Some(ExitReason::Interrupted)),
                Input::Key(key) => {
                    if let Some(command) = self.bindings.lookup(key) {
                        if !self.queue.push(command) {
                            warn!(?command, "command queue full, dropping input");
                        }
                    }
                }
            }
        }
        Ok(None)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl<R: Renderer> Session<R> {
    /// Show the start message until a key is pressed or the splash time runs out
    pub fn splash(&mut self) -> Result<Option<ExitReason>, PongError> {
        self.game.show_message(SPLASH_MESSAGE);
        self.render()?;

        let deadline = Instant::now() + self.game.config.splash_duration;
        while Instant::now() < deadline {
            match self.poll_splash()? {
                SplashEvent::Exit(reason) => return Ok(Some(reason)),
                SplashEvent::Dismissed => break,
                SplashEvent::Waiting => std::thread::sleep(self.game.config.idle_tick),
            }
        }

        self.game.clear_message();
        Ok(None)
    }

    /// Blocking loop for native targets. Errors end the session; nothing is retried.
    pub fn run(&mut self) -> Result<ExitReason, PongError> {
        self.start()?;

        let result = self.splash().and_then(|early| match early {
            Some(reason) => Ok(reason),
            None => self.run_loop(),
        });

        match &result {
            Ok(reason) => info!(?reason, score = %self.game.scoreboard, "session ended"),
            Err(err) => error!(
                error = %err,
                state = ?self.game.state,
                score = %self.game.scoreboard,
                ball = ?self.game.ball.position,
                "game loop failed"
            ),
        }
        result
    }

    fn run_loop(&mut self) -> Result<ExitReason, PongError> {
        loop {
            if let Some(reason) = self.step()? {
                return Ok(reason);
            }
            std::thread::sleep(self.game.tick_delay());
        }
    }
}
