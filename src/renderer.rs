use crate::game::Game;
use crate::input::Key;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(Key),
    /// The window or terminal went away
    Close,
    /// Ctrl-C or an equivalent user interrupt
    Interrupt,
}

/// Trait that abstracts rendering implementation.
/// This allows for different rendering backends (CLI, Web, etc.)
pub trait Renderer {
    /// Acquire the drawing surface. Frames are only presented by `render`.
    fn init(&mut self) -> io::Result<()>;

    /// Draw and present the current game state
    fn render(&mut self, game: &Game) -> io::Result<()>;

    /// Restore terminal/display state. Safe to call more than once.
    fn cleanup(&mut self) -> io::Result<()>;

    /// Next pending input event, without blocking
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}
