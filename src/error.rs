use std::io;

#[derive(Debug, thiserror::Error)]
pub enum PongError {
    #[error("renderer unavailable: {0}")]
    RendererInit(#[source] io::Error),

    #[error("failed to render frame: {0}")]
    Render(#[source] io::Error),

    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),
}
