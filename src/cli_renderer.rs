use crate::config::Arena;
use crate::entity::{Color as BallColor, Entity, EntityKind};
use crate::game::{Game, GameState};
use crate::input::Key;
use crate::renderer::{Input, Renderer};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

const CONTROLS: &str = "A/D: Player 1 | Left/Right: Player 2 | P: pause | R: restart | Q: quit";

/// Maps arena coordinates (origin centered, y up) onto terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    arena_width: f32,
    arena_height: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, arena: &Arena) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            arena_width: arena.width,
            arena_height: arena.height,
        }
    }

    pub fn column(&self, x: f32) -> u16 {
        let t = (x + self.arena_width / 2.0) / self.arena_width;
        Self::cell(t, self.cols)
    }

    pub fn row(&self, y: f32) -> u16 {
        let t = (self.arena_height / 2.0 - y) / self.arena_height;
        Self::cell(t, self.rows)
    }

    /// Inclusive column range covered by a horizontal extent
    pub fn span(&self, center_x: f32, width: f32) -> (u16, u16) {
        let scale = self.cols as f32 / self.arena_width;
        let left = (center_x - width / 2.0 + self.arena_width / 2.0) * scale;
        let right = (center_x + width / 2.0 + self.arena_width / 2.0) * scale;
        let max = self.cols as i32 - 1;
        let start = (left.floor() as i32).clamp(0, max);
        let end = (right.ceil() as i32 - 1).clamp(start, max);
        (start as u16, end as u16)
    }

    fn cell(t: f32, count: u16) -> u16 {
        let index = (t * count as f32).floor() as i32;
        index.clamp(0, count as i32 - 1) as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Glyph {
    ch: char,
    color: Color,
}

const BLANK: Glyph = Glyph {
    ch: ' ',
    color: Color::White,
};

/// Off-screen frame, flushed to the terminal in one go
struct Frame {
    cols: u16,
    rows: u16,
    glyphs: Vec<Glyph>,
}

impl Frame {
    fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            glyphs: vec![BLANK; cols as usize * rows as usize],
        }
    }

    fn put(&mut self, col: u16, row: u16, glyph: Glyph) {
        if col < self.cols && row < self.rows {
            self.glyphs[row as usize * self.cols as usize + col as usize] = glyph;
        }
    }

    fn text_centered(&mut self, row: u16, text: &str, color: Color) {
        let len = text.chars().count() as u16;
        let start = self.cols.saturating_sub(len) / 2;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as u16, row, Glyph { ch, color });
        }
    }
}

fn terminal_color(color: BallColor) -> Color {
    match color {
        BallColor::Red => Color::Red,
        BallColor::Blue => Color::Blue,
        BallColor::Green => Color::Green,
        BallColor::Yellow => Color::Yellow,
        BallColor::Orange => Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
        BallColor::Purple => Color::Magenta,
        BallColor::White => Color::White,
    }
}

pub struct CliRenderer {
    viewport: Option<Viewport>,
    last_render: Option<Instant>,
    target_frame_time: Duration,
    active: bool,
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            viewport: None,
            last_render: None,
            // Target 60 FPS; game ticks run faster than this
            target_frame_time: Duration::from_millis(16),
            active: false,
        }
    }

    fn viewport_for(&mut self, arena: &Arena) -> io::Result<Viewport> {
        match self.viewport {
            Some(viewport) => Ok(viewport),
            None => {
                let (cols, rows) = terminal::size()?;
                // Bottom line holds the controls help
                let viewport = Viewport::new(cols, rows.saturating_sub(1), arena);
                self.viewport = Some(viewport);
                Ok(viewport)
            }
        }
    }

    fn compose(&self, game: &Game, viewport: &Viewport) -> Frame {
        let mut frame = Frame::new(viewport.cols, viewport.rows);

        // Dashed center line
        let center = viewport.row(0.0);
        for col in 0..viewport.cols {
            if (col / 2) % 2 == 0 {
                frame.put(
                    col,
                    center,
                    Glyph {
                        ch: '-',
                        color: Color::DarkGrey,
                    },
                );
            }
        }

        for entity in game.entities() {
            let pos = entity.position();
            let color = terminal_color(entity.color());
            match entity.kind() {
                EntityKind::Paddle { width, .. } => {
                    let (start, end) = viewport.span(pos.x, width);
                    let row = viewport.row(pos.y);
                    for col in start..=end {
                        frame.put(col, row, Glyph { ch: '█', color });
                    }
                }
                EntityKind::Ball { .. } => {
                    frame.put(
                        viewport.column(pos.x),
                        viewport.row(pos.y),
                        Glyph { ch: '●', color },
                    );
                }
            }
        }

        let score_row = viewport.row(game.arena.height / 2.0 - 40.0);
        frame.text_centered(score_row, &game.scoreboard.to_string(), Color::White);

        if let Some(message) = &game.message {
            let color = match game.state {
                GameState::GameOver(_) => Color::Green,
                GameState::Paused => Color::Yellow,
                GameState::Playing => Color::White,
            };
            frame.text_centered(center, message, color);
        }

        frame
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        // Frame rate limiting: skip rendering if not enough time has passed
        if let Some(last) = self.last_render {
            if last.elapsed() < self.target_frame_time {
                return Ok(());
            }
        }
        self.last_render = Some(Instant::now());

        let viewport = self.viewport_for(&game.arena)?;
        let frame = self.compose(game, &viewport);

        let mut stdout = io::stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        let mut current = None;
        for row in 0..frame.rows {
            queue!(stdout, cursor::MoveTo(0, row))?;
            for col in 0..frame.cols {
                let glyph = frame.glyphs[row as usize * frame.cols as usize + col as usize];
                if current != Some(glyph.color) {
                    queue!(stdout, SetForegroundColor(glyph.color))?;
                    current = Some(glyph.color);
                }
                queue!(stdout, Print(glyph.ch))?;
            }
        }

        queue!(
            stdout,
            cursor::MoveTo(0, frame.rows),
            ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            Print(CONTROLS)
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        loop {
            if !event::poll(Duration::ZERO)? {
                return Ok(None);
            }
            match event::read() {
                Ok(Event::Key(key)) => {
                    if let Some(input) = translate_key(key) {
                        return Ok(Some(input));
                    }
                }
                Ok(Event::Resize(..)) => {
                    // Recomputed from the new terminal size on the next frame
                    self.viewport = None;
                    let mut stdout = io::stdout();
                    queue!(stdout, terminal::Clear(ClearType::All))?;
                }
                Ok(_) => {}
                Err(err)
                    if matches!(
                        err.kind(),
                        io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe
                    ) =>
                {
                    return Ok(Some(Input::Close));
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn translate_key(event: KeyEvent) -> Option<Input> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Input::Interrupt)
        }
        KeyCode::Char(c) => Some(Input::Key(Key::Char(c))),
        KeyCode::Left => Some(Input::Key(Key::Left)),
        KeyCode::Right => Some(Input::Key(Key::Right)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn viewport() -> Viewport {
        Viewport::new(80, 24, &Config::default().arena())
    }

    #[test]
    fn test_viewport_corners_and_center() {
        let v = viewport();
        assert_eq!(v.column(-400.0), 0);
        assert_eq!(v.column(400.0), 79);
        assert_eq!(v.column(0.0), 40);
        assert_eq!(v.row(300.0), 0);
        assert_eq!(v.row(-300.0), 23);
        assert_eq!(v.row(0.0), 12);
    }

    #[test]
    fn test_viewport_clamps_out_of_range() {
        let v = viewport();
        assert_eq!(v.column(-1000.0), 0);
        assert_eq!(v.column(1000.0), 79);
        assert_eq!(v.row(1000.0), 0);
    }

    #[test]
    fn test_paddle_span_width() {
        let v = viewport();
        // 100 units of 800 over 80 columns is 10 cells
        let (start, end) = v.span(0.0, 100.0);
        assert_eq!(end - start + 1, 10);
    }

    #[test]
    fn test_frame_draws_paddles_ball_and_score() {
        let renderer = CliRenderer::new();
        let game = Game::with_seed(Config::default(), 5);
        let v = viewport();
        let frame = renderer.compose(&game, &v);

        let at = |col: u16, row: u16| frame.glyphs[row as usize * 80 + col as usize].ch;
        assert_eq!(at(40, v.row(-250.0)), '█');
        assert_eq!(at(40, v.row(250.0)), '█');

        let score_row = v.row(260.0);
        let line: String = (0..80).map(|c| at(c, score_row)).collect();
        assert!(line.contains("Player 1: 0  Player 2: 0"));
    }

    #[test]
    fn test_message_is_centered() {
        let renderer = CliRenderer::new();
        let mut game = Game::with_seed(Config::default(), 5);
        game.toggle_pause();
        let v = viewport();
        let frame = renderer.compose(&game, &v);

        let row = v.row(0.0) as usize;
        let line: String = frame.glyphs[row * 80..(row + 1) * 80]
            .iter()
            .map(|g| g.ch)
            .collect();
        assert!(line.contains("Game Paused"));
    }

    #[test]
    fn test_key_translation() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(
            translate_key(press(KeyCode::Char('a'))),
            Some(Input::Key(Key::Char('a')))
        );
        assert_eq!(translate_key(press(KeyCode::Left)), Some(Input::Key(Key::Left)));
        assert_eq!(translate_key(press(KeyCode::Up)), None);
        assert_eq!(
            translate_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Input::Interrupt)
        );
    }
}
