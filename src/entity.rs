use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
    White,
}

impl Color {
    /// Colors the ball cycles through on bounces
    pub const PALETTE: [Color; 7] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Purple,
        Color::White,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Purple => "purple",
            Color::White => "white",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn number(&self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// What a renderer needs to know to draw an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Paddle { width: f32, height: f32 },
    Ball { radius: f32 },
}

pub trait Entity {
    fn kind(&self) -> EntityKind;
    fn position(&self) -> Vec2;
    fn color(&self) -> Color;
}

/// Inclusive movement limits along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub bounds: Bounds,
}

impl Paddle {
    pub fn new(position: Vec2, width: f32, height: f32, speed: f32, bounds: Bounds) -> Self {
        Self {
            position,
            width,
            height,
            speed,
            bounds,
        }
    }

    pub fn move_left(&mut self, boundary: f32) {
        if self.position.x > boundary {
            self.position.x = (self.position.x - self.speed).max(boundary);
        }
    }

    pub fn move_right(&mut self, boundary: f32) {
        if self.position.x < boundary {
            self.position.x = (self.position.x + self.speed).min(boundary);
        }
    }

    pub fn move_up(&mut self, boundary: f32) {
        if self.position.y < boundary {
            self.position.y = (self.position.y + self.speed).min(boundary);
        }
    }

    pub fn move_down(&mut self, boundary: f32) {
        if self.position.y > boundary {
            self.position.y = (self.position.y - self.speed).max(boundary);
        }
    }

    /// Step left within the paddle's own bounds
    pub fn step_left(&mut self) {
        self.move_left(self.bounds.min);
    }

    /// Step right within the paddle's own bounds
    pub fn step_right(&mut self) {
        self.move_right(self.bounds.max);
    }

    pub fn top_edge(&self) -> f32 {
        self.position.y + self.height / 2.0
    }

    pub fn bottom_edge(&self) -> f32 {
        self.position.y - self.height / 2.0
    }
}

impl Entity for Paddle {
    fn kind(&self) -> EntityKind {
        EntityKind::Paddle {
            width: self.width,
            height: self.height,
        }
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn color(&self) -> Color {
        Color::White
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Color,
    pub base_speed: f32,
}

impl Ball {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, base_speed: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            color: Color::Red,
            base_speed,
        }
    }

    /// Centered ball heading in a random diagonal direction
    pub fn centered<R: Rng + ?Sized>(radius: f32, base_speed: f32, rng: &mut R) -> Self {
        let mut ball = Self::new(Vec2::ZERO, Vec2::ZERO, radius, base_speed);
        ball.reset_position(rng);
        ball
    }

    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    pub fn bounce_x(&mut self) {
        self.velocity.x = -self.velocity.x;
    }

    pub fn bounce_y(&mut self) {
        self.velocity.y = -self.velocity.y;
    }

    /// Recenter with base speed; each axis direction is picked independently
    pub fn reset_position<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.position = Vec2::ZERO;
        let sx = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        self.velocity = Vec2::new(self.base_speed * sx, self.base_speed * sy);
    }

    pub fn change_color<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(color) = Color::PALETTE.choose(rng) {
            self.color = *color;
        }
    }

    pub fn increase_speed(&mut self, factor: f32) {
        self.velocity *= factor;
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

impl Entity for Ball {
    fn kind(&self) -> EntityKind {
        EntityKind::Ball {
            radius: self.radius,
        }
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOUNDS: Bounds = Bounds {
        min: -390.0,
        max: 390.0,
    };

    fn paddle_at(x: f32) -> Paddle {
        Paddle::new(Vec2::new(x, -250.0), 100.0, 20.0, 20.0, BOUNDS)
    }

    #[test]
    fn test_paddle_moves_by_speed() {
        let mut paddle = paddle_at(0.0);
        paddle.move_left(-390.0);
        assert_eq!(paddle.position.x, -20.0);
        paddle.move_right(390.0);
        paddle.move_right(390.0);
        assert_eq!(paddle.position.x, 20.0);
        assert_eq!(paddle.position.y, -250.0);
    }

    #[test]
    fn test_paddle_clamps_at_boundary() {
        let mut paddle = paddle_at(380.0);
        paddle.move_right(390.0);
        assert_eq!(paddle.position.x, 390.0);
        paddle.move_right(390.0);
        assert_eq!(paddle.position.x, 390.0);
    }

    #[test]
    fn test_paddle_past_boundary_is_not_pulled_back() {
        let mut paddle = paddle_at(-395.0);
        paddle.move_left(-390.0);
        assert_eq!(paddle.position.x, -395.0);
    }

    #[test]
    fn test_paddle_vertical_moves_clamp() {
        let mut paddle = paddle_at(0.0);
        paddle.move_up(-240.0);
        assert_eq!(paddle.position.y, -240.0);
        paddle.move_down(-250.0);
        assert_eq!(paddle.position.y, -250.0);
        paddle.move_down(-250.0);
        assert_eq!(paddle.position.y, -250.0);
    }

    #[test]
    fn test_step_uses_own_bounds() {
        let mut paddle = paddle_at(385.0);
        paddle.step_right();
        assert_eq!(paddle.position.x, BOUNDS.max);
    }

    #[test]
    fn test_ball_advance_integrates_velocity() {
        let mut ball = Ball::new(Vec2::new(1.0, 2.0), Vec2::new(0.5, -0.5), 10.0, 0.5);
        ball.advance();
        assert_eq!(ball.position, Vec2::new(1.5, 1.5));
    }

    #[test]
    fn test_reset_restores_base_speed_after_acceleration() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut ball = Ball::new(Vec2::new(120.0, -40.0), Vec2::new(0.5, 0.5), 10.0, 0.5);
        for _ in 0..4 {
            ball.increase_speed(1.7);
        }
        ball.reset_position(&mut rng);
        assert_eq!(ball.position, Vec2::ZERO);
        assert_eq!(ball.velocity.x.abs(), 0.5);
        assert_eq!(ball.velocity.y.abs(), 0.5);
    }

    #[test]
    fn test_reset_direction_covers_all_quadrants() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut ball = Ball::new(Vec2::ZERO, Vec2::ZERO, 10.0, 0.5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            ball.reset_position(&mut rng);
            seen.insert((ball.velocity.x > 0.0, ball.velocity.y > 0.0));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_change_color_picks_from_palette() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ball = Ball::new(Vec2::ZERO, Vec2::ZERO, 10.0, 0.5);
        for _ in 0..50 {
            ball.change_color(&mut rng);
            assert!(Color::PALETTE.contains(&ball.color));
        }
    }

    #[test]
    fn test_entity_kinds() {
        let paddle = paddle_at(0.0);
        let ball = Ball::new(Vec2::ZERO, Vec2::ZERO, 10.0, 0.5);
        assert_eq!(
            paddle.kind(),
            EntityKind::Paddle {
                width: 100.0,
                height: 20.0
            }
        );
        assert_eq!(ball.kind(), EntityKind::Ball { radius: 10.0 });
        assert_eq!(paddle.color(), Color::White);
    }

    proptest! {
        /// Paddles never end up past their boundary, whatever the start and step sequence
        #[test]
        fn prop_paddle_never_crosses_boundary(
            start in -390.0f32..=390.0,
            moves in prop::collection::vec(any::<bool>(), 0..100)
        ) {
            let mut paddle = paddle_at(start);
            for right in moves {
                if right {
                    paddle.move_right(BOUNDS.max);
                } else {
                    paddle.move_left(BOUNDS.min);
                }
                prop_assert!(paddle.position.x >= BOUNDS.min);
                prop_assert!(paddle.position.x <= BOUNDS.max);
            }
        }

        #[test]
        fn prop_paddle_at_boundary_stays(at_max in any::<bool>()) {
            let edge = if at_max { BOUNDS.max } else { BOUNDS.min };
            let mut paddle = paddle_at(edge);
            if at_max {
                paddle.move_right(BOUNDS.max);
            } else {
                paddle.move_left(BOUNDS.min);
            }
            prop_assert_eq!(paddle.position.x, edge);
        }

        #[test]
        fn prop_double_bounce_is_identity(
            dx in -50.0f32..50.0,
            dy in -50.0f32..50.0,
        ) {
            let mut ball = Ball::new(Vec2::ZERO, Vec2::new(dx, dy), 10.0, 0.5);
            ball.bounce_x();
            ball.bounce_x();
            prop_assert_eq!(ball.velocity.x, dx);
            ball.bounce_y();
            ball.bounce_y();
            prop_assert_eq!(ball.velocity.y, dy);
        }

        #[test]
        fn prop_reset_always_base_speed(
            seed in any::<u64>(),
            hits in 0usize..12,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ball = Ball::new(Vec2::new(33.0, 44.0), Vec2::new(0.5, -0.5), 10.0, 0.5);
            for _ in 0..hits {
                ball.increase_speed(1.7);
            }
            ball.reset_position(&mut rng);
            prop_assert_eq!(ball.position, Vec2::ZERO);
            prop_assert_eq!(ball.velocity.x.abs(), 0.5);
            prop_assert_eq!(ball.velocity.y.abs(), 0.5);
        }
    }
}
