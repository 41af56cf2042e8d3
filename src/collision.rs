use crate::config::Arena;
use crate::entity::{Ball, Paddle, Player};
use crate::geometry::aabb_overlap;
use crate::score::ScoreBoard;
use rand::Rng;
use tracing::debug;

/// What happened during one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Events {
    /// Paddle owner whose paddle deflected the ball
    pub paddle_hit: Option<Player>,
    pub wall_bounce: bool,
    /// Player awarded a point; the ball has already been recentered
    pub scored: Option<Player>,
}

/// Ball-vs-paddle and ball-vs-wall resolution for one tick
#[derive(Debug, Clone, Copy)]
pub struct CollisionEngine {
    pub arena: Arena,
    pub speed_factor: f32,
}

impl CollisionEngine {
    pub fn new(arena: Arena, speed_factor: f32) -> Self {
        Self {
            arena,
            speed_factor,
        }
    }

    /// Runs paddle checks, then side walls, then scoring walls.
    ///
    /// A scoring event returns immediately so the recentered ball is not
    /// run through any further checks.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        ball: &mut Ball,
        bottom: &Paddle,
        top: &Paddle,
        scoreboard: &mut ScoreBoard,
        rng: &mut R,
    ) -> Events {
        let mut events = Events::default();

        if self.check_paddle(ball, bottom, true, rng) {
            events.paddle_hit = Some(Player::One);
        }
        if self.check_paddle(ball, top, false, rng) {
            events.paddle_hit = Some(Player::Two);
        }

        if ball.position.x > self.arena.right {
            ball.position.x = self.arena.right;
            ball.bounce_x();
            ball.change_color(rng);
            events.wall_bounce = true;
        }
        if ball.position.x < self.arena.left {
            ball.position.x = self.arena.left;
            ball.bounce_x();
            ball.change_color(rng);
            events.wall_bounce = true;
        }

        // Top wall means the bottom player got it past the top paddle
        if ball.position.y > self.arena.top {
            ball.reset_position(rng);
            scoreboard.player1_scores();
            debug!(score = %scoreboard, "player 1 scored");
            events.scored = Some(Player::One);
            return events;
        }
        if ball.position.y < self.arena.bottom {
            ball.reset_position(rng);
            scoreboard.player2_scores();
            debug!(score = %scoreboard, "player 2 scored");
            events.scored = Some(Player::Two);
            return events;
        }

        events
    }

    fn check_paddle<R: Rng + ?Sized>(
        &self,
        ball: &mut Ball,
        paddle: &Paddle,
        is_bottom: bool,
        rng: &mut R,
    ) -> bool {
        let overlapping = aabb_overlap(
            ball.position,
            ball.radius,
            paddle.position,
            paddle.width,
            paddle.height,
        );
        if !overlapping {
            return false;
        }

        // Only deflect when heading into the paddle, otherwise it already bounced
        if is_bottom && ball.velocity.y < 0.0 {
            ball.position.y = paddle.top_edge() + ball.radius;
        } else if !is_bottom && ball.velocity.y > 0.0 {
            ball.position.y = paddle.bottom_edge() - ball.radius;
        } else {
            return false;
        }

        ball.bounce_y();
        ball.change_color(rng);
        ball.increase_speed(self.speed_factor);
        debug!(
            paddle = if is_bottom { "bottom" } else { "top" },
            speed = ball.speed(),
            "ball hit paddle"
        );
        true
    }
}
