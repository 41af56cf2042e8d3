use glam::Vec2;

/// Overlap test between a ball's bounding square and a paddle rectangle.
///
/// This is an AABB approximation, not a true circle/rectangle distance test.
/// Edges that exactly touch do not count as overlapping.
pub fn aabb_overlap(
    ball_center: Vec2,
    ball_radius: f32,
    paddle_center: Vec2,
    paddle_width: f32,
    paddle_height: f32,
) -> bool {
    let half_w = paddle_width / 2.0;
    let half_h = paddle_height / 2.0;

    ball_center.x + ball_radius > paddle_center.x - half_w
        && ball_center.x - ball_radius < paddle_center.x + half_w
        && ball_center.y - ball_radius < paddle_center.y + half_h
        && ball_center.y + ball_radius > paddle_center.y - half_h
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PADDLE: Vec2 = Vec2::new(0.0, -250.0);

    #[test]
    fn test_ball_inside_paddle_overlaps() {
        assert!(aabb_overlap(Vec2::new(10.0, -250.0), 10.0, PADDLE, 100.0, 20.0));
    }

    #[test]
    fn test_disjoint_horizontally() {
        assert!(!aabb_overlap(Vec2::new(100.0, -250.0), 10.0, PADDLE, 100.0, 20.0));
    }

    #[test]
    fn test_disjoint_vertically() {
        assert!(!aabb_overlap(Vec2::new(0.0, -200.0), 10.0, PADDLE, 100.0, 20.0));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        // Ball bottom edge sits exactly on the paddle top edge
        assert!(!aabb_overlap(Vec2::new(0.0, -230.0), 10.0, PADDLE, 100.0, 20.0));
        // Ball left edge sits exactly on the paddle right edge
        assert!(!aabb_overlap(Vec2::new(60.0, -250.0), 10.0, PADDLE, 100.0, 20.0));
    }

    #[test]
    fn test_corner_of_bounding_square_counts() {
        // A true circle would miss this corner; the bounding square does not
        assert!(aabb_overlap(Vec2::new(59.0, -231.0), 10.0, PADDLE, 100.0, 20.0));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric_under_mirroring(
            bx in -400.0f32..400.0,
            by in -300.0f32..300.0,
        ) {
            let paddle = Vec2::ZERO;
            let a = aabb_overlap(Vec2::new(bx, by), 10.0, paddle, 100.0, 20.0);
            let b = aabb_overlap(Vec2::new(-bx, -by), 10.0, paddle, 100.0, 20.0);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_far_away_never_overlaps(
            bx in 61.0f32..400.0,
            by in -300.0f32..300.0,
        ) {
            prop_assert!(!aabb_overlap(Vec2::new(bx, by), 10.0, Vec2::ZERO, 100.0, 20.0));
        }
    }
}
