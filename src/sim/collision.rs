//! Collision detection and response
//!
//! Axis-aligned rules for one simulation step: paddles move, the ball
//! translates, bounces off the top/bottom walls and the paddles, and a point
//! is detected once the ball leaves the field. Every boundary comparison is
//! inclusive so exact contact always counts as a hit.

use super::input::InputState;
use super::state::{Ball, GameEvent, GameState, Side};
use crate::config::GameConfig;

/// Move both paddles by their held controls, clamped to the playfield
pub fn move_paddles(state: &mut GameState, input: &InputState, config: &GameConfig) {
    let step = config.paddle_speed;
    state.paddle_left_y = config.clamp_paddle_y(state.paddle_left_y + input.left_axis() * step);
    state.paddle_right_y = config.clamp_paddle_y(state.paddle_right_y + input.right_axis() * step);
}

/// Translate the ball by its velocity
#[inline]
pub fn integrate_ball(ball: &mut Ball) {
    ball.pos += ball.vel;
}

/// Bounce off the top and bottom walls. Returns true on contact.
pub fn wall_collision(ball: &mut Ball, config: &GameConfig) -> bool {
    if ball.top() <= 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = ball.vel.y.abs();
        true
    } else if ball.bottom(config.ball_size) >= config.canvas_height {
        ball.pos.y = config.canvas_height - config.ball_size;
        ball.vel.y = -ball.vel.y.abs();
        true
    } else {
        false
    }
}

/// Where the ball struck a paddle: 0 at the paddle top, 1 at its bottom.
///
/// The ball's top edge is used as the contact point. A ball clipping the
/// paddle's top corner would give a negative offset, so the result is
/// clamped to keep the rebound within [-1, 1].
#[inline]
pub fn hit_offset(ball_y: f32, paddle_y: f32, paddle_height: f32) -> f32 {
    ((ball_y - paddle_y) / paddle_height).clamp(0.0, 1.0)
}

/// Vertical rebound speed for a hit offset
#[inline]
pub fn rebound_vy(offset: f32) -> f32 {
    (offset - 0.5) * 2.0
}

/// Whether the ball's vertical span touches a paddle's
#[inline]
fn overlaps_paddle(ball: &Ball, paddle_y: f32, config: &GameConfig) -> bool {
    ball.bottom(config.ball_size) >= paddle_y && ball.top() <= paddle_y + config.paddle_height
}

/// Bounce off the left paddle. Only a ball moving left can be hit, which
/// keeps a single contact from bouncing twice.
pub fn left_paddle_collision(ball: &mut Ball, paddle_y: f32, config: &GameConfig) -> bool {
    let hit = ball.left() <= config.paddle_width
        && overlaps_paddle(ball, paddle_y, config)
        && ball.vel.x < 0.0;
    if hit {
        let offset = hit_offset(ball.pos.y, paddle_y, config.paddle_height);
        ball.vel.y = rebound_vy(offset);
        ball.vel.x = ball.vel.x.abs() * config.paddle_boost;
        ball.pos.x = config.paddle_width + 1.0;
    }
    hit
}

/// Bounce off the right paddle, mirrored from [`left_paddle_collision`]
pub fn right_paddle_collision(ball: &mut Ball, paddle_y: f32, config: &GameConfig) -> bool {
    let hit = ball.right(config.ball_size) >= config.canvas_width - config.paddle_width
        && overlaps_paddle(ball, paddle_y, config)
        && ball.vel.x > 0.0;
    if hit {
        let offset = hit_offset(ball.pos.y, paddle_y, config.paddle_height);
        ball.vel.y = rebound_vy(offset);
        ball.vel.x = -ball.vel.x.abs() * config.paddle_boost;
        ball.pos.x = config.canvas_width - config.paddle_width - config.ball_size - 1.0;
    }
    hit
}

/// Side that wins a point from the ball's position, if it left the field
pub fn detect_score(ball: &Ball, config: &GameConfig) -> Option<Side> {
    if ball.left() <= 0.0 {
        Some(Side::Right)
    } else if ball.left() >= config.canvas_width {
        Some(Side::Left)
    } else {
        None
    }
}

/// Advance paddles and ball by one step. Returns the side that scored, if any.
///
/// Score bookkeeping is left to the round controller.
pub fn advance(state: &mut GameState, input: &InputState, config: &GameConfig) -> Option<Side> {
    move_paddles(state, input, config);
    let left_y = state.paddle_y(Side::Left);
    let right_y = state.paddle_y(Side::Right);

    let ball = &mut state.ball;
    integrate_ball(ball);

    if wall_collision(ball, config) {
        state.events.push(GameEvent::WallBounce);
    }

    if left_paddle_collision(ball, left_y, config) {
        state.events.push(GameEvent::PaddleHit {
            side: Side::Left,
            speed: ball.vel.x.abs(),
        });
    }
    if right_paddle_collision(ball, right_y, config) {
        state.events.push(GameEvent::PaddleHit {
            side: Side::Right,
            speed: ball.vel.x.abs(),
        });
    }

    detect_score(ball, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Control;
    use crate::sim::state::GamePhase;
    use glam::Vec2;
    use proptest::prelude::*;

    fn rallying(ball: Ball) -> GameState {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.phase = GamePhase::Rallying;
        state.ball = ball;
        state
    }

    #[test]
    fn test_left_paddle_scenario() {
        let config = GameConfig::default();
        let mut state = rallying(Ball::new(Vec2::new(5.0, 300.0), Vec2::new(-1.5, 0.0)));
        state.paddle_left_y = 260.0;

        let scored = advance(&mut state, &InputState::new(), &config);
        assert_eq!(scored, None);
        assert_eq!(state.ball.pos.x, 11.0);
        assert!((state.ball.vel.x - 1.62).abs() < 1e-5);
        assert!((state.ball.vel.y - (-0.2)).abs() < 1e-5);
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::PaddleHit { side: Side::Left, .. }]
        ));
    }

    #[test]
    fn test_right_paddle_bounce() {
        let config = GameConfig::default();
        // Ball right edge reaches 790 after moving
        let mut ball = Ball::new(Vec2::new(779.0, 350.0), Vec2::new(2.0, 0.0));
        assert!(!right_paddle_collision(&mut ball, 300.0, &config));

        integrate_ball(&mut ball);
        assert!(right_paddle_collision(&mut ball, 300.0, &config));
        assert_eq!(ball.pos.x, 800.0 - 10.0 - 10.0 - 1.0);
        assert!((ball.vel.x + 2.0 * 1.08).abs() < 1e-5);
        // Hit at offset 0.5 goes straight back
        assert!(ball.vel.y.abs() < 1e-5);
    }

    #[test]
    fn test_no_double_bounce_when_moving_away() {
        let config = GameConfig::default();
        let mut ball = Ball::new(Vec2::new(5.0, 300.0), Vec2::new(1.5, 0.0));
        assert!(!left_paddle_collision(&mut ball, 260.0, &config));
        assert_eq!(ball.pos.x, 5.0);

        let mut ball = Ball::new(Vec2::new(785.0, 300.0), Vec2::new(-1.5, 0.0));
        assert!(!right_paddle_collision(&mut ball, 260.0, &config));
    }

    #[test]
    fn test_paddle_miss() {
        let config = GameConfig::default();
        // Ball well below the paddle span
        let mut ball = Ball::new(Vec2::new(5.0, 500.0), Vec2::new(-1.5, 0.0));
        assert!(!left_paddle_collision(&mut ball, 100.0, &config));
    }

    #[test]
    fn test_exact_edge_contact_counts() {
        let config = GameConfig::default();
        // Ball bottom exactly touching paddle top, left edge exactly at paddle face
        let mut ball = Ball::new(Vec2::new(10.0, 90.0), Vec2::new(-1.0, 1.0));
        assert!(left_paddle_collision(&mut ball, 100.0, &config));
        // Offset clamps to 0: sharpest upward angle
        assert_eq!(ball.vel.y, -1.0);
    }

    #[test]
    fn test_wall_collisions() {
        let config = GameConfig::default();

        let mut ball = Ball::new(Vec2::new(400.0, -0.5), Vec2::new(1.5, -1.5));
        assert!(wall_collision(&mut ball, &config));
        assert_eq!(ball.pos.y, 0.0);
        assert_eq!(ball.vel.y, 1.5);

        let mut ball = Ball::new(Vec2::new(400.0, 591.0), Vec2::new(1.5, 1.5));
        assert!(wall_collision(&mut ball, &config));
        assert_eq!(ball.pos.y, 590.0);
        assert_eq!(ball.vel.y, -1.5);

        let mut ball = Ball::new(Vec2::new(400.0, 300.0), Vec2::new(1.5, 1.5));
        assert!(!wall_collision(&mut ball, &config));
    }

    #[test]
    fn test_detect_score() {
        let config = GameConfig::default();
        let ball = Ball::new(Vec2::new(0.0, 300.0), Vec2::ZERO);
        assert_eq!(detect_score(&ball, &config), Some(Side::Right));
        let ball = Ball::new(Vec2::new(800.0, 300.0), Vec2::ZERO);
        assert_eq!(detect_score(&ball, &config), Some(Side::Left));
        let ball = Ball::new(Vec2::new(400.0, 300.0), Vec2::ZERO);
        assert_eq!(detect_score(&ball, &config), None);
    }

    #[test]
    fn test_paddles_move_independently() {
        let config = GameConfig::default();
        let mut state = rallying(Ball::new(Vec2::new(400.0, 300.0), Vec2::ZERO));
        let mut input = InputState::new();
        input.set_held(Control::P1Up, true);
        input.set_held(Control::P2Down, true);

        move_paddles(&mut state, &input, &config);
        assert_eq!(state.paddle_left_y, 245.0);
        assert_eq!(state.paddle_right_y, 255.0);
    }

    #[test]
    fn test_paddle_clamped_at_edges() {
        let config = GameConfig::default();
        let mut state = rallying(Ball::new(Vec2::new(400.0, 300.0), Vec2::ZERO));
        state.paddle_left_y = 3.0;
        state.paddle_right_y = 498.0;
        let mut input = InputState::new();
        input.set_held(Control::P1Up, true);
        input.set_held(Control::P2Down, true);

        move_paddles(&mut state, &input, &config);
        assert_eq!(state.paddle_left_y, 0.0);
        assert_eq!(state.paddle_right_y, 500.0);
    }

    proptest! {
        #[test]
        fn prop_rebound_within_unit_range(
            ball_y in -20.0f32..620.0,
            paddle_y in 0.0f32..=500.0,
            vx in 0.1f32..20.0,
        ) {
            let config = GameConfig::default();
            let mut ball = Ball::new(Vec2::new(5.0, ball_y), Vec2::new(-vx, 0.3));
            if left_paddle_collision(&mut ball, paddle_y, &config) {
                prop_assert!((-1.0..=1.0).contains(&ball.vel.y));
                prop_assert!(ball.vel.x > vx);
            }

            let mut ball = Ball::new(Vec2::new(785.0, ball_y), Vec2::new(vx, 0.3));
            if right_paddle_collision(&mut ball, paddle_y, &config) {
                prop_assert!((-1.0..=1.0).contains(&ball.vel.y));
                prop_assert!(-ball.vel.x > vx);
            }
        }

        #[test]
        fn prop_paddles_stay_in_bounds(
            presses in proptest::collection::vec(any::<[bool; 4]>(), 1..400),
        ) {
            let config = GameConfig::default();
            let mut state = rallying(Ball::new(Vec2::new(400.0, 300.0), Vec2::ZERO));
            let mut input = InputState::new();
            for held in presses {
                for (control, h) in Control::ALL.into_iter().zip(held) {
                    input.set_held(control, h);
                }
                move_paddles(&mut state, &input, &config);
                prop_assert!((0.0..=500.0).contains(&state.paddle_left_y));
                prop_assert!((0.0..=500.0).contains(&state.paddle_right_y));
            }
        }
    }
}
