//! Round sequencing: scoring, win detection, serve countdown and restart

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, GameEvent, GamePhase, GameState, Side};
use crate::config::GameConfig;
use crate::consts::BALL_PARKED;

/// Winner for a pair of scores. Left is checked first; only one score
/// changes per point, so both can never cross the threshold together.
pub fn check_winner(score_left: u32, score_right: u32, winning_score: u32) -> Option<Side> {
    if score_left >= winning_score {
        Some(Side::Left)
    } else if score_right >= winning_score {
        Some(Side::Right)
    } else {
        None
    }
}

/// Random four-way diagonal serve: each axis independently `±speed`
pub fn serve_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec2 {
    let x = if rng.random_bool(0.5) { -speed } else { speed };
    let y = if rng.random_bool(0.5) { -speed } else { speed };
    Vec2::new(x, y)
}

/// Put the ball in the center with a fresh serve
pub fn serve<R: Rng + ?Sized>(state: &mut GameState, config: &GameConfig, rng: &mut R) {
    let vel = serve_velocity(rng, config.serve_speed);
    state.ball = Ball::new(config.ball_center(), vel);
    state.events.push(GameEvent::Served { vel });
}

/// Park the ball off-field and begin the serve countdown
pub fn start_countdown(state: &mut GameState, config: &GameConfig) {
    state.ball = Ball::new(Vec2::new(BALL_PARKED.0, BALL_PARKED.1), Vec2::ZERO);
    state.phase = GamePhase::Countdown;
    state.countdown_ticks_remaining = Some(config.countdown_seconds);
    state.events.push(GameEvent::CountdownStarted);
}

/// One second of countdown. Serves when the counter reaches zero.
/// Returns false (and changes nothing) outside `Countdown`.
pub fn tick_countdown<R: Rng + ?Sized>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
) -> bool {
    let (GamePhase::Countdown, Some(remaining)) = (state.phase, state.countdown_ticks_remaining)
    else {
        return false;
    };

    let remaining = remaining.saturating_sub(1);
    state.events.push(GameEvent::CountdownTick { remaining });

    if remaining == 0 {
        state.countdown_ticks_remaining = None;
        state.phase = GamePhase::Rallying;
        serve(state, config, rng);
    } else {
        state.countdown_ticks_remaining = Some(remaining);
    }
    true
}

/// Award a point, then either end the round or start the next countdown
pub fn score_point(state: &mut GameState, side: Side, config: &GameConfig) {
    let score = match side {
        Side::Left => {
            state.score_left += 1;
            state.score_left
        }
        Side::Right => {
            state.score_right += 1;
            state.score_right
        }
    };
    state.events.push(GameEvent::Scored { side, score });

    match check_winner(state.score_left, state.score_right, config.winning_score) {
        Some(winner) => {
            state.winner = Some(winner);
            state.phase = GamePhase::RoundOver(winner);
            state.countdown_ticks_remaining = None;
            state.events.push(GameEvent::Won { side: winner });
        }
        None => start_countdown(state, config),
    }
}

/// Start a new round straight into play (no countdown).
/// Returns false (and changes nothing) unless the round is over.
pub fn restart<R: Rng + ?Sized>(state: &mut GameState, config: &GameConfig, rng: &mut R) -> bool {
    if !matches!(state.phase, GamePhase::RoundOver(_)) {
        return false;
    }

    state.score_left = 0;
    state.score_right = 0;
    state.winner = None;
    state.countdown_ticks_remaining = None;
    state.paddle_left_y = config.clamp_paddle_y(config.paddle_start_y);
    state.paddle_right_y = config.clamp_paddle_y(config.paddle_start_y);
    state.phase = GamePhase::Rallying;
    state.events.push(GameEvent::Restarted);
    serve(state, config, rng);
    true
}
