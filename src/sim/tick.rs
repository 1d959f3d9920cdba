//! Per-frame simulation step
//!
//! The frame clock and the one-second countdown clock both end up here. Each
//! call takes the previous snapshot and returns the next one.

use rand::Rng;

use super::collision::advance;
use super::input::InputState;
use super::round::{score_point, tick_countdown};
use super::state::GameState;
use crate::config::GameConfig;

/// Advance the game by one rendered frame.
///
/// Only `Rallying` moves anything; the other phases return an unchanged copy.
pub fn step(prev: &GameState, input: &InputState, config: &GameConfig) -> GameState {
    let mut next = prev.successor();
    if !next.phase.is_live() {
        return next;
    }

    if let Some(scorer) = advance(&mut next, input, config) {
        score_point(&mut next, scorer, config);
    }

    next
}

/// Advance the serve countdown by one wall-clock second
pub fn countdown_tick<R: Rng + ?Sized>(
    prev: &GameState,
    config: &GameConfig,
    rng: &mut R,
) -> GameState {
    let mut next = prev.successor();
    tick_countdown(&mut next, config, rng);
    next
}
