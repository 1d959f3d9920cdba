//! Render feed: everything a renderer needs, nothing it can mutate

use serde::Serialize;

use crate::config::GameConfig;
use crate::sim::{GamePhase, GameState, Side};

/// Read-only view of one simulation step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Top-left corner of the ball's bounding square
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_size: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_left_y: f32,
    pub paddle_right_y: f32,
    pub score_left: u32,
    pub score_right: u32,
    pub phase: GamePhase,
    pub countdown: Option<u32>,
    pub winner: Option<Side>,
    pub winning_score: u32,
}

impl RenderSnapshot {
    pub fn new(state: &GameState, config: &GameConfig) -> Self {
        Self {
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            ball_x: state.ball.pos.x,
            ball_y: state.ball.pos.y,
            ball_size: config.ball_size,
            paddle_width: config.paddle_width,
            paddle_height: config.paddle_height,
            paddle_left_y: state.paddle_left_y,
            paddle_right_y: state.paddle_right_y,
            score_left: state.score_left,
            score_right: state.score_right,
            phase: state.phase,
            countdown: state.countdown_ticks_remaining,
            winner: state.winner,
            winning_score: config.winning_score,
        }
    }

    /// Whether the ball should be drawn (it is parked off-field otherwise)
    pub fn ball_visible(&self) -> bool {
        !matches!(self.phase, GamePhase::NotStarted | GamePhase::Countdown)
    }

    /// Headline for the overlay shown over the field, if any
    pub fn headline(&self) -> Option<String> {
        match self.phase {
            GamePhase::NotStarted => Some("Press Enter to Start".to_string()),
            GamePhase::Countdown => Some("Starting new game in...".to_string()),
            GamePhase::RoundOver(side) => Some(format!("Player {} Wins!", side.player_number())),
            GamePhase::Rallying => None,
        }
    }

    /// Second overlay line, if any
    pub fn subline(&self) -> Option<String> {
        match self.phase {
            GamePhase::NotStarted => Some(format!("First to {} points wins!", self.winning_score)),
            GamePhase::Countdown => self.countdown.map(|n| n.to_string()),
            GamePhase::RoundOver(_) => Some("Press Enter to Play Again".to_string()),
            GamePhase::Rallying => None,
        }
    }

    /// JSON form for a JavaScript presentation layer
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
