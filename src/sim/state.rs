//! Game state and core simulation types
//!
//! A [`GameState`] is an immutable snapshot: every simulation step produces a
//! new one instead of mutating the previous.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player 1, W/S keys
    Left,
    /// Player 2, arrow keys
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// 1 for the left player, 2 for the right
    pub fn player_number(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }
}

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command
    NotStarted,
    /// Ball parked off-field while the serve countdown runs
    Countdown,
    /// Ball and paddles in motion
    Rallying,
    /// A side reached the winning score
    RoundOver(Side),
}

impl GamePhase {
    /// Whether a frame step moves anything in this phase
    pub fn is_live(self) -> bool {
        matches!(self, GamePhase::Rallying)
    }

    /// Whether paddle key presses are recorded in this phase
    pub fn accepts_movement_keys(self) -> bool {
        matches!(self, GamePhase::Countdown | GamePhase::Rallying)
    }
}

/// The ball: `pos` is the top-left corner of its bounding square
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Top edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self, size: f32) -> f32 {
        self.pos.y + size
    }

    /// Left edge
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    /// Right edge
    #[inline]
    pub fn right(&self, size: f32) -> f32 {
        self.pos.x + size
    }
}

/// Something that happened during the step that produced a snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// Ball bounced off a paddle, with the resulting horizontal speed
    PaddleHit { side: Side, speed: f32 },
    /// A side scored
    Scored { side: Side, score: u32 },
    /// Countdown advanced, with the seconds still to go
    CountdownTick { remaining: u32 },
    /// Serve countdown began
    CountdownStarted,
    /// Ball served from the center
    Served { vel: Vec2 },
    /// A side won the round
    Won { side: Side },
    /// Scores reset after a finished round
    Restarted,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    /// Top edge of the left paddle
    pub paddle_left_y: f32,
    /// Top edge of the right paddle
    pub paddle_right_y: f32,
    pub score_left: u32,
    pub score_right: u32,
    pub winner: Option<Side>,
    pub phase: GamePhase,
    /// Seconds left before the serve, only during `Countdown`
    pub countdown_ticks_remaining: Option<u32>,
    /// Events produced by the step that created this snapshot
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state before the first start command
    pub fn new(config: &GameConfig) -> Self {
        let speed = config.ball_start_speed;
        Self {
            ball: Ball::new(config.ball_center(), Vec2::new(speed, speed)),
            paddle_left_y: config.clamp_paddle_y(config.paddle_start_y),
            paddle_right_y: config.clamp_paddle_y(config.paddle_start_y),
            score_left: 0,
            score_right: 0,
            winner: None,
            phase: GamePhase::NotStarted,
            countdown_ticks_remaining: None,
            events: Vec::new(),
        }
    }

    /// Score for one side
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.score_left,
            Side::Right => self.score_right,
        }
    }

    /// Paddle top edge for one side
    pub fn paddle_y(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_left_y,
            Side::Right => self.paddle_right_y,
        }
    }

    /// Copy of this snapshot with the event list cleared, ready to be advanced
    pub fn successor(&self) -> Self {
        Self {
            events: Vec::new(),
            ..self.clone()
        }
    }
}
