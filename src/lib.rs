//! Ping Pong - two-player keyboard arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, scoring, countdown, game phases)
//! - `session`: Single serialized entry point that owns the authoritative state
//! - `render`: Read-only render feed and the 2D canvas renderer
//! - `config`: Data-driven game constants
//! - `host`: Callback and lifecycle bookkeeping for the platform loop

pub mod config;
pub mod host;
pub mod render;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use render::RenderSnapshot;
pub use session::{Session, SessionEvent};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (canvas pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Pixels per step while a movement key is held
    pub const PADDLE_SPEED: f32 = 5.0;
    /// Paddle top edge at game start and after restart
    pub const PADDLE_START_Y: f32 = 250.0;

    /// Ball defaults (ball is a square bounding box, drawn as a circle)
    pub const BALL_SIZE: f32 = 10.0;
    /// Velocity of the ball in the pre-start snapshot
    pub const BALL_START_SPEED: f32 = 1.8;
    /// Per-axis magnitude of a serve
    pub const SERVE_SPEED: f32 = 1.5;
    /// Horizontal speed boost when ball hits a paddle (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.08;

    /// Where the ball is parked while a countdown runs
    pub const BALL_PARKED: (f32, f32) = (-100.0, -100.0);

    /// First side to reach this wins the round
    pub const WINNING_SCORE: u32 = 6;
    /// Countdown length in one-second ticks
    pub const COUNTDOWN_SECONDS: u32 = 3;
    /// Wall-clock period of the countdown timer
    pub const COUNTDOWN_TICK_MS: i32 = 1000;
}
