//! Game configuration
//!
//! Tunable constants for the playfield, paddles, ball and scoring. Defaults
//! come from [`crate::consts`]; overrides are read as JSON from LocalStorage
//! on the web and from the file named by `PING_PONG_CONFIG` on native.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed
    Parse(serde_json::Error),
    /// Config file could not be read
    Io(std::io::Error),
    /// A dimension or speed was zero, negative or not finite
    NonPositive(&'static str),
    /// Paddle does not fit inside the playfield
    PaddleTooTall { paddle_height: f32, canvas_height: f32 },
    /// Ball cannot travel between the two paddles
    FieldTooNarrow,
    /// Winning score or countdown of zero
    ZeroCount(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
            ConfigError::Io(e) => write!(f, "could not read config: {}", e),
            ConfigError::NonPositive(field) => write!(f, "{} must be a positive number", field),
            ConfigError::PaddleTooTall {
                paddle_height,
                canvas_height,
            } => write!(
                f,
                "paddle height {} does not fit canvas height {}",
                paddle_height, canvas_height
            ),
            ConfigError::FieldTooNarrow => {
                write!(f, "canvas is too narrow for two paddles and a ball")
            }
            ConfigError::ZeroCount(field) => write!(f, "{} must be at least 1", field),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_start_y: f32,

    // === Ball ===
    pub ball_size: f32,
    pub ball_start_speed: f32,
    pub serve_speed: f32,
    pub paddle_boost: f32,

    // === Rules ===
    pub winning_score: u32,
    pub countdown_seconds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_start_y: PADDLE_START_Y,

            ball_size: BALL_SIZE,
            ball_start_speed: BALL_START_SPEED,
            serve_speed: SERVE_SPEED,
            paddle_boost: PADDLE_BOOST,

            winning_score: WINNING_SCORE,
            countdown_seconds: COUNTDOWN_SECONDS,
        }
    }
}

impl GameConfig {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ping_pong_config";

    /// Environment variable naming a JSON config file (native)
    pub const ENV_VAR: &'static str = "PING_PONG_CONFIG";

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the geometry is playable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_size", self.ball_size),
            ("serve_speed", self.serve_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive(field));
            }
        }
        // Bounces must never slow the ball down
        if !(self.paddle_boost.is_finite() && self.paddle_boost >= 1.0) {
            return Err(ConfigError::NonPositive("paddle_boost"));
        }
        if self.paddle_height > self.canvas_height {
            return Err(ConfigError::PaddleTooTall {
                paddle_height: self.paddle_height,
                canvas_height: self.canvas_height,
            });
        }
        if self.canvas_width <= 2.0 * (self.paddle_width + 1.0) + self.ball_size {
            return Err(ConfigError::FieldTooNarrow);
        }
        if self.winning_score == 0 {
            return Err(ConfigError::ZeroCount("winning_score"));
        }
        if self.countdown_seconds == 0 {
            return Err(ConfigError::ZeroCount("countdown_seconds"));
        }
        Ok(())
    }

    /// Largest legal paddle top edge
    #[inline]
    pub fn paddle_max_y(&self) -> f32 {
        self.canvas_height - self.paddle_height
    }

    /// Clamp a paddle top edge into the playfield
    #[inline]
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.paddle_max_y())
    }

    /// Top-left corner that centers the ball on the playfield
    #[inline]
    pub fn ball_center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Load config from the file named by `PING_PONG_CONFIG` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default config");
            return Self::default();
        };

        match Self::load_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Read and validate a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
