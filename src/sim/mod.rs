//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per rendered frame, no wall-clock time
//! - Injected, seedable RNG only
//! - Every step returns a new snapshot
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod machine;
pub mod round;
pub mod state;
pub mod tick;

pub use collision::advance;
pub use input::{Control, InputState};
pub use machine::{Command, Transition, apply_command};
pub use round::{check_winner, restart, start_countdown, tick_countdown};
pub use state::{Ball, GameEvent, GamePhase, GameState, Side};
pub use tick::{countdown_tick, step};
