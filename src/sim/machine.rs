//! Game phase machine
//!
//! Player commands move the game between phases:
//!
//! ```text
//! NotStarted --start--> Countdown <--> Rallying --win--> RoundOver --restart--> Rallying
//! ```
//!
//! `Countdown -> Rallying` (timer expiry), `Rallying -> Countdown` (point
//! without a winner) and `Rallying -> RoundOver` (winning point) happen
//! automatically inside the simulation step; only `start` and `restart` are
//! player commands.

use rand::Rng;

use super::round::{restart, start_countdown};
use super::state::{GamePhase, GameState};
use crate::config::GameConfig;

/// Player-issued phase commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin the first countdown (valid only before the first game)
    Start,
    /// Play again after a win (valid only when the round is over)
    Restart,
}

impl Command {
    /// Map a key to the command it means in the current phase.
    /// `Enter` starts a fresh game or restarts a finished one.
    pub fn from_key(key: &str, phase: GamePhase) -> Option<Self> {
        match (key, phase) {
            ("Enter", GamePhase::NotStarted) => Some(Command::Start),
            ("Enter", GamePhase::RoundOver(_)) => Some(Command::Restart),
            _ => None,
        }
    }
}

/// Outcome of applying a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub accepted: bool,
    pub from: GamePhase,
    pub to: GamePhase,
    pub command: Command,
}

/// Whether `command` is legal in `phase`
pub fn can_apply(phase: GamePhase, command: Command) -> bool {
    matches!(
        (phase, command),
        (GamePhase::NotStarted, Command::Start) | (GamePhase::RoundOver(_), Command::Restart)
    )
}

/// Apply a command to a snapshot. Illegal commands leave the state unchanged
/// and come back as a rejected transition.
pub fn apply_command<R: Rng + ?Sized>(
    prev: &GameState,
    command: Command,
    config: &GameConfig,
    rng: &mut R,
) -> (GameState, Transition) {
    let from = prev.phase;
    let mut next = prev.successor();

    let accepted = can_apply(from, command)
        && match command {
            Command::Start => {
                start_countdown(&mut next, config);
                true
            }
            Command::Restart => restart(&mut next, config, rng),
        };

    let transition = Transition {
        accepted,
        from,
        to: next.phase,
        command,
    };
    (next, transition)
}
