//! Game session: the single owner of the authoritative game state
//!
//! Frame steps, countdown ticks, key events and commands are all funneled
//! through [`Session::dispatch`], so every state change is computed from the
//! latest snapshot and history stays linear.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::render::RenderSnapshot;
use crate::sim::{
    Command, Control, GameEvent, GamePhase, GameState, InputState, apply_command, countdown_tick,
    step,
};

/// Everything that can change the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent<'a> {
    /// A rendered frame: one simulation step
    Frame,
    /// One second of the serve countdown elapsed
    CountdownTick,
    /// A key went down (DOM `KeyboardEvent.key` value)
    KeyDown(&'a str),
    /// A key was released
    KeyUp(&'a str),
    /// Explicit start command
    Start,
    /// Explicit restart command
    Restart,
}

/// A running game
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    state: GameState,
    input: InputState,
    rng: Pcg32,
    seed: u64,
}

impl Session {
    /// Create a session in the `NotStarted` phase. The seed drives every serve.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let state = GameState::new(&config);
        Self {
            config,
            state,
            input: InputState::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Whether the one-second countdown timer should be running
    pub fn countdown_active(&self) -> bool {
        self.state.phase == GamePhase::Countdown
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::new(&self.state, &self.config)
    }

    /// Apply one event to the authoritative state
    pub fn dispatch(&mut self, event: SessionEvent<'_>) {
        let before = self.state.phase;

        match event {
            SessionEvent::Frame => {
                self.state = step(&self.state, &self.input, &self.config);
            }
            SessionEvent::CountdownTick => {
                self.state = countdown_tick(&self.state, &self.config, &mut self.rng);
            }
            SessionEvent::KeyDown(key) => self.key_down(key),
            SessionEvent::KeyUp(key) => self.key_up(key),
            SessionEvent::Start => self.command(Command::Start),
            SessionEvent::Restart => self.command(Command::Restart),
        }

        self.log_events();
        if self.state.phase != before {
            log::info!("Phase {:?} -> {:?}", before, self.state.phase);
        }
    }

    /// Drop every held control. Key-ups sent while the page is hidden never
    /// arrive, so the host calls this when it suspends.
    pub fn release_keys(&mut self) {
        self.input.release_all();
    }

    fn command(&mut self, command: Command) {
        let (next, transition) = apply_command(&self.state, command, &self.config, &mut self.rng);
        if transition.accepted {
            log::info!("{:?} accepted", transition.command);
        } else {
            log::debug!("Ignoring {:?} in phase {:?}", transition.command, transition.from);
        }
        self.state = next;
    }

    fn key_down(&mut self, key: &str) {
        if let Some(command) = Command::from_key(key, self.state.phase) {
            self.command(command);
            return;
        }

        match Control::from_key(key) {
            Some(control) if self.state.phase.accepts_movement_keys() => {
                self.input.set_held(control, true);
            }
            Some(control) => {
                log::debug!("Ignoring {:?} in phase {:?}", control, self.state.phase);
            }
            None => log::debug!("Ignoring key {:?}", key),
        }
    }

    fn key_up(&mut self, key: &str) {
        // Releases always land so a key can't stay stuck across phases
        if let Some(control) = Control::from_key(key) {
            self.input.set_held(control, false);
        }
    }

    fn log_events(&self) {
        for event in &self.state.events {
            match event {
                GameEvent::Scored { side, score } => {
                    log::info!("Player {} scores ({})", side.player_number(), score)
                }
                GameEvent::Won { side } => log::info!("Player {} wins!", side.player_number()),
                GameEvent::Served { vel } => log::info!("Serve ({:.1}, {:.1})", vel.x, vel.y),
                GameEvent::Restarted => log::info!("Scores reset"),
                GameEvent::CountdownTick { remaining } => {
                    log::debug!("Countdown {}", remaining)
                }
                GameEvent::CountdownStarted | GameEvent::WallBounce => {}
                GameEvent::PaddleHit { side, speed } => {
                    log::debug!("Player {} hit, speed {:.2}", side.player_number(), speed)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;

    #[test]
    fn test_keys_ignored_before_start() {
        let mut session = Session::new(GameConfig::default(), 1);
        session.dispatch(SessionEvent::KeyDown("w"));
        assert!(!session.input().is_held(Control::P1Up));
        assert_eq!(session.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_enter_starts_countdown() {
        let mut session = Session::new(GameConfig::default(), 1);
        session.dispatch(SessionEvent::KeyDown("Enter"));
        assert_eq!(session.phase(), GamePhase::Countdown);
        assert!(session.countdown_active());

        // Enter during play does nothing
        session.dispatch(SessionEvent::KeyDown("Enter"));
        assert_eq!(session.state().countdown_ticks_remaining, Some(3));
    }

    #[test]
    fn test_movement_keys_during_countdown_and_play() {
        let mut session = Session::new(GameConfig::default(), 1);
        session.dispatch(SessionEvent::Start);
        session.dispatch(SessionEvent::KeyDown("ArrowDown"));
        assert!(session.input().is_held(Control::P2Down));

        // Paddles stay put until the serve
        session.dispatch(SessionEvent::Frame);
        assert_eq!(session.state().paddle_right_y, 250.0);

        for _ in 0..3 {
            session.dispatch(SessionEvent::CountdownTick);
        }
        assert_eq!(session.phase(), GamePhase::Rallying);
        assert!(!session.countdown_active());

        session.dispatch(SessionEvent::Frame);
        assert_eq!(session.state().paddle_right_y, 255.0);

        session.dispatch(SessionEvent::KeyUp("ArrowDown"));
        session.dispatch(SessionEvent::Frame);
        assert_eq!(session.state().paddle_right_y, 255.0);
    }

    #[test]
    fn test_key_up_always_releases() {
        let mut session = Session::new(GameConfig::default(), 1);
        session.dispatch(SessionEvent::Start);
        session.dispatch(SessionEvent::KeyDown("s"));
        assert!(session.input().is_held(Control::P1Down));

        session.state.phase = GamePhase::RoundOver(Side::Left);
        session.dispatch(SessionEvent::KeyUp("s"));
        assert!(!session.input().is_held(Control::P1Down));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut session = Session::new(GameConfig::default(), 1);
        session.dispatch(SessionEvent::Start);
        let before = session.state().clone();
        session.dispatch(SessionEvent::KeyDown("q"));
        session.dispatch(SessionEvent::KeyUp("Shift"));
        assert_eq!(session.input(), &InputState::new());
        assert_eq!(session.state().phase, before.phase);
    }

    #[test]
    fn test_restart_command_only_after_win() {
        let mut session = Session::new(GameConfig::default(), 9);
        session.dispatch(SessionEvent::Restart);
        assert_eq!(session.phase(), GamePhase::NotStarted);

        session.state.phase = GamePhase::RoundOver(Side::Right);
        session.state.winner = Some(Side::Right);
        session.state.score_right = 6;
        session.dispatch(SessionEvent::KeyDown("Enter"));
        assert_eq!(session.phase(), GamePhase::Rallying);
        assert_eq!(session.state().score_right, 0);
    }

    #[test]
    fn test_rejected_command_keeps_snapshot() {
        let mut session = Session::new(GameConfig::default(), 4);
        session.dispatch(SessionEvent::Start);
        session.dispatch(SessionEvent::CountdownTick);
        let before = session.state().clone();

        session.dispatch(SessionEvent::Start);
        session.dispatch(SessionEvent::Restart);
        assert_eq!(session.state(), &before.successor());
        assert_eq!(session.state().countdown_ticks_remaining, Some(2));
    }

    #[test]
    fn test_release_keys_clears_held_controls() {
        let mut session = Session::new(GameConfig::default(), 3);
        session.dispatch(SessionEvent::Start);
        for _ in 0..3 {
            session.dispatch(SessionEvent::CountdownTick);
        }
        session.dispatch(SessionEvent::KeyDown("w"));
        session.dispatch(SessionEvent::KeyDown("ArrowDown"));
        assert!(session.input().is_held(Control::P1Up));

        // Page hidden: the matching key-ups are lost
        session.release_keys();
        assert_eq!(session.input(), &InputState::new());

        session.dispatch(SessionEvent::Frame);
        assert_eq!(session.state().paddle_left_y, 250.0);
        assert_eq!(session.state().paddle_right_y, 250.0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let play = |seed| {
            let mut session = Session::new(GameConfig::default(), seed);
            session.dispatch(SessionEvent::Start);
            for _ in 0..3 {
                session.dispatch(SessionEvent::CountdownTick);
            }
            for _ in 0..300 {
                session.dispatch(SessionEvent::Frame);
            }
            session.state().clone()
        };
        assert_eq!(play(77), play(77));
    }
}
