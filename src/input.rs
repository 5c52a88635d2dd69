//! Keyboard handling for the fishing screen.
//!
//! Terminals only report key presses, never releases, so pulling uses the
//! same trick as a held thruster: each press keeps the reel turning for a
//! few logic ticks, and key-repeat refreshes the window while the key is
//! held down. When the window runs out the line goes slack.

use castline::{FishingState, SessionOrchestrator};
use crossterm::event::KeyCode;
use rand::Rng;

/// Logic ticks a single pull press stays active (~600ms). Longer than the
/// initial terminal key-repeat delay so a held key reels continuously.
pub const PULL_HOLD_TICKS: u32 = 6;

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FishingInput {
    Hook,    // Space
    PullOn,  // Up / Enter / p
    Release, // r
    Quit,    // q / Esc
    Other,
}

pub fn map_key(code: KeyCode) -> FishingInput {
    match code {
        KeyCode::Char(' ') => FishingInput::Hook,
        KeyCode::Up | KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => FishingInput::PullOn,
        KeyCode::Char('r') | KeyCode::Char('R') => FishingInput::Release,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => FishingInput::Quit,
        _ => FishingInput::Other,
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    pull_hold_ticks: u32,
    pub quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pulling(&self) -> bool {
        self.pull_hold_ticks > 0
    }

    /// Forwards one key press to the orchestrator.
    pub fn process(&mut self, input: FishingInput, orchestrator: &mut SessionOrchestrator, rng: &mut impl Rng) {
        match input {
            FishingInput::Hook => {
                orchestrator.request_hook(rng);
            }
            FishingInput::PullOn => {
                if orchestrator.request_pull() {
                    self.pull_hold_ticks = PULL_HOLD_TICKS;
                }
            }
            FishingInput::Release => {
                self.pull_hold_ticks = 0;
                orchestrator.request_release();
            }
            FishingInput::Quit => self.quit = true,
            FishingInput::Other => {}
        }
    }

    /// Decays the pull window once per logic tick; slackens the line when it
    /// runs out mid-fight.
    pub fn tick(&mut self, orchestrator: &mut SessionOrchestrator) {
        if self.pull_hold_ticks == 0 {
            return;
        }
        self.pull_hold_ticks -= 1;
        if self.pull_hold_ticks == 0 && orchestrator.state() == FishingState::Fighting {
            orchestrator.request_release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castline::{Equipment, FishingConfig, Player};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hooked() -> (SessionOrchestrator, StdRng) {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut orchestrator = SessionOrchestrator::in_memory(FishingConfig::default()).unwrap();
        orchestrator
            .start_fishing(Player::new(1, "Angler", 10.0, Equipment::default()), &mut rng)
            .unwrap();
        for _ in 0..2000 {
            orchestrator.tick(0.1, &mut rng);
            if orchestrator.state() == FishingState::Biting {
                break;
            }
        }
        orchestrator.request_hook(&mut rng);
        orchestrator.tick(0.1, &mut rng);
        assert_eq!(orchestrator.state(), FishingState::Hooked);
        (orchestrator, rng)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::Char(' ')), FishingInput::Hook);
        assert_eq!(map_key(KeyCode::Up), FishingInput::PullOn);
        assert_eq!(map_key(KeyCode::Enter), FishingInput::PullOn);
        assert_eq!(map_key(KeyCode::Char('r')), FishingInput::Release);
        assert_eq!(map_key(KeyCode::Esc), FishingInput::Quit);
        assert_eq!(map_key(KeyCode::Char('x')), FishingInput::Other);
    }

    #[test]
    fn test_pull_window_expires_into_release() {
        let (mut orchestrator, mut rng) = hooked();
        let mut input = InputState::new();

        input.process(FishingInput::PullOn, &mut orchestrator, &mut rng);
        assert_eq!(orchestrator.state(), FishingState::Fighting);
        assert!(input.is_pulling());

        for _ in 0..PULL_HOLD_TICKS - 1 {
            input.tick(&mut orchestrator);
            assert!(orchestrator.fight().unwrap().is_pulling());
        }
        input.tick(&mut orchestrator);
        assert!(!input.is_pulling());
        assert!(!orchestrator.fight().unwrap().is_pulling());
    }

    #[test]
    fn test_pull_ignored_while_waiting() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut orchestrator = SessionOrchestrator::in_memory(FishingConfig::default()).unwrap();
        orchestrator
            .start_fishing(Player::new(1, "Angler", 10.0, Equipment::default()), &mut rng)
            .unwrap();
        let mut input = InputState::new();
        input.process(FishingInput::PullOn, &mut orchestrator, &mut rng);
        assert!(!input.is_pulling());
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut orchestrator = SessionOrchestrator::in_memory(FishingConfig::default()).unwrap();
        let mut input = InputState::new();
        input.process(FishingInput::Quit, &mut orchestrator, &mut rng);
        assert!(input.quit);
    }
}
