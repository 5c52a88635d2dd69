//! Session states, result codes and outbound events.

use crate::fish::Fish;
use serde::{Deserialize, Serialize};

/// Where the session is in the encounter cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FishingState {
    /// Not fishing yet; an inactive Waiting.
    #[default]
    Ready,
    /// Line is in the water, no fish on it.
    Waiting,
    /// A fish is nibbling; the bite window is open.
    Biting,
    /// Hook set, the fight has not started.
    Hooked,
    /// Player is reeling the fish in.
    Fighting,
    Caught,
    Escaped,
}

impl FishingState {
    /// States in which a fish is attached to the session.
    pub fn has_fish(&self) -> bool {
        matches!(
            self,
            FishingState::Biting | FishingState::Hooked | FishingState::Fighting
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FishingState::Caught | FishingState::Escaped)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FishingState::Ready => "Ready",
            FishingState::Waiting => "Waiting for a bite",
            FishingState::Biting => "Biting!",
            FishingState::Hooked => "Hooked",
            FishingState::Fighting => "Fighting",
            FishingState::Caught => "Caught",
            FishingState::Escaped => "Escaped",
        }
    }
}

/// How an encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishingResult {
    Success,
    FishEscaped,
    LineBroken,
    RodBroken,
    RodPulledAway,
    MissedBite,
}

impl FishingResult {
    pub const ALL: [FishingResult; 6] = [
        FishingResult::Success,
        FishingResult::FishEscaped,
        FishingResult::LineBroken,
        FishingResult::RodBroken,
        FishingResult::RodPulledAway,
        FishingResult::MissedBite,
    ];

    pub fn is_success(&self) -> bool {
        matches!(self, FishingResult::Success)
    }

    /// State the session lands in after this result.
    pub fn terminal_state(&self) -> FishingState {
        if self.is_success() {
            FishingState::Caught
        } else {
            FishingState::Escaped
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FishingResult::Success => "Fish landed!",
            FishingResult::FishEscaped => "The fish got away",
            FishingResult::LineBroken => "The line snapped",
            FishingResult::RodBroken => "The rod broke",
            FishingResult::RodPulledAway => "The fish pulled the rod out of your hands",
            FishingResult::MissedBite => "Missed the bite",
        }
    }
}

/// Published by the session, once per transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StateChanged(FishingState),
    FishBite(Fish),
    FishingComplete { result: FishingResult, fish: Fish },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_fish_states() {
        let with_fish: Vec<FishingState> = [
            FishingState::Ready,
            FishingState::Waiting,
            FishingState::Biting,
            FishingState::Hooked,
            FishingState::Fighting,
            FishingState::Caught,
            FishingState::Escaped,
        ]
        .into_iter()
        .filter(FishingState::has_fish)
        .collect();
        assert_eq!(
            with_fish,
            vec![
                FishingState::Biting,
                FishingState::Hooked,
                FishingState::Fighting
            ]
        );
    }

    #[test]
    fn test_only_success_is_caught() {
        for result in FishingResult::ALL {
            let expected = if result == FishingResult::Success {
                FishingState::Caught
            } else {
                FishingState::Escaped
            };
            assert_eq!(result.terminal_state(), expected);
        }
    }

    #[test]
    fn test_result_serializes_as_name() {
        let json = serde_json::to_string(&FishingResult::RodPulledAway).unwrap();
        assert_eq!(json, "\"RodPulledAway\"");
    }
}
