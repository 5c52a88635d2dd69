//! The fishing session state machine.
//!
//! The session is the only publisher of encounter events. Illegal transitions
//! are rejected with a [`SessionError`] and a warning; the state is left as it
//! was, so every operation is defined for every state.

use super::types::{FishingResult, FishingState, SessionEvent};
use crate::core::error::SessionError;
use crate::fish::Fish;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, info, warn};

/// One angler's fishing session, reused across encounters.
#[derive(Debug, Default)]
pub struct FishingSession {
    state: FishingState,
    current_fish: Option<Fish>,
    session_time: f64,
    is_active: bool,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl FishingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FishingState {
        self.state
    }

    pub fn current_fish(&self) -> Option<&Fish> {
        self.current_fish.as_ref()
    }

    /// Seconds of active fishing since the last `start_session`.
    pub fn session_time(&self) -> f64 {
        self.session_time
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Opens a new event channel. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn publish(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn transition(&mut self, to: FishingState) {
        debug!(from = ?self.state, ?to, "session transition");
        self.state = to;
        self.publish(SessionEvent::StateChanged(to));
    }

    fn reject(&self, operation: &'static str) -> SessionError {
        let err = SessionError::new(self.state, operation);
        warn!(%err, "rejected session transition");
        err
    }

    /// Casts in: any state to Waiting with a fresh clock.
    pub fn start_session(&mut self) {
        self.current_fish = None;
        self.session_time = 0.0;
        self.is_active = true;
        info!("fishing session started");
        self.transition(FishingState::Waiting);
    }

    /// Reels in for good: back to Ready, inactive, no fish.
    pub fn end_session(&mut self) {
        self.current_fish = None;
        self.is_active = false;
        info!(session_time = self.session_time, "fishing session ended");
        self.transition(FishingState::Ready);
    }

    /// Attaches a biting fish. Only legal while actively Waiting.
    pub fn set_fish(&mut self, fish: Fish) -> Result<(), SessionError> {
        if self.state != FishingState::Waiting || !self.is_active {
            return Err(self.reject("set fish"));
        }

        debug!(species = %fish.species(), weight = fish.weight(), "fish is biting");
        self.current_fish = Some(fish.clone());
        self.transition(FishingState::Biting);
        self.publish(SessionEvent::FishBite(fish));
        Ok(())
    }

    /// Sets the hook. True only from Biting; a hook while Waiting is a
    /// premature strike and the caller decides the penalty.
    pub fn try_hook(&mut self) -> bool {
        match self.state {
            FishingState::Biting => {
                self.transition(FishingState::Hooked);
                true
            }
            FishingState::Waiting => {
                debug!("premature hook while waiting");
                false
            }
            _ => {
                self.reject("hook");
                false
            }
        }
    }

    pub fn start_fight(&mut self) -> Result<(), SessionError> {
        if self.state != FishingState::Hooked {
            return Err(self.reject("start fight"));
        }
        self.transition(FishingState::Fighting);
        Ok(())
    }

    /// Ends the encounter. Legal from Hooked or Fighting, and from Biting for
    /// a `MissedBite` (a lost bite never reaches the hook). The completion
    /// event carries the fish, which is then detached from the session.
    pub fn complete_fishing(&mut self, result: FishingResult) -> Result<(), SessionError> {
        let legal = match self.state {
            FishingState::Hooked | FishingState::Fighting => true,
            FishingState::Biting => result == FishingResult::MissedBite,
            _ => false,
        };
        if !legal {
            return Err(self.reject("complete fishing"));
        }
        let Some(fish) = self.current_fish.take() else {
            return Err(self.reject("complete fishing without a fish"));
        };

        info!(?result, species = %fish.species(), weight = fish.weight(), "encounter complete");
        self.transition(result.terminal_state());
        self.publish(SessionEvent::FishingComplete { result, fish });
        Ok(())
    }

    /// Back to Waiting with no fish; `is_active` is kept.
    pub fn reset_to_waiting(&mut self) {
        self.current_fish = None;
        self.transition(FishingState::Waiting);
    }

    /// Advances the session clock while active.
    pub fn update(&mut self, dt: f64) {
        if self.is_active {
            self.session_time += dt.max(0.0);
        }
    }

    /// True when the fish-attachment invariant holds.
    pub fn is_consistent(&self) -> bool {
        self.current_fish.is_some() == self.state.has_fish()
    }
}
