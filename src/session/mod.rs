//! Fishing session: states, results, events and the state machine.

pub mod logic;
pub mod types;

pub use logic::FishingSession;
pub use types::{FishingResult, FishingState, SessionEvent};
