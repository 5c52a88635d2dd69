//! Encounter mechanics: spawn pacing, the bite window and the fight.

pub mod bite;
pub mod fight;
pub mod spawner;

pub use bite::{decide_rebite, BiteOutcome, BiteSequence, RebiteDecision};
pub use fight::PullEngine;
pub use spawner::{FishSpawner, PreviousOutcome};
