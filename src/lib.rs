//! Castline - fishing encounter engine
//!
//! A fish spawns, bites, gets hooked, fights and is either landed or lost.
//! Everything is driven by an explicit `tick(dt)` on [`SessionOrchestrator`],
//! so the same engine runs behind the terminal game, the balance simulator
//! and the tests.

pub mod angler;
pub mod core;
pub mod encounter;
pub mod fish;
pub mod service;
pub mod session;
pub mod simulator;

pub use angler::{Equipment, Player};
pub use core::{ConfigError, FishingConfig, FishingError, SessionError};
pub use fish::{Fish, Species};
pub use service::{EncounterOutcome, SessionOrchestrator};
pub use session::{FishingResult, FishingState, SessionEvent};
