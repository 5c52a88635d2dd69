//! Engine plumbing: constants, configuration, errors and the tick scheduler.

pub mod config;
pub mod constants;
pub mod error;
pub mod scheduler;

pub use config::{FishingConfig, ResistanceConfig, SpawnDelays, SpeciesWeight};
pub use error::{ConfigError, FishingError, SessionError};
pub use scheduler::{Scheduler, TaskId};
