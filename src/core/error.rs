//! Error types for the fishing engine.
//!
//! Every error here is recoverable by policy: the caller logs it and the
//! state machine stays where it was. Fight outcomes such as a broken line are
//! results, not errors.

use crate::fish::Species;
use crate::session::FishingState;
use thiserror::Error;

/// A session transition that is not legal from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {operation} while session is {from:?}")]
pub struct SessionError {
    pub from: FishingState,
    pub operation: &'static str,
}

impl SessionError {
    pub fn new(from: FishingState, operation: &'static str) -> Self {
        Self { from, operation }
    }
}

/// Errors raised by the service layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FishingError {
    #[error(transparent)]
    Session(#[from] SessionError),

    /// No factory is registered for the requested species.
    #[error("no fish factory registered for {0:?}")]
    UnknownSpecies(Species),

    #[error("no active fishing session")]
    NoActiveSession,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] FishingError),
}
