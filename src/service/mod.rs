//! Service layer: the orchestrator plus the reward and persistence seams it
//! talks to.

pub mod orchestrator;
pub mod repository;
pub mod rewards;

pub use orchestrator::{EncounterOutcome, SessionOrchestrator, SessionStats};
pub use repository::{
    CaughtFishRecord, FishRepository, InMemoryFishRepository, InMemoryPlayerRepository, PlayerRepository,
    PlayerStatsUpdate, PlayerTotals,
};
pub use rewards::{FishingRewards, RewardCalculator};
